//! Bike-share trip log explorer.
//!
//! Loads one city's trip log, narrows it by month and day of week, and
//! reports popular travel times, stations, trip durations and rider
//! demographics, with a paged view of the raw records.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod pager;
pub mod state;
pub mod stats;
pub mod ui;
