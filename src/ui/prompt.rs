use std::io::{self, BufRead, Write};

use chrono::{Month, Weekday};

use crate::config::PROMPT_MONTHS;
use crate::data::filter::FilterSpec;
use crate::data::model::{parse_month, weekday_name, City};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ---------------------------------------------------------------------------
// Prompter – line-oriented questions with a retry loop
// ---------------------------------------------------------------------------

/// Asks questions on `output`, reads answers from `input`, and re-asks on
/// anything it does not understand. End of input is an `UnexpectedEof`
/// error.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Where questions and reports are written.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    fn ask_until<T>(&mut self, question: &str, parse: impl Fn(&str) -> Option<T>) -> io::Result<T> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Some(v) => return Ok(v),
                None => writeln!(self.output, "Invalid input")?,
            }
        }
    }

    pub fn ask_city(&mut self) -> io::Result<City> {
        let names: Vec<&str> = City::ALL.iter().map(|c| c.name()).collect();
        let question = format!(
            "Please enter the city you would like to explore - {}: ",
            names.join(", ")
        );
        self.ask_until(&question, |s| s.parse::<City>().ok())
    }

    /// `None` for "all".
    pub fn ask_month(&mut self) -> io::Result<Option<Month>> {
        let question = format!(
            "Please enter the month to filter by - {}, or 'All' for all months: ",
            PROMPT_MONTHS.join(", ")
        );
        self.ask_until(&question, |s| {
            if s.eq_ignore_ascii_case("all") {
                return Some(None);
            }
            PROMPT_MONTHS
                .iter()
                .find(|m| m.eq_ignore_ascii_case(s))
                .and_then(|m| parse_month(m).ok())
                .map(Some)
        })
    }

    /// `None` for "all".
    pub fn ask_day(&mut self) -> io::Result<Option<Weekday>> {
        self.ask_until(
            "Please enter the day of the week to filter by (or 'All' for all days): ",
            |s| {
                if s.eq_ignore_ascii_case("all") {
                    return Some(None);
                }
                WEEK.iter()
                    .copied()
                    .find(|d| weekday_name(*d).eq_ignore_ascii_case(s))
                    .map(Some)
            },
        )
    }

    pub fn ask_selection(&mut self) -> io::Result<FilterSpec> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;
        let city = self.ask_city()?;
        let month = self.ask_month()?;
        let day = self.ask_day()?;
        writeln!(self.output, "{}", "-".repeat(40))?;
        Ok(FilterSpec { city, month, day })
    }

    /// Yes/no question; anything else is re-asked.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let question = format!("\n{question} Enter yes or no.\n");
        self.ask_until(&question, |s| {
            if s.eq_ignore_ascii_case("yes") {
                Some(true)
            } else if s.eq_ignore_ascii_case("no") {
                Some(false)
            } else {
                None
            }
        })
    }
}
