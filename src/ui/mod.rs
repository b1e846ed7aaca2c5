/// Console front end: questions in, reports out.
pub mod prompt;
pub mod report;
