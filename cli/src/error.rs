use chrono::NaiveDate;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum SynthError {
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    #[error("Empty date range: start {start} is after end {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },

    #[error("Date range too large: {days} days (at most {max})")]
    RangeTooLarge { days: i64, max: i64 },

    #[error("No data points between {start} and {end}")]
    NoDataInRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid moving average window: {0} (must be at least 1)")]
    InvalidWindow(usize),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("No data generated yet: press Execute first")]
    NotExecuted,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Input validation failures, as opposed to unexpected internal errors.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SynthError::UnknownTicker(_)
                | SynthError::EmptyRange { .. }
                | SynthError::RangeTooLarge { .. }
                | SynthError::NoDataInRange { .. }
                | SynthError::InvalidWindow(_)
                | SynthError::InvalidDate(_)
                | SynthError::NotExecuted
        )
    }
}

pub type Result<T> = std::result::Result<T, SynthError>;

/// Generic notice shown when a failure reaches the outermost boundary.
pub const CRASH_NOTICE: &str = "ERROR: The program crashed unexpectedly!";
