//! Builder pattern for one-shot generation requests

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{DateRange, PriceSeries, SummaryStats, TickerRegistry},
    services::{generate, summarize_range, validate_window},
    state_machine::{DEFAULT_TICKER, DEFAULT_WINDOW},
};

/// Validated generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub ticker: String,
    pub range: DateRange,
    pub window: usize,
}

/// Generated series together with its statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedData {
    pub series: PriceSeries,
    pub stats: SummaryStats,
}

impl SeriesRequest {
    pub fn builder() -> SeriesRequestBuilder {
        SeriesRequestBuilder::new()
    }

    /// Run the generator and the statistics over the requested range
    pub fn run(&self) -> Result<GeneratedData> {
        let series = generate(
            &self.ticker,
            self.range.start(),
            self.range.end(),
            self.window,
        )?;
        let stats = summarize_range(&series, &self.range)?;
        Ok(GeneratedData { series, stats })
    }
}

/// Fluent builder for [`SeriesRequest`].
///
/// # Example
/// ```rust
/// use synthstock::api::SeriesRequest;
///
/// let data = SeriesRequest::builder()
///     .ticker("AAPL")
///     .start_str("2020-01-01")
///     .end_str("2020-01-10")
///     .window(5)
///     .build()?
///     .run()?;
/// assert_eq!(data.series.len(), 10);
/// # Ok::<(), synthstock::SynthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SeriesRequestBuilder {
    ticker: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    start_str: Option<String>,
    end_str: Option<String>,
    window: usize,
}

impl SeriesRequestBuilder {
    pub fn new() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            start: None,
            end: None,
            start_str: None,
            end_str: None,
            window: DEFAULT_WINDOW,
        }
    }

    pub fn ticker(mut self, ticker: &str) -> Self {
        self.ticker = ticker.to_string();
        self
    }

    pub fn start(mut self, start: NaiveDate) -> Self {
        self.start = Some(start);
        self.start_str = None;
        self
    }

    pub fn end(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self.end_str = None;
        self
    }

    /// Start date as `YYYY-MM-DD`, parsed on build
    pub fn start_str(mut self, start: &str) -> Self {
        self.start_str = Some(start.to_string());
        self
    }

    /// End date as `YYYY-MM-DD`, parsed on build
    pub fn end_str(mut self, end: &str) -> Self {
        self.end_str = Some(end.to_string());
        self
    }

    pub fn range(self, range: DateRange) -> Self {
        self.start(range.start()).end(range.end())
    }

    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Validate ticker, dates and window. Missing dates fall back to the
    /// default range.
    pub fn build(self) -> Result<SeriesRequest> {
        let info = TickerRegistry::resolve(&self.ticker)?;
        validate_window(self.window)?;

        let defaults = DateRange::default();
        let start = match self.start_str {
            Some(s) => crate::utils::parse_date(&s)?,
            None => self.start.unwrap_or(defaults.start()),
        };
        let end = match self.end_str {
            Some(s) => crate::utils::parse_date(&s)?,
            None => self.end.unwrap_or(defaults.end()),
        };

        Ok(SeriesRequest {
            ticker: info.symbol.to_string(),
            range: DateRange::new(start, end)?,
            window: self.window,
        })
    }
}

impl Default for SeriesRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;

    #[test]
    fn test_builder_defaults() {
        let request = SeriesRequest::builder().build().unwrap();
        assert_eq!(request.ticker, "AAPL");
        assert_eq!(request.window, 20);
        assert_eq!(request.range, DateRange::default());
    }

    #[test]
    fn test_builder_parses_dates_and_normalizes_ticker() {
        let request = SeriesRequest::builder()
            .ticker("tsla")
            .start_str("2021-05-01")
            .end_str("2021-05-31")
            .window(10)
            .build()
            .unwrap();
        assert_eq!(request.ticker, "TSLA");
        assert_eq!(request.range.days(), 31);

        let data = request.run().unwrap();
        assert_eq!(data.series.len(), 31);
        assert!(data.stats.max >= data.stats.min);
    }

    #[test]
    fn test_builder_reports_invalid_input() {
        let err = SeriesRequest::builder().start_str("yesterday").build().unwrap_err();
        assert!(matches!(err, SynthError::InvalidDate(_)));

        let err = SeriesRequest::builder().window(0).build().unwrap_err();
        assert!(matches!(err, SynthError::InvalidWindow(0)));

        let err = SeriesRequest::builder()
            .start_str("2022-01-02")
            .end_str("2022-01-01")
            .build()
            .unwrap_err();
        assert!(matches!(err, SynthError::EmptyRange { .. }));
    }

    #[test]
    fn test_builder_rejects_extended_year_span() {
        let err = SeriesRequest::builder()
            .start_str("-200000-01-01")
            .end_str("+200000-01-01")
            .build()
            .unwrap_err();
        assert!(matches!(err, SynthError::RangeTooLarge { days: 146_097_001, .. }));
        assert!(err.is_user_error());
    }
}
