use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};
use crate::utils::format_date;

/// Longest range a series may span, in days (about a century)
pub const MAX_RANGE_DAYS: i64 = 36_525;

/// Inclusive calendar date range, always `start <= end` and at most
/// `MAX_RANGE_DAYS` long
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = SynthError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(SynthError::EmptyRange { start, end });
        }
        let days = (end - start).num_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(SynthError::RangeTooLarge {
                days,
                max: MAX_RANGE_DAYS,
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days in the range, both ends included
    pub fn days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Ascending daily dates from start to end inclusive
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.days())
    }
}

impl Default for DateRange {
    fn default() -> Self {
        // 2020-01-01 .. 2023-01-01 are valid calendar dates
        Self {
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            format_date(self.start),
            format_date(self.end)
        )
    }
}

/// One generated day: close price and trailing moving average
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
    pub ma: Option<f64>,
}

/// Daily synthetic price series, date-ascending and contiguous
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub window: usize,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn moving_averages(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.ma).collect()
    }

    /// Points whose date falls inside `range`
    pub fn filter_by_date_range<'a>(
        &'a self,
        range: &'a DateRange,
    ) -> impl Iterator<Item = &'a PricePoint> + 'a {
        self.points.iter().filter(move |p| range.contains(p.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_rejects_inverted_bounds() {
        let err = DateRange::new(date(2020, 1, 10), date(2020, 1, 1)).unwrap_err();
        assert!(matches!(err, SynthError::EmptyRange { .. }));
    }

    #[test]
    fn test_date_range_rejects_oversized_span() {
        let start = NaiveDate::from_ymd_opt(-200_000, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(200_000, 1, 1).unwrap();
        assert!(matches!(
            DateRange::new(start, end),
            Err(SynthError::RangeTooLarge { days: 146_097_001, .. })
        ));

        let widest = date(2000, 1, 1) + chrono::Days::new(MAX_RANGE_DAYS as u64 - 1);
        assert_eq!(DateRange::new(date(2000, 1, 1), widest).unwrap().days(), 36_525);
        assert!(DateRange::new(date(2000, 1, 1), widest + chrono::Days::new(1)).is_err());
    }

    #[test]
    fn test_date_range_days_inclusive() {
        let range = DateRange::new(date(2020, 1, 1), date(2020, 1, 10)).unwrap();
        assert_eq!(range.days(), 10);

        let single = DateRange::new(date(2020, 2, 29), date(2020, 2, 29)).unwrap();
        assert_eq!(single.days(), 1);
        assert_eq!(single.dates().collect::<Vec<_>>(), vec![date(2020, 2, 29)]);
    }

    #[test]
    fn test_dates_cross_month_and_leap_day() {
        let range = DateRange::new(date(2020, 2, 27), date(2020, 3, 2)).unwrap();
        let dates: Vec<_> = range.dates().collect();
        assert_eq!(
            dates,
            vec![
                date(2020, 2, 27),
                date(2020, 2, 28),
                date(2020, 2, 29),
                date(2020, 3, 1),
                date(2020, 3, 2),
            ]
        );
    }

    #[test]
    fn test_default_range() {
        let range = DateRange::default();
        assert_eq!(range.start(), date(2020, 1, 1));
        assert_eq!(range.end(), date(2023, 1, 1));
        assert_eq!(range.to_string(), "2020-01-01 to 2023-01-01");
    }

    #[test]
    fn test_deserialize_validates_bounds() {
        let ok: DateRange =
            serde_json::from_str(r#"{"start":"2021-03-01","end":"2021-03-31"}"#).unwrap();
        assert_eq!(ok.days(), 31);

        let bad = serde_json::from_str::<DateRange>(r#"{"start":"2021-03-31","end":"2021-03-01"}"#);
        assert!(bad.is_err());
    }
}
