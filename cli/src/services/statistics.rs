use chrono::NaiveDate;

use crate::{
    error::{Result, SynthError},
    models::{DateRange, PriceSeries, SummaryStats},
    utils::round1,
};

/// Max, min, mean and spread of close prices dated within
/// `[start_date, end_date]`.
///
/// Fails with `EmptyRange` when start is after end and with `NoDataInRange`
/// when no point of the series falls inside the range.
pub fn summarize(
    series: &PriceSeries,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<SummaryStats> {
    let range = DateRange::new(start_date, end_date)?;
    summarize_range(series, &range)
}

pub fn summarize_range(series: &PriceSeries, range: &DateRange) -> Result<SummaryStats> {
    let (count, sum, max, min) = series.filter_by_date_range(range).fold(
        (0usize, 0.0f64, f64::NEG_INFINITY, f64::INFINITY),
        |(count, sum, max, min), point| {
            (
                count + 1,
                sum + point.close,
                max.max(point.close),
                min.min(point.close),
            )
        },
    );

    if count == 0 {
        return Err(SynthError::NoDataInRange {
            start: range.start(),
            end: range.end(),
        });
    }

    let max = round1(max);
    let min = round1(min);
    Ok(SummaryStats {
        max,
        min,
        mean: round1(sum / count as f64),
        spread: round1(max - min),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;
    use crate::services::generate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series_from(closes: &[f64]) -> PriceSeries {
        PriceSeries {
            ticker: "AAPL".to_string(),
            window: 1,
            points: closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint {
                    date: date(2020, 1, 1 + i as u32),
                    close,
                    ma: Some(close),
                })
                .collect(),
        }
    }

    #[test]
    fn test_summarize_known_values() {
        let series = series_from(&[100.04, 102.26, 98.71, 101.0]);
        let stats = summarize(&series, date(2020, 1, 1), date(2020, 1, 4)).unwrap();
        assert_eq!(stats.max, 102.3);
        assert_eq!(stats.min, 98.7);
        assert_eq!(stats.mean, 100.5);
        assert_eq!(stats.spread, 3.6);
    }

    #[test]
    fn test_summarize_filters_inclusive_sub_range() {
        let series = series_from(&[90.0, 110.0, 105.0, 95.0, 120.0]);
        let stats = summarize(&series, date(2020, 1, 2), date(2020, 1, 4)).unwrap();
        assert_eq!(stats.max, 110.0);
        assert_eq!(stats.min, 95.0);
        assert_eq!(stats.mean, 103.3);
        assert_eq!(stats.spread, 15.0);
    }

    #[test]
    fn test_summarize_orders_max_mean_min() {
        for ticker in ["AAPL", "GOOGL", "NVDA", "AMZN", "TSLA"] {
            let series = generate(ticker, date(2020, 1, 1), date(2023, 1, 1), 20).unwrap();
            let stats = summarize(&series, date(2020, 1, 1), date(2023, 1, 1)).unwrap();
            assert!(stats.max >= stats.mean, "{}", ticker);
            assert!(stats.mean >= stats.min, "{}", ticker);
            assert_eq!(stats.spread, round1(stats.max - stats.min), "{}", ticker);
        }
    }

    #[test]
    fn test_summarize_empty_filter() {
        let series = series_from(&[100.0, 101.0]);
        let err = summarize(&series, date(2021, 1, 1), date(2021, 1, 31)).unwrap_err();
        assert!(matches!(err, SynthError::NoDataInRange { .. }));
    }

    #[test]
    fn test_summarize_inverted_range() {
        let series = series_from(&[100.0, 101.0]);
        let err = summarize(&series, date(2020, 1, 2), date(2020, 1, 1)).unwrap_err();
        assert!(matches!(err, SynthError::EmptyRange { .. }));
    }
}
