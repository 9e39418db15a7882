//! Render-ready data for the Data, Stats and List tabs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{ChartDataset, ChartPoint, ChartSpec, PriceSeries, SeriesType, SummaryStats, TickerRegistry},
};

/// Melt a series into long-form chart records.
///
/// All close rows come first, then all MA rows; days without a moving
/// average produce no MA row.
pub fn chart_points(series: &PriceSeries) -> Vec<ChartPoint> {
    let closes = series.points.iter().map(|p| ChartPoint {
        date: p.date,
        series: SeriesType::Close,
        value: p.close,
    });
    let averages = series.points.iter().filter_map(|p| {
        p.ma.map(|value| ChartPoint {
            date: p.date,
            series: SeriesType::MovingAverage,
            value,
        })
    });
    closes.chain(averages).collect()
}

pub fn chart_dataset(series: &PriceSeries) -> Result<ChartDataset> {
    let name = TickerRegistry::display_name(&series.ticker)?;
    Ok(ChartDataset {
        spec: ChartSpec::new(name, series.window),
        points: chart_points(series),
    })
}

/// Headline metric with an optional delta caption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
}

pub fn metric_cards(stats: &SummaryStats) -> Vec<MetricCard> {
    vec![
        MetricCard {
            label: "Max".to_string(),
            value: format!("{:.1} USD", stats.max),
            delta: Some(format!("{:.1} USD above average", stats.above_average())),
        },
        MetricCard {
            label: "Min".to_string(),
            value: format!("{:.1} USD", stats.min),
            delta: Some(format!("{:.1} USD below average", stats.below_average())),
        },
        MetricCard {
            label: "Spread".to_string(),
            value: format!("{:.1} USD", stats.spread),
            delta: None,
        },
    ]
}

/// One row of the List tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "MA")]
    pub ma: Option<f64>,
}

pub fn table_rows(series: &PriceSeries) -> Vec<TableRow> {
    series
        .points
        .iter()
        .map(|p| TableRow {
            date: p.date,
            close: p.close,
            ma: p.ma,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn small_series() -> PriceSeries {
        PriceSeries {
            ticker: "GOOGL".to_string(),
            window: 2,
            points: vec![
                PricePoint { date: date(1), close: 100.0, ma: None },
                PricePoint { date: date(2), close: 102.0, ma: Some(101.0) },
                PricePoint { date: date(3), close: 101.0, ma: Some(101.5) },
            ],
        }
    }

    #[test]
    fn test_chart_points_melt_order() {
        let points = chart_points(&small_series());
        assert_eq!(points.len(), 5);
        assert!(points[..3].iter().all(|p| p.series == SeriesType::Close));
        assert!(points[3..].iter().all(|p| p.series == SeriesType::MovingAverage));
        assert_eq!(points[3].date, date(2));
        assert_eq!(points[4].value, 101.5);
    }

    #[test]
    fn test_chart_dataset_title() {
        let dataset = chart_dataset(&small_series()).unwrap();
        assert_eq!(dataset.spec.title, "Google Closing Prices and 2-Day Moving Average");
    }

    #[test]
    fn test_metric_cards() {
        let stats = SummaryStats {
            max: 110.2,
            min: 95.1,
            mean: 102.4,
            spread: 15.1,
        };
        let cards = metric_cards(&stats);
        assert_eq!(cards[0].value, "110.2 USD");
        assert_eq!(cards[0].delta.as_deref(), Some("7.8 USD above average"));
        assert_eq!(cards[1].delta.as_deref(), Some("-7.3 USD below average"));
        assert_eq!(cards[2].value, "15.1 USD");
        assert!(cards[2].delta.is_none());
    }

    #[test]
    fn test_metric_cards_keep_one_decimal_for_whole_numbers() {
        let stats = SummaryStats {
            max: 110.0,
            min: 95.0,
            mean: 100.0,
            spread: 15.0,
        };
        let cards = metric_cards(&stats);
        assert_eq!(cards[0].value, "110.0 USD");
        assert_eq!(cards[0].delta.as_deref(), Some("10.0 USD above average"));
        assert_eq!(cards[1].value, "95.0 USD");
        assert_eq!(cards[1].delta.as_deref(), Some("-5.0 USD below average"));
        assert_eq!(cards[2].value, "15.0 USD");
    }

    #[test]
    fn test_table_rows_follow_series() {
        let rows = table_rows(&small_series());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].ma, None);
        assert_eq!(rows[2].close, 101.0);
    }
}
