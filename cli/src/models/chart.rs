use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which line a chart record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesType {
    #[serde(rename = "Close")]
    Close,
    #[serde(rename = "MA")]
    MovingAverage,
}

impl SeriesType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesType::Close => "Close",
            SeriesType::MovingAverage => "MA",
        }
    }

    /// Line colour used by the dark chart template
    pub fn color(&self) -> &'static str {
        match self {
            SeriesType::Close => "deepskyblue",
            SeriesType::MovingAverage => "crimson",
        }
    }
}

impl std::fmt::Display for SeriesType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Long-form chart record: one value of one line on one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub series: SeriesType,
    pub value: f64,
}

/// Rendering metadata that accompanies the chart records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub template: String,
    pub colors: Vec<(SeriesType, String)>,
}

impl ChartSpec {
    pub fn new(display_name: &str, window: usize) -> Self {
        Self {
            title: format!(
                "{} Closing Prices and {}-Day Moving Average",
                display_name, window
            ),
            x_axis_title: "Date".to_string(),
            y_axis_title: "Price (USD)".to_string(),
            template: "plotly_dark".to_string(),
            colors: [SeriesType::Close, SeriesType::MovingAverage]
                .into_iter()
                .map(|s| (s, s.color().to_string()))
                .collect(),
        }
    }
}

/// Chart records together with their rendering metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub spec: ChartSpec,
    pub points: Vec<ChartPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_spec_title() {
        let spec = ChartSpec::new("Apple", 20);
        assert_eq!(spec.title, "Apple Closing Prices and 20-Day Moving Average");
        assert_eq!(spec.y_axis_title, "Price (USD)");
        assert_eq!(
            spec.colors,
            vec![
                (SeriesType::Close, "deepskyblue".to_string()),
                (SeriesType::MovingAverage, "crimson".to_string()),
            ]
        );
    }

    #[test]
    fn test_series_type_serializes_short_names() {
        let point = ChartPoint {
            date: NaiveDate::from_ymd_opt(2020, 1, 5).unwrap(),
            series: SeriesType::MovingAverage,
            value: 101.25,
        };
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"date":"2020-01-05","type":"MA","value":101.25}"#);
    }
}
