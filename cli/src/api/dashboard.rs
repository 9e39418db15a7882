//! Snapshot of everything the viewer shows for one session

use serde::{Deserialize, Serialize};

use super::views::{chart_dataset, metric_cards, table_rows, MetricCard, TableRow};
use crate::{
    error::{Result, SynthError},
    models::{ChartDataset, DateRange},
    services::{export_file_name, to_csv_bytes, CSV_MIME_TYPE},
    state_machine::{SessionPhase, SessionState},
};

pub const DASHBOARD_TITLE: &str = "📈 Stock Market Data Viewer 📉";
pub const DASHBOARD_DESCRIPTION: &str =
    "View synthetic stock market data and plot a moving average trendline.";
pub const DASHBOARD_FOOTER: &str =
    "Select a stock, set the moving average window, and execute to visualize the data.";

/// Data, Stats and List tabs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardTabs {
    pub data: ChartDataset,
    pub stats: Vec<MetricCard>,
    pub list: Vec<TableRow>,
}

/// Download button metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadInfo {
    pub label: String,
    pub file_name: String,
    pub mime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub title: String,
    pub description: String,
    pub phase: SessionPhase,
    pub ticker: String,
    pub range: DateRange,
    pub window: usize,
    pub placeholder: Option<String>,
    pub tabs: Option<DashboardTabs>,
    pub download: Option<DownloadInfo>,
    pub footer: String,
}

impl DashboardView {
    pub fn from_state(state: &SessionState) -> Result<Self> {
        let tabs = match (&state.series, &state.stats) {
            (Some(series), Some(stats)) if state.executed => Some(DashboardTabs {
                data: chart_dataset(series)?,
                stats: metric_cards(stats),
                list: table_rows(series),
            }),
            _ => None,
        };

        let download = tabs.as_ref().map(|_| DownloadInfo {
            label: "Download data as CSV".to_string(),
            file_name: export_file_name(&state.ticker),
            mime: CSV_MIME_TYPE.to_string(),
        });

        Ok(Self {
            title: DASHBOARD_TITLE.to_string(),
            description: DASHBOARD_DESCRIPTION.to_string(),
            phase: state.phase(),
            ticker: state.ticker.clone(),
            range: state.range,
            window: state.window,
            placeholder: state.placeholder().map(str::to_string),
            tabs,
            download,
            footer: DASHBOARD_FOOTER.to_string(),
        })
    }
}

/// CSV bytes of the session's series, once executed
pub fn session_csv(state: &SessionState) -> Result<(String, Vec<u8>)> {
    match (&state.series, state.executed) {
        (Some(series), true) => Ok((export_file_name(&series.ticker), to_csv_bytes(series)?)),
        _ => Err(SynthError::NotExecuted),
    }
}
