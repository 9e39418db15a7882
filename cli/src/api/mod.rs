//! High-level API for easy library usage
//!
//! One-shot generation requests, the per-tab views and the dashboard
//! snapshot built from a session.

pub mod builder;
pub mod dashboard;
pub mod formatters;
pub mod views;

pub use builder::{GeneratedData, SeriesRequest, SeriesRequestBuilder};
pub use dashboard::{session_csv, DashboardTabs, DashboardView, DownloadInfo};
pub use views::{chart_dataset, chart_points, metric_cards, table_rows, MetricCard, TableRow};
