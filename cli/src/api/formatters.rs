//! Plain-text rendering of views for terminal output

use super::dashboard::DashboardView;
use super::views::MetricCard;
use crate::models::{PriceSeries, TickerInfo};
use crate::utils::format_date;

/// Format an optional price with two decimals, blank when missing
fn format_price(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_default()
}

/// `Date | Close | MA` table, index hidden
pub fn format_table(series: &PriceSeries) -> String {
    let mut lines = Vec::with_capacity(series.len() + 2);
    lines.push(format!("{:<10}  {:>10}  {:>10}", "Date", "Close", "MA"));
    lines.push(format!("{}  {}  {}", "-".repeat(10), "-".repeat(10), "-".repeat(10)));
    for point in &series.points {
        lines.push(format!(
            "{:<10}  {:>10}  {:>10}",
            format_date(point.date),
            format_price(Some(point.close)),
            format_price(point.ma)
        ));
    }
    lines.join("\n")
}

pub fn format_metrics(cards: &[MetricCard]) -> String {
    cards
        .iter()
        .map(|card| match &card.delta {
            Some(delta) => format!("{:<7} {:>12}  ({})", card.label, card.value, delta),
            None => format!("{:<7} {:>12}", card.label, card.value),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_tickers(tickers: &[TickerInfo]) -> String {
    tickers
        .iter()
        .map(|t| format!("{:<6} {:<8} seed={}", t.symbol, t.name, t.seed))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whole dashboard as text: header, selection, then either the hint or the
/// chart title, metrics and table
pub fn format_dashboard(view: &DashboardView) -> String {
    let mut out = vec![
        view.title.clone(),
        view.description.clone(),
        String::new(),
        format!(
            "Stock: {} | Range: {} | MA window: {} | {}",
            view.ticker, view.range, view.window, view.phase
        ),
    ];

    match (&view.placeholder, &view.tabs) {
        (Some(hint), _) => out.push(hint.clone()),
        (None, Some(tabs)) => {
            out.push(String::new());
            out.push(format!(
                "[Data] {} ({} points)",
                tabs.data.spec.title,
                tabs.data.points.len()
            ));
            out.push(String::new());
            out.push("[Stats]".to_string());
            out.push(format_metrics(&tabs.stats));
            if let Some(download) = &view.download {
                out.push(String::new());
                out.push(format!("{}: {}", download.label, download.file_name));
            }
        }
        (None, None) => {}
    }

    out.push(String::new());
    out.push(view.footer.clone());
    out.join("\n")
}
