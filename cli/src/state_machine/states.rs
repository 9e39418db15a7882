use serde::{Deserialize, Serialize};

use crate::models::{DateRange, PriceSeries, SummaryStats};

/// Recommended moving-average slider bounds
pub const MIN_RECOMMENDED_WINDOW: usize = 5;
pub const MAX_RECOMMENDED_WINDOW: usize = 100;
pub const DEFAULT_WINDOW: usize = 20;
pub const DEFAULT_TICKER: &str = "AAPL";

pub const EXECUTE_HINT: &str = "Press \"Execute\" to plot data.";

/// Per-session interaction state.
///
/// Passed into and returned from the transition functions; the generator
/// and statistics never see it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub ticker: String,
    pub range: DateRange,
    pub window: usize,
    pub executed: bool,
    pub series: Option<PriceSeries>,
    pub stats: Option<SummaryStats>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            range: DateRange::default(),
            window: DEFAULT_WINDOW,
            executed: false,
            series: None,
            stats: None,
        }
    }
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.executed && self.series.is_some() && self.stats.is_some() {
            SessionPhase::Ready
        } else {
            SessionPhase::Idle
        }
    }

    pub fn is_plot_visible(&self) -> bool {
        self.phase() == SessionPhase::Ready
    }

    /// Hint shown in place of the plot while idle
    pub fn placeholder(&self) -> Option<&'static str> {
        match self.phase() {
            SessionPhase::Idle => Some(EXECUTE_HINT),
            SessionPhase::Ready => None,
        }
    }

    /// Drop generated data; the selection itself is kept
    pub fn cleared(self) -> Self {
        Self {
            executed: false,
            series: None,
            stats: None,
            ..self
        }
    }
}

/// Phase names for logging and views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Idle,
    Ready,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "IDLE",
            SessionPhase::Ready => "READY",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
