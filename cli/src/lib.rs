//! # synthstock - Synthetic Stock Price Viewer
//!
//! Generates deterministic daily price series for a fixed set of synthetic
//! tickers and derives what a small dashboard needs:
//! - Seeded random-walk closes with a trailing moving-average trendline
//! - Max / min / mean / spread statistics over a date range
//! - Explicit per-session state transitions (ticker, range, window, execute)
//! - Chart-ready long-form records, metric cards, table rows and CSV export
//!
//! ## Quick Start
//!
//! ```rust
//! use synthstock::prelude::*;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2020, 1, 10).unwrap();
//!
//! let series = generate("AAPL", start, end, 5)?;
//! let stats = summarize(&series, start, end)?;
//! assert_eq!(series.len(), 10);
//! assert!(stats.max >= stats.min);
//! # Ok::<(), synthstock::SynthError>(())
//! ```

pub mod error;
pub mod models;
pub mod services;
pub mod state_machine;
pub mod utils;

// Public API for easy library usage
pub mod api;

// Prelude for convenient imports
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use synthstock::prelude::*;
    //! ```

    pub use crate::api::{DashboardView, SeriesRequest};
    pub use crate::error::{Result, SynthError};
    pub use crate::models::{DateRange, PricePoint, PriceSeries, SummaryStats, TickerRegistry};
    pub use crate::services::{generate, recompute_ma, summarize};
    pub use crate::state_machine::{SessionEvent, SessionMachine, SessionState};
}

pub use error::{Result, SynthError, CRASH_NOTICE};
pub use utils::{init_logger, Logger, Timer};
