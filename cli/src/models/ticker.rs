use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthError};

/// One synthetic stock: symbol, PRNG seed and display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickerInfo {
    pub symbol: &'static str,
    pub seed: u64,
    pub name: &'static str,
}

const TICKERS: [TickerInfo; 5] = [
    TickerInfo { symbol: "AAPL", seed: 42, name: "Apple" },
    TickerInfo { symbol: "GOOGL", seed: 43, name: "Google" },
    TickerInfo { symbol: "NVDA", seed: 44, name: "Nvidia" },
    TickerInfo { symbol: "AMZN", seed: 45, name: "Amazon" },
    TickerInfo { symbol: "TSLA", seed: 46, name: "Tesla" },
];

/// Fixed registry of synthetic tickers.
///
/// The registry is a process-wide constant; its order is the order offered
/// to the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickerRegistry;

impl TickerRegistry {
    /// All tickers in display order
    pub fn all() -> &'static [TickerInfo] {
        &TICKERS
    }

    /// All ticker symbols in display order
    pub fn symbols() -> Vec<&'static str> {
        TICKERS.iter().map(|t| t.symbol).collect()
    }

    /// Exact symbol lookup
    pub fn get(symbol: &str) -> Option<&'static TickerInfo> {
        TICKERS.iter().find(|t| t.symbol == symbol)
    }

    /// Exact symbol lookup, failing with `UnknownTicker`
    pub fn lookup(symbol: &str) -> Result<&'static TickerInfo> {
        Self::get(symbol).ok_or_else(|| SynthError::UnknownTicker(symbol.to_string()))
    }

    /// Normalize user input (trim, upper-case) and look it up
    pub fn resolve(input: &str) -> Result<&'static TickerInfo> {
        let symbol = input.trim().to_uppercase();
        Self::get(&symbol).ok_or(SynthError::UnknownTicker(symbol))
    }

    pub fn seed(symbol: &str) -> Result<u64> {
        Self::lookup(symbol).map(|t| t.seed)
    }

    pub fn display_name(symbol: &str) -> Result<&'static str> {
        Self::lookup(symbol).map(|t| t.name)
    }

    pub fn contains(symbol: &str) -> bool {
        Self::get(symbol).is_some()
    }
}

/// Serializable view of a registry entry for outer surfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSummary {
    pub symbol: String,
    pub name: String,
    pub seed: u64,
}

impl From<&TickerInfo> for TickerSummary {
    fn from(info: &TickerInfo) -> Self {
        Self {
            symbol: info.symbol.to_string(),
            name: info.name.to_string(),
            seed: info.seed,
        }
    }
}
