//! Seeded random-walk price generator

use chrono::NaiveDate;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::{
    error::{Result, SynthError},
    models::{DateRange, PricePoint, PriceSeries, TickerRegistry},
    utils::{cumulative_sum, format_selection_info, log_generate, rolling_mean, Logger, Timer},
};

/// Level the random walk starts from
pub const PRICE_OFFSET: f64 = 100.0;

/// Generate the daily close series and its moving average for `ticker`.
///
/// The walk is seeded from the ticker's registry seed, so the same ticker
/// and the same number of days always give the same closes.
pub fn generate(
    ticker: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    window: usize,
) -> Result<PriceSeries> {
    let info = TickerRegistry::lookup(ticker)?;
    validate_window(window)?;
    let range = DateRange::new(start_date, end_date)?;

    let timer = Timer::start("series generation");
    log_generate(&format!(
        "Generating {} ({} days)",
        format_selection_info(info.symbol, &range, window),
        range.days()
    ));

    let closes = random_walk(info.seed, range.days());
    let averages = rolling_mean(&closes, window);

    let points = range
        .dates()
        .zip(closes)
        .zip(averages)
        .map(|((date, close), ma)| PricePoint { date, close, ma })
        .collect();

    timer.log_elapsed();

    Ok(PriceSeries {
        ticker: info.symbol.to_string(),
        window,
        points,
    })
}

/// Replace the moving-average column using a new `window`.
///
/// Dates and closes are carried over untouched; the walk is not redrawn.
pub fn recompute_ma(series: &PriceSeries, window: usize) -> Result<PriceSeries> {
    validate_window(window)?;

    let averages = rolling_mean(&series.closes(), window);
    let points = series
        .points
        .iter()
        .zip(averages)
        .map(|(point, ma)| PricePoint { ma, ..*point })
        .collect();

    Logger::new("GENERATOR").debug(&format!(
        "Recomputed MA for {}: window {} → {}",
        series.ticker, series.window, window
    ));

    Ok(PriceSeries {
        ticker: series.ticker.clone(),
        window,
        points,
    })
}

/// `len` closes: cumulative sum of standard-normal draws plus the offset
pub fn random_walk(seed: u64, len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let steps = (0..len).map(|_| rng.sample::<f64, _>(StandardNormal));
    cumulative_sum(steps)
        .into_iter()
        .map(|level| level + PRICE_OFFSET)
        .collect()
}

pub fn validate_window(window: usize) -> Result<()> {
    if window == 0 {
        return Err(SynthError::InvalidWindow(window));
    }
    Ok(())
}
