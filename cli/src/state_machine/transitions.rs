use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SessionState;
use crate::{
    error::Result,
    models::{DateRange, TickerRegistry},
    services::{generate, recompute_ma, summarize_range, validate_window},
    utils::format_date,
};

/// User interactions that drive a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    TickerChanged { ticker: String },
    RangeChanged { start: NaiveDate, end: NaiveDate },
    WindowChanged { window: usize },
    Execute,
    Reset,
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::TickerChanged { ticker } => write!(f, "ticker changed to {}", ticker),
            SessionEvent::RangeChanged { start, end } => write!(
                f,
                "range changed to {} to {}",
                format_date(*start),
                format_date(*end)
            ),
            SessionEvent::WindowChanged { window } => write!(f, "window changed to {}", window),
            SessionEvent::Execute => write!(f, "execute"),
            SessionEvent::Reset => write!(f, "reset"),
        }
    }
}

/// Select another ticker; generated data is discarded until the next execute
pub fn on_ticker_changed(state: SessionState, ticker: &str) -> Result<SessionState> {
    let info = TickerRegistry::resolve(ticker)?;
    Ok(SessionState {
        ticker: info.symbol.to_string(),
        ..state
    }
    .cleared())
}

/// Select another date range; generated data is discarded until the next execute
pub fn on_range_changed(
    state: SessionState,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<SessionState> {
    let range = DateRange::new(start, end)?;
    Ok(SessionState { range, ..state }.cleared())
}

/// Change the moving-average window.
///
/// After an execute only the MA column is recomputed: closes and statistics
/// stay as they are.
pub fn on_window_changed(state: SessionState, window: usize) -> Result<SessionState> {
    validate_window(window)?;

    let series = match (&state.series, state.executed) {
        (Some(series), true) => Some(recompute_ma(series, window)?),
        _ => state.series.clone(),
    };

    Ok(SessionState {
        window,
        series,
        ..state
    })
}

/// Generate the series and statistics for the current selection
pub fn on_execute(state: SessionState) -> Result<SessionState> {
    let series = generate(
        &state.ticker,
        state.range.start(),
        state.range.end(),
        state.window,
    )?;
    let stats = summarize_range(&series, &state.range)?;

    Ok(SessionState {
        executed: true,
        series: Some(series),
        stats: Some(stats),
        ..state
    })
}

/// Back to idle with the current selection
pub fn on_reset(state: SessionState) -> SessionState {
    state.cleared()
}

/// Dispatch an event to its transition function
pub fn apply(state: SessionState, event: &SessionEvent) -> Result<SessionState> {
    match event {
        SessionEvent::TickerChanged { ticker } => on_ticker_changed(state, ticker),
        SessionEvent::RangeChanged { start, end } => on_range_changed(state, *start, *end),
        SessionEvent::WindowChanged { window } => on_window_changed(state, *window),
        SessionEvent::Execute => on_execute(state),
        SessionEvent::Reset => Ok(on_reset(state)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;
    use crate::state_machine::SessionPhase;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn executed_state() -> SessionState {
        let state = on_range_changed(SessionState::default(), date(2020, 1, 1), date(2020, 6, 30))
            .unwrap();
        on_execute(state).unwrap()
    }

    #[test]
    fn test_execute_generates_series_and_stats() {
        let state = executed_state();
        assert_eq!(state.phase(), SessionPhase::Ready);
        let series = state.series.as_ref().unwrap();
        assert_eq!(series.len(), 182);
        assert_eq!(series.window, 20);
        assert!(state.stats.is_some());
    }

    #[test]
    fn test_ticker_change_resets() {
        let state = on_ticker_changed(executed_state(), "nvda").unwrap();
        assert_eq!(state.ticker, "NVDA");
        assert_eq!(state.phase(), SessionPhase::Idle);
        assert!(state.series.is_none());
        assert!(state.stats.is_none());
        assert!(!state.executed);
    }

    #[test]
    fn test_unknown_ticker_is_rejected() {
        let err = on_ticker_changed(SessionState::default(), "IBM").unwrap_err();
        assert!(matches!(err, SynthError::UnknownTicker(_)));
    }

    #[test]
    fn test_range_change_resets_and_validates() {
        let state = on_range_changed(executed_state(), date(2021, 1, 1), date(2021, 2, 1)).unwrap();
        assert_eq!(state.range.days(), 32);
        assert_eq!(state.phase(), SessionPhase::Idle);

        let err = on_range_changed(state, date(2021, 2, 1), date(2021, 1, 1)).unwrap_err();
        assert!(matches!(err, SynthError::EmptyRange { .. }));
    }

    #[test]
    fn test_window_change_after_execute_keeps_closes_and_stats() {
        let before = executed_state();
        let closes_before: Vec<u64> = before
            .series
            .as_ref()
            .unwrap()
            .closes()
            .iter()
            .map(|c| c.to_bits())
            .collect();

        let after = on_window_changed(before.clone(), 50).unwrap();
        let series = after.series.as_ref().unwrap();
        let closes_after: Vec<u64> = series.closes().iter().map(|c| c.to_bits()).collect();

        assert_eq!(closes_before, closes_after);
        assert_eq!(series.window, 50);
        assert_eq!(after.window, 50);
        assert_eq!(after.stats, before.stats);
        assert_eq!(after.phase(), SessionPhase::Ready);
        assert!(series.points[48].ma.is_none());
        assert!(series.points[49].ma.is_some());
    }

    #[test]
    fn test_window_change_before_execute_only_stores() {
        let state = on_window_changed(SessionState::default(), 35).unwrap();
        assert_eq!(state.window, 35);
        assert!(state.series.is_none());

        let executed = on_execute(state).unwrap();
        assert_eq!(executed.series.unwrap().window, 35);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let err = on_window_changed(executed_state(), 0).unwrap_err();
        assert!(matches!(err, SynthError::InvalidWindow(0)));
    }

    #[test]
    fn test_reset_keeps_selection() {
        let state = on_reset(executed_state());
        assert_eq!(state.ticker, "AAPL");
        assert_eq!(state.range.end(), date(2020, 6, 30));
        assert_eq!(state.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_apply_dispatches_events() {
        let events = [
            SessionEvent::TickerChanged { ticker: "TSLA".to_string() },
            SessionEvent::RangeChanged { start: date(2020, 1, 1), end: date(2020, 1, 10) },
            SessionEvent::WindowChanged { window: 5 },
            SessionEvent::Execute,
        ];
        let state = events
            .iter()
            .try_fold(SessionState::default(), |state, event| apply(state, event))
            .unwrap();

        let series = state.series.unwrap();
        assert_eq!(series.ticker, "TSLA");
        assert_eq!(series.len(), 10);
        assert_eq!(series.moving_averages().iter().filter(|m| m.is_some()).count(), 6);
    }

    #[test]
    fn test_event_json_shape() {
        let event: SessionEvent =
            serde_json::from_str(r#"{"type":"window_changed","window":30}"#).unwrap();
        assert_eq!(event, SessionEvent::WindowChanged { window: 30 });

        let event: SessionEvent = serde_json::from_str(r#"{"type":"execute"}"#).unwrap();
        assert_eq!(event, SessionEvent::Execute);
        assert_eq!(
            SessionEvent::TickerChanged { ticker: "AAPL".to_string() }.to_string(),
            "ticker changed to AAPL"
        );
    }
}
