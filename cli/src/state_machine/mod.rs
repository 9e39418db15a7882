pub mod states;
pub mod transitions;

pub use states::*;
pub use transitions::*;

use crate::{
    error::Result,
    utils::{log_state_transition, Logger},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of transitions kept per session
const HISTORY_LIMIT: usize = 100;

/// One recorded transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTransitionLog {
    pub from: SessionPhase,
    pub to: SessionPhase,
    pub timestamp: DateTime<Utc>,
    pub reason: String,
}

impl StateTransitionLog {
    pub fn new(from: SessionPhase, to: SessionPhase, reason: String) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
            reason,
        }
    }
}

/// Owns one session's state and feeds events through the transitions.
///
/// A failing event leaves the state exactly as it was.
#[derive(Debug, Clone)]
pub struct SessionMachine {
    state: SessionState,
    transition_history: Vec<StateTransitionLog>,
    event_count: u64,
    failure_count: u64,
    created_at: DateTime<Utc>,
    logger: Logger,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::with_state(SessionState::default())
    }

    pub fn with_state(state: SessionState) -> Self {
        Self {
            state,
            transition_history: Vec::new(),
            event_count: 0,
            failure_count: 0,
            created_at: Utc::now(),
            logger: Logger::new("SESSION"),
        }
    }

    /// Apply one event
    pub fn handle(&mut self, event: SessionEvent) -> Result<&SessionState> {
        self.event_count += 1;
        let from = self.state.phase();

        let next = match apply(self.state.clone(), &event) {
            Ok(next) => next,
            Err(e) => {
                self.failure_count += 1;
                self.logger
                    .warn_with_error(&format!("Event '{}' rejected", event), &e);
                return Err(e);
            }
        };

        let to = next.phase();
        let reason = event.to_string();
        log_state_transition(from.as_str(), to.as_str(), &reason);

        self.transition_history
            .push(StateTransitionLog::new(from, to, reason));
        if self.transition_history.len() > HISTORY_LIMIT {
            self.transition_history.remove(0);
        }

        self.state = next;
        Ok(&self.state)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == SessionPhase::Ready
    }

    pub fn transition_history(&self) -> &[StateTransitionLog] {
        &self.transition_history
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            phase: self.phase(),
            events_processed: self.event_count,
            failures: self.failure_count,
            transition_count: self.transition_history.len(),
            uptime_seconds: (Utc::now() - self.created_at).num_seconds().max(0) as u64,
        }
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub phase: SessionPhase,
    pub events_processed: u64,
    pub failures: u64,
    pub transition_count: usize,
    pub uptime_seconds: u64,
}
