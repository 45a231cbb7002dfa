//! Committed-transition bookkeeping.
//!
//! The log is an immutable record of every transition the state machine
//! committed, in order, with the cause attached. It exists for diagnostics
//! and tests; nothing in the interaction logic reads it back.

use super::state::InteractionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What made a transition happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// A pointer event (enter/exit/down/up/click) drove the transition.
    Pointer,
    /// An explicit API call (`set_active`, `hover`, `select`, ...).
    Api,
    /// A completion chain (e.g. `Show` finishing and entering `Default`).
    Chain,
}

/// Record of a single committed transition.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// The state being left.
    pub from: InteractionState,
    /// The state entered.
    pub to: InteractionState,
    /// When the transition was committed.
    pub at: DateTime<Utc>,
    /// What drove it.
    pub cause: TransitionCause,
}

/// Ordered history of committed transitions.
///
/// `record` is a pure function: it returns a new log with the record
/// appended and leaves the receiver untouched.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use petal_ui::core::{InteractionLog, InteractionRecord, InteractionState, TransitionCause};
///
/// let log = InteractionLog::new();
/// let log = log.record(InteractionRecord {
///     from: InteractionState::Default,
///     to: InteractionState::Hover,
///     at: Utc::now(),
///     cause: TransitionCause::Pointer,
/// });
///
/// assert_eq!(log.states(), vec![&InteractionState::Default, &InteractionState::Hover]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InteractionLog {
    records: Vec<InteractionRecord>,
}

impl InteractionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning a new log.
    pub fn record(&self, record: InteractionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// The path of states traversed: the first record's `from`, then every
    /// record's `to` in order.
    pub fn states(&self) -> Vec<&InteractionState> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// All committed records in order.
    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&InteractionRecord> {
        self.records.last()
    }

    /// Wall-clock span between the first and last committed transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            last.at.signed_duration_since(first.at).to_std().ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(
        from: InteractionState,
        to: InteractionState,
        cause: TransitionCause,
    ) -> InteractionRecord {
        InteractionRecord {
            from,
            to,
            at: Utc::now(),
            cause,
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log = InteractionLog::new();
        assert!(log.records().is_empty());
        assert!(log.states().is_empty());
        assert!(log.duration().is_none());
        assert!(log.last().is_none());
    }

    #[test]
    fn record_is_pure() {
        let log = InteractionLog::new();
        let appended = log.record(rec(
            InteractionState::Default,
            InteractionState::Hover,
            TransitionCause::Pointer,
        ));
        assert!(log.records().is_empty());
        assert_eq!(appended.records().len(), 1);
    }

    #[test]
    fn states_traces_the_path() {
        let log = InteractionLog::new()
            .record(rec(
                InteractionState::Show,
                InteractionState::Default,
                TransitionCause::Chain,
            ))
            .record(rec(
                InteractionState::Default,
                InteractionState::Press,
                TransitionCause::Pointer,
            ));
        assert_eq!(
            log.states(),
            vec![
                &InteractionState::Show,
                &InteractionState::Default,
                &InteractionState::Press,
            ]
        );
    }

    #[test]
    fn cause_is_preserved() {
        let log = InteractionLog::new().record(rec(
            InteractionState::Default,
            InteractionState::Select,
            TransitionCause::Api,
        ));
        assert_eq!(log.last().unwrap().cause, TransitionCause::Api);
    }

    #[test]
    fn log_serializes() {
        let log = InteractionLog::new().record(rec(
            InteractionState::Default,
            InteractionState::Hover,
            TransitionCause::Pointer,
        ));
        let json = serde_json::to_string(&log).unwrap();
        let back: InteractionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.records().len(), 1);
    }
}
