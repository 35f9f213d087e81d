//! Chronological soundness of an artifact's event history.

use thiserror::Error;

use crate::models::{Event, LifecycleState};

use super::time::parse_timestamp;

/// A history that is not chronologically sound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventOrderError {
    #[error("event history is empty")]
    EmptyEvents,

    #[error("first event must be draft, found {found} at index 0")]
    FirstEventMustBeDraft { found: LifecycleState },

    #[error("event at index {index} ({curr}) predates the event before it ({prev})")]
    EventsOutOfOrder {
        index: usize,
        prev: String,
        curr: String,
    },
}

impl EventOrderError {
    /// Stable machine-readable code for this violation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyEvents => "EMPTY_EVENTS",
            Self::FirstEventMustBeDraft { .. } => "FIRST_EVENT_MUST_BE_DRAFT",
            Self::EventsOutOfOrder { .. } => "EVENTS_OUT_OF_ORDER",
        }
    }
}

/// Check that a history starts at `draft` and never moves backwards in time.
///
/// Equal timestamps are valid: a cascade lands in the same second as the
/// event that caused it. Only a strict decrease is a violation, and the
/// first offending index is reported.
///
/// Timestamps that fail to parse are skipped for ordering purposes. The
/// format itself is the schema layer's to validate; raising here as well
/// would report one formatting defect twice, once as a format error and
/// once as a chronology error.
pub fn validate_event_order(events: &[Event]) -> Result<(), EventOrderError> {
    if events.is_empty() {
        return Err(EventOrderError::EmptyEvents);
    }

    if events[0].state != LifecycleState::Draft {
        return Err(EventOrderError::FirstEventMustBeDraft {
            found: events[0].state,
        });
    }

    let mut prev: Option<(usize, chrono::NaiveDateTime)> = None;
    for (index, event) in events.iter().enumerate() {
        let Some(parsed) = parse_timestamp(&event.timestamp) else {
            continue;
        };
        if let Some((prev_index, prev_parsed)) = prev {
            if parsed < prev_parsed {
                return Err(EventOrderError::EventsOutOfOrder {
                    index,
                    prev: events[prev_index].timestamp.clone(),
                    curr: event.timestamp.clone(),
                });
            }
        }
        prev = Some((index, parsed));
    }

    Ok(())
}
