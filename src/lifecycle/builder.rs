//! Construction of well-formed lifecycle events.
//!
//! Both the manual path (CLI, automation) and the cascade engine build
//! events here, so the state/trigger compatibility check has one home.

use serde_json::Value;
use thiserror::Error;

use crate::models::{BlockingDependency, Event, LifecycleState, Trigger};

use super::time::{now_timestamp, parse_timestamp};

/// Metadata key holding a `blocked` event's [`BlockingDependency`] entries.
pub const DEPENDENCIES_KEY: &str = "dependencies";

/// An event that violates the builder's input contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventBuildError {
    /// Every event must declare an explicit cause; there is no default.
    #[error("event for state {state} is missing a trigger")]
    MissingTrigger { state: LifecycleState },

    #[error("trigger {trigger} is not allowed for state {state} (allowed: {})", format_triggers(.allowed))]
    InvalidTrigger {
        state: LifecycleState,
        trigger: Trigger,
        allowed: Vec<Trigger>,
    },

    /// A blocked event documents what it is waiting on; an empty list
    /// means the artifact is not blocked.
    #[error("blocked event requires at least one blocking dependency")]
    NoBlockingDependencies,

    #[error("dependency {artifact_id} is resolved but resolved_at {value:?} is not a valid timestamp")]
    InvalidResolvedAt {
        artifact_id: String,
        value: Option<String>,
    },
}

fn format_triggers(triggers: &[Trigger]) -> String {
    triggers
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Input to [`create_event`].
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub state: LifecycleState,
    pub actor: String,
    pub trigger: Option<Trigger>,
    /// Defaults to now (UTC, second precision) when absent.
    pub timestamp: Option<String>,
    pub metadata: Option<serde_json::Map<String, Value>>,
}

/// Build an event, checking the trigger against the allowed set for its
/// state.
pub fn create_event(input: NewEvent) -> Result<Event, EventBuildError> {
    let state = input.state;

    let trigger = input
        .trigger
        .ok_or(EventBuildError::MissingTrigger { state })?;

    let allowed = Trigger::allowed_for(state);
    if !allowed.contains(&trigger) {
        return Err(EventBuildError::InvalidTrigger {
            state,
            trigger,
            allowed: allowed.to_vec(),
        });
    }

    Ok(Event {
        state,
        timestamp: input.timestamp.unwrap_or_else(now_timestamp),
        actor: input.actor,
        trigger,
        metadata: input.metadata,
    })
}

fn fixed(
    state: LifecycleState,
    trigger: Trigger,
    actor: impl Into<String>,
) -> Result<Event, EventBuildError> {
    create_event(NewEvent {
        state,
        actor: actor.into(),
        trigger: Some(trigger),
        timestamp: None,
        metadata: None,
    })
}

/// `draft` via `artifact_created` — the first event of every history.
pub fn created_event(actor: impl Into<String>) -> Result<Event, EventBuildError> {
    fixed(LifecycleState::Draft, Trigger::ArtifactCreated, actor)
}

/// `ready` via `dependencies_met`.
pub fn ready_event(actor: impl Into<String>) -> Result<Event, EventBuildError> {
    fixed(LifecycleState::Ready, Trigger::DependenciesMet, actor)
}

/// `in_progress` via `branch_created`.
pub fn started_event(actor: impl Into<String>) -> Result<Event, EventBuildError> {
    fixed(LifecycleState::InProgress, Trigger::BranchCreated, actor)
}

/// `in_review` via `pr_ready`.
pub fn review_event(actor: impl Into<String>) -> Result<Event, EventBuildError> {
    fixed(LifecycleState::InReview, Trigger::PrReady, actor)
}

/// `completed` via `pr_merged`.
pub fn completed_event(actor: impl Into<String>) -> Result<Event, EventBuildError> {
    fixed(LifecycleState::Completed, Trigger::PrMerged, actor)
}

/// `cancelled` via `manual_cancel`.
pub fn cancelled_event(actor: impl Into<String>) -> Result<Event, EventBuildError> {
    fixed(LifecycleState::Cancelled, Trigger::ManualCancel, actor)
}

/// `archived` via `parent_completed` or `parent_archived`; any other
/// trigger is rejected by the general path.
pub fn archived_event(
    actor: impl Into<String>,
    trigger: Trigger,
) -> Result<Event, EventBuildError> {
    fixed(LifecycleState::Archived, trigger, actor)
}

/// Build a `blocked` event carrying its [`BlockingDependency`] entries.
///
/// Requires at least one entry. `resolved_at` must parse as an event
/// timestamp on any entry already marked resolved.
pub fn create_blocked_event(
    actor: impl Into<String>,
    dependencies: Vec<BlockingDependency>,
    timestamp: Option<String>,
) -> Result<Event, EventBuildError> {
    if dependencies.is_empty() {
        return Err(EventBuildError::NoBlockingDependencies);
    }

    for dep in &dependencies {
        if !dep.resolved {
            continue;
        }
        let valid = dep
            .resolved_at
            .as_deref()
            .is_some_and(|ts| parse_timestamp(ts).is_some());
        if !valid {
            return Err(EventBuildError::InvalidResolvedAt {
                artifact_id: dep.artifact_id.clone(),
                value: dep.resolved_at.clone(),
            });
        }
    }

    let mut metadata = serde_json::Map::new();
    metadata.insert(
        DEPENDENCIES_KEY.to_string(),
        serde_json::to_value(&dependencies).expect("blocking dependencies serialize"),
    );

    create_event(NewEvent {
        state: LifecycleState::Blocked,
        actor: actor.into(),
        trigger: Some(Trigger::HasDependencies),
        timestamp,
        metadata: Some(metadata),
    })
}
