//! Parent-state inference and dependency-resolution bookkeeping.
//!
//! Two responsibilities share one type for cohesion: deciding whether a
//! parent artifact should move in response to its children, and building
//! the system-attributed event that performs the move. Resolving a
//! blocking dependency lives here too, since the final resolution can
//! itself produce a `ready` transition.

use serde_json::Value;
use thiserror::Error;

use crate::models::{Artifact, BlockingDependency, Event, LifecycleState, Trigger};

use super::builder::{create_event, NewEvent, DEPENDENCIES_KEY};
use super::time::parse_timestamp;

/// Actor recorded on every system-generated event.
pub const SYSTEM_ACTOR: &str = "System Cascade";

/// Metadata key on a cascade `ready` event listing resolved prerequisites.
pub const DEPENDENCIES_RESOLVED_KEY: &str = "dependencies_resolved";

/// The outcome of evaluating a parent against its children.
///
/// An explicit two-variant enum rather than optional fields, so callers
/// handle both branches exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeDecision {
    /// The parent should transition to `new_state`.
    Cascade {
        new_state: LifecycleState,
        reason: String,
    },
    /// The parent stays where it is.
    Hold { reason: String },
}

impl CascadeDecision {
    pub fn should_cascade(&self) -> bool {
        matches!(self, Self::Cascade { .. })
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::Cascade { reason, .. } | Self::Hold { reason } => reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CascadeError {
    /// Cascades only ever drive `ready`, `in_progress`, `in_review`, and
    /// `archived`; `completed` and `cancelled` are always human decisions.
    #[error("no system trigger is defined for cascading into {state}")]
    UnsupportedCascadeEvent { state: LifecycleState },
}

/// Input to [`CascadeEngine::resolve_dependency_completion`].
#[derive(Debug, Clone)]
pub struct DependencyResolution {
    /// Id of the prerequisite that just completed.
    pub dependency_id: String,
    pub resolution_timestamp: String,
}

/// Result of [`CascadeEngine::resolve_dependency_completion`].
///
/// `artifact` is an updated deep copy; the input is never touched.
#[derive(Debug, Clone)]
pub struct DependencyResolutionOutcome {
    pub updated: bool,
    pub artifact: Artifact,
    pub ready_event_added: bool,
}

pub struct CascadeEngine;

impl CascadeEngine {
    /// Decide whether a parent should move given its children's states.
    ///
    /// Cancelled and archived children are inert and drop out of the
    /// evaluation entirely. Of the rest: all completed means the parent
    /// goes to review; otherwise a parent still sitting in `ready` starts
    /// once any child has progressed past `ready`. The all-completed rule
    /// is checked first, so a single completed child sends a parent to
    /// `in_review`, not `in_progress`.
    ///
    /// Pure and idempotent: identical inputs yield an identical decision.
    pub fn should_cascade_to_parent(
        children: &[&Artifact],
        parent_state: Option<LifecycleState>,
    ) -> CascadeDecision {
        let active: Vec<Option<LifecycleState>> = children
            .iter()
            .map(|child| child.current_state())
            .filter(|state| {
                !matches!(
                    state,
                    Some(LifecycleState::Cancelled) | Some(LifecycleState::Archived)
                )
            })
            .collect();

        if active.is_empty() {
            return CascadeDecision::Hold {
                reason: "No active children to evaluate".to_string(),
            };
        }

        if active
            .iter()
            .all(|state| *state == Some(LifecycleState::Completed))
        {
            return CascadeDecision::Cascade {
                new_state: LifecycleState::InReview,
                reason: "All active children completed".to_string(),
            };
        }

        if parent_state == Some(LifecycleState::Ready) {
            let any_progressed = active.iter().any(|state| {
                matches!(
                    state,
                    Some(LifecycleState::InProgress)
                        | Some(LifecycleState::InReview)
                        | Some(LifecycleState::Completed)
                )
            });
            if any_progressed {
                return CascadeDecision::Cascade {
                    new_state: LifecycleState::InProgress,
                    reason: "First active child progressed".to_string(),
                };
            }
        }

        let incomplete = active
            .iter()
            .filter(|state| **state != Some(LifecycleState::Completed))
            .count();
        let reason = if incomplete == 1 {
            "1 active child incomplete".to_string()
        } else {
            format!("{incomplete} active children incomplete")
        };
        CascadeDecision::Hold { reason }
    }

    /// Build the system-generated event that performs a cascade.
    ///
    /// The event's metadata preserves provenance: the cascade type plus
    /// the state, actor, and timestamp of the event that caused it. It
    /// carries the causing event's timestamp, so a cascade lands in the
    /// same instant as its cause.
    pub fn generate_cascade_event(
        new_state: LifecycleState,
        trigger_event: &Event,
        cascade_type: &str,
    ) -> Result<Event, CascadeError> {
        let trigger = match new_state {
            LifecycleState::Ready => Trigger::DependencyCompleted,
            LifecycleState::InProgress => Trigger::ChildrenStarted,
            LifecycleState::InReview => Trigger::ChildrenCompleted,
            LifecycleState::Archived => Trigger::ParentArchived,
            state => return Err(CascadeError::UnsupportedCascadeEvent { state }),
        };

        let mut metadata = serde_json::Map::new();
        metadata.insert("cascade_type".to_string(), Value::from(cascade_type));
        metadata.insert(
            "trigger_event".to_string(),
            Value::from(trigger_event.state.as_str()),
        );
        metadata.insert(
            "trigger_actor".to_string(),
            Value::from(trigger_event.actor.as_str()),
        );
        metadata.insert(
            "trigger_timestamp".to_string(),
            Value::from(trigger_event.timestamp.as_str()),
        );

        let event = create_event(NewEvent {
            state: new_state,
            actor: SYSTEM_ACTOR.to_string(),
            trigger: Some(trigger),
            timestamp: Some(trigger_event.timestamp.clone()),
            metadata: Some(metadata),
        })
        .expect("cascade trigger map stays within the allowed-trigger table");

        Ok(event)
    }

    /// Mark one blocking dependency resolved on a copy of `dependent`.
    ///
    /// Finds the most recent `blocked` event, flips the matching entry to
    /// resolved, and, once every entry is resolved, appends a `ready`
    /// event attributed to the system with the resolved ids in resolution
    /// order. An unknown dependency id leaves the copy equal to the input.
    pub fn resolve_dependency_completion(
        dependent: &Artifact,
        resolution: &DependencyResolution,
    ) -> DependencyResolutionOutcome {
        let mut artifact = dependent.clone();

        let Some(blocked_index) = artifact
            .metadata
            .events
            .iter()
            .rposition(|e| e.state == LifecycleState::Blocked)
        else {
            return DependencyResolutionOutcome {
                updated: false,
                artifact,
                ready_event_added: false,
            };
        };

        let mut dependencies = match parse_dependencies(&artifact.metadata.events[blocked_index]) {
            Some(deps) => deps,
            None => {
                return DependencyResolutionOutcome {
                    updated: false,
                    artifact,
                    ready_event_added: false,
                }
            }
        };

        let Some(entry) = dependencies
            .iter_mut()
            .find(|d| d.artifact_id == resolution.dependency_id)
        else {
            return DependencyResolutionOutcome {
                updated: false,
                artifact,
                ready_event_added: false,
            };
        };

        let newly_resolved = !entry.resolved;
        entry.resolved = true;
        entry.resolved_at = Some(resolution.resolution_timestamp.clone());

        let all_resolved = dependencies.iter().all(|d| d.resolved);
        let resolved_ids = resolution_order(&dependencies);

        let blocked = &mut artifact.metadata.events[blocked_index];
        blocked
            .metadata
            .get_or_insert_with(serde_json::Map::new)
            .insert(
                DEPENDENCIES_KEY.to_string(),
                serde_json::to_value(&dependencies).expect("blocking dependencies serialize"),
            );

        let mut ready_event_added = false;
        if newly_resolved && all_resolved {
            let mut metadata = serde_json::Map::new();
            metadata.insert(
                DEPENDENCIES_RESOLVED_KEY.to_string(),
                Value::from(resolved_ids),
            );

            let ready = create_event(NewEvent {
                state: LifecycleState::Ready,
                actor: SYSTEM_ACTOR.to_string(),
                trigger: Some(Trigger::DependencyCompleted),
                timestamp: Some(resolution.resolution_timestamp.clone()),
                metadata: Some(metadata),
            })
            .expect("dependency_completed is an allowed trigger for ready");

            artifact.metadata.events.push(ready);
            ready_event_added = true;
        }

        DependencyResolutionOutcome {
            updated: true,
            artifact,
            ready_event_added,
        }
    }
}

fn parse_dependencies(blocked: &Event) -> Option<Vec<BlockingDependency>> {
    let value = blocked.metadata.as_ref()?.get(DEPENDENCIES_KEY)?;
    serde_json::from_value(value.clone()).ok()
}

/// Resolved ids ordered by when each dependency resolved. Ties keep their
/// list position; an unparseable `resolved_at` sorts last.
fn resolution_order(dependencies: &[BlockingDependency]) -> Vec<String> {
    let mut resolved: Vec<(Option<chrono::NaiveDateTime>, usize, &str)> = dependencies
        .iter()
        .enumerate()
        .filter(|(_, d)| d.resolved)
        .map(|(i, d)| {
            let at = d.resolved_at.as_deref().and_then(parse_timestamp);
            (at, i, d.artifact_id.as_str())
        })
        .collect();
    resolved.sort_by_key(|(at, i, _)| (at.is_none(), *at, *i));
    resolved.into_iter().map(|(_, _, id)| id.to_string()).collect()
}
