use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::state::LifecycleState;

/// The cause of a lifecycle event.
///
/// Every event declares why it happened. Some states accept more than one
/// trigger so a manual cause can be told apart from a system cascade
/// (e.g. `InProgress` accepts both `BranchCreated` and `ChildrenStarted`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    ArtifactCreated,
    DependenciesMet,
    HasDependencies,
    BranchCreated,
    PrReady,
    PrMerged,
    DependencyCompleted,
    ChildrenStarted,
    ChildrenCompleted,
    ParentCompleted,
    ParentArchived,
    ManualCancel,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArtifactCreated => "artifact_created",
            Self::DependenciesMet => "dependencies_met",
            Self::HasDependencies => "has_dependencies",
            Self::BranchCreated => "branch_created",
            Self::PrReady => "pr_ready",
            Self::PrMerged => "pr_merged",
            Self::DependencyCompleted => "dependency_completed",
            Self::ChildrenStarted => "children_started",
            Self::ChildrenCompleted => "children_completed",
            Self::ParentCompleted => "parent_completed",
            Self::ParentArchived => "parent_archived",
            Self::ManualCancel => "manual_cancel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "artifact_created" => Some(Self::ArtifactCreated),
            "dependencies_met" => Some(Self::DependenciesMet),
            "has_dependencies" => Some(Self::HasDependencies),
            "branch_created" => Some(Self::BranchCreated),
            "pr_ready" => Some(Self::PrReady),
            "pr_merged" => Some(Self::PrMerged),
            "dependency_completed" => Some(Self::DependencyCompleted),
            "children_started" => Some(Self::ChildrenStarted),
            "children_completed" => Some(Self::ChildrenCompleted),
            "parent_completed" => Some(Self::ParentCompleted),
            "parent_archived" => Some(Self::ParentArchived),
            "manual_cancel" => Some(Self::ManualCancel),
            _ => None,
        }
    }

    /// The triggers a state accepts on its events.
    pub fn allowed_for(state: LifecycleState) -> &'static [Trigger] {
        match state {
            LifecycleState::Draft => &[Self::ArtifactCreated],
            LifecycleState::Ready => &[Self::DependenciesMet, Self::DependencyCompleted],
            LifecycleState::Blocked => &[Self::HasDependencies],
            LifecycleState::InProgress => &[Self::BranchCreated, Self::ChildrenStarted],
            LifecycleState::InReview => &[Self::PrReady, Self::ChildrenCompleted],
            LifecycleState::Completed => &[Self::PrMerged],
            LifecycleState::Cancelled => &[Self::ManualCancel],
            LifecycleState::Archived => &[Self::ParentCompleted, Self::ParentArchived],
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in an artifact's lifecycle history.
///
/// Events are append-only and immutable once appended; the last event's
/// state is the artifact's current state. Timestamps are kept as the
/// ISO-8601 strings found in the document (`2026-03-01T12:00:00Z`) rather
/// than parsed datetimes, so a malformed timestamp stays a schema concern
/// and never turns into a chronology error here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub state: LifecycleState,
    pub timestamp: String,
    pub actor: String,
    pub trigger: Trigger,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, Value>>,
}

/// Per-dependency resolution record carried in a `blocked` event's metadata.
///
/// Created when the artifact enters `Blocked`, one entry per prerequisite.
/// Entries are mutated in place (on a copy) as dependencies resolve, never
/// removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockingDependency {
    pub artifact_id: String,
    #[serde(default)]
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
}
