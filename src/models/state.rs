use serde::{Deserialize, Serialize};

/// The lifecycle state of an artifact.
///
/// Every artifact moves through the same state set, starting at `Draft`.
/// `Completed` and `Archived` are terminal; `Cancelled` can be reopened to
/// `Draft` or swept to `Archived` during cleanup.
///
/// - `Draft`: Created but not yet ready to start
/// - `Ready`: All prerequisites met, work can begin
/// - `Blocked`: Waiting on one or more blocking dependencies
/// - `InProgress`: Work is actively happening
/// - `InReview`: Work finished, awaiting review
/// - `Completed`: Reviewed and merged
/// - `Cancelled`: Abandoned by a human decision
/// - `Archived`: Swept away after its parent completed or archived
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Draft,
    Ready,
    Blocked,
    Cancelled,
    InProgress,
    InReview,
    Completed,
    Archived,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Ready => "ready",
            Self::Blocked => "blocked",
            Self::Cancelled => "cancelled",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "ready" => Some(Self::Ready),
            "blocked" => Some(Self::Blocked),
            "cancelled" => Some(Self::Cancelled),
            "in_progress" => Some(Self::InProgress),
            "in_review" => Some(Self::InReview),
            "completed" => Some(Self::Completed),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
