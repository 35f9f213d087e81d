//! Legal lifecycle transitions per artifact type.
//!
//! One static table per type, covering every state (terminal states map to
//! an empty list) so lookups never need a missing-row branch. The three
//! tables are currently identical except that an issue may go straight
//! from `draft` to `blocked`; they are kept separate so each level can
//! evolve independently.

use thiserror::Error;

use crate::models::{ArtifactType, LifecycleState};

use LifecycleState::*;

/// A transition outside the table for the artifact's type.
///
/// Carries the legal alternatives so a caller can self-correct or present
/// options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{artifact_type} cannot move from {from} to {to} (valid: {})", format_states(.valid_transitions))]
pub struct StateTransitionError {
    pub artifact_type: ArtifactType,
    pub from: LifecycleState,
    pub to: LifecycleState,
    pub valid_transitions: Vec<LifecycleState>,
}

fn format_states(states: &[LifecycleState]) -> String {
    if states.is_empty() {
        return "none".to_string();
    }
    states
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The legal next states from `from`, in table order, without duplicates.
pub fn valid_transitions(
    artifact_type: ArtifactType,
    from: LifecycleState,
) -> &'static [LifecycleState] {
    match artifact_type {
        ArtifactType::Initiative => initiative_transitions(from),
        ArtifactType::Milestone => milestone_transitions(from),
        ArtifactType::Issue => issue_transitions(from),
    }
}

/// Whether `from → to` is a legal transition for the artifact's type.
pub fn can_transition(
    artifact_type: ArtifactType,
    from: LifecycleState,
    to: LifecycleState,
) -> bool {
    valid_transitions(artifact_type, from).contains(&to)
}

/// Authorize a transition, or fail with the legal alternatives.
pub fn assert_transition(
    artifact_type: ArtifactType,
    from: LifecycleState,
    to: LifecycleState,
) -> Result<(), StateTransitionError> {
    if can_transition(artifact_type, from, to) {
        return Ok(());
    }
    Err(StateTransitionError {
        artifact_type,
        from,
        to,
        valid_transitions: valid_transitions(artifact_type, from).to_vec(),
    })
}

fn initiative_transitions(from: LifecycleState) -> &'static [LifecycleState] {
    match from {
        Draft => &[Ready, Cancelled],
        Ready => &[InProgress, Blocked, Cancelled],
        Blocked => &[Ready, Cancelled],
        InProgress => &[InReview, Blocked, Cancelled],
        InReview => &[Completed, InProgress, Cancelled],
        Completed => &[],
        Cancelled => &[Draft, Archived],
        Archived => &[],
    }
}

fn milestone_transitions(from: LifecycleState) -> &'static [LifecycleState] {
    match from {
        Draft => &[Ready, Cancelled],
        Ready => &[InProgress, Blocked, Cancelled],
        Blocked => &[Ready, Cancelled],
        InProgress => &[InReview, Blocked, Cancelled],
        InReview => &[Completed, InProgress, Cancelled],
        Completed => &[],
        Cancelled => &[Draft, Archived],
        Archived => &[],
    }
}

fn issue_transitions(from: LifecycleState) -> &'static [LifecycleState] {
    match from {
        // Issues can be born with unresolved prerequisites.
        Draft => &[Ready, Blocked, Cancelled],
        Ready => &[InProgress, Blocked, Cancelled],
        Blocked => &[Ready, Cancelled],
        InProgress => &[InReview, Blocked, Cancelled],
        InReview => &[Completed, InProgress, Cancelled],
        Completed => &[],
        Cancelled => &[Draft, Archived],
        Archived => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [ArtifactType; 3] = [
        ArtifactType::Initiative,
        ArtifactType::Milestone,
        ArtifactType::Issue,
    ];

    const ALL_STATES: [LifecycleState; 8] =
        [Draft, Ready, Blocked, Cancelled, InProgress, InReview, Completed, Archived];

    #[test]
    fn valid_transitions_have_no_duplicates() {
        for ty in ALL_TYPES {
            for from in ALL_STATES {
                let valid = valid_transitions(ty, from);
                for (i, s) in valid.iter().enumerate() {
                    assert!(!valid[i + 1..].contains(s), "{ty} {from} lists {s} twice");
                }
            }
        }
    }

    #[test]
    fn can_transition_agrees_with_valid_transitions() {
        for ty in ALL_TYPES {
            for from in ALL_STATES {
                for to in ALL_STATES {
                    assert_eq!(
                        can_transition(ty, from, to),
                        valid_transitions(ty, from).contains(&to)
                    );
                }
            }
        }
    }

    #[test]
    fn assert_transition_throws_exactly_when_illegal() {
        for ty in ALL_TYPES {
            for from in ALL_STATES {
                for to in ALL_STATES {
                    let result = assert_transition(ty, from, to);
                    if can_transition(ty, from, to) {
                        assert!(result.is_ok());
                    } else {
                        let err = result.unwrap_err();
                        assert_eq!(err.valid_transitions, valid_transitions(ty, from));
                    }
                }
            }
        }
    }

    #[test]
    fn only_issues_can_block_from_draft() {
        assert!(can_transition(ArtifactType::Issue, Draft, Blocked));
        assert!(!can_transition(ArtifactType::Initiative, Draft, Blocked));
        assert!(!can_transition(ArtifactType::Milestone, Draft, Blocked));
    }

    #[test]
    fn completed_and_archived_are_terminal() {
        for ty in ALL_TYPES {
            assert!(valid_transitions(ty, Completed).is_empty());
            assert!(valid_transitions(ty, Archived).is_empty());
        }
    }
}
