//! Sibling-scope validation of one artifact's relationship references.
//!
//! Dependencies must stay within the same hierarchy level and branch:
//! initiatives reference initiatives, milestones reference milestones under
//! the same initiative, issues reference issues under the same milestone.
//! Unlike the whole-map passes, this one needs the current artifact's own
//! id to know which scope applies.

use crate::models::{parse_artifact_id, ArtifactType, ParsedId, Relationships};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeCode {
    /// The reference does not parse as an artifact id at all.
    RelationshipInvalidId,
    /// The reference parses, but to a different hierarchy level.
    RelationshipWrongType,
    /// Same level, but under a different initiative.
    RelationshipDifferentInitiative,
    /// Same level and initiative, but under a different milestone.
    RelationshipDifferentMilestone,
}

impl ScopeCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RelationshipInvalidId => "RELATIONSHIP_INVALID_ID",
            Self::RelationshipWrongType => "RELATIONSHIP_WRONG_TYPE",
            Self::RelationshipDifferentInitiative => "RELATIONSHIP_DIFFERENT_INITIATIVE",
            Self::RelationshipDifferentMilestone => "RELATIONSHIP_DIFFERENT_MILESTONE",
        }
    }
}

/// One out-of-scope relationship reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeIssue {
    pub code: ScopeCode,
    pub relationship_id: String,
    pub message: String,
}

/// Classify every reference in `relationships` against the owning
/// artifact's scope.
///
/// Returns nothing when `id` itself does not parse; an artifact with a
/// malformed id is the schema layer's problem, and no scope can be derived
/// from it.
pub fn validate_relationship_scope(id: &str, relationships: &Relationships) -> Vec<ScopeIssue> {
    let Some(own) = parse_artifact_id(id) else {
        return Vec::new();
    };

    relationships
        .blocks
        .iter()
        .chain(relationships.blocked_by.iter())
        .filter_map(|dep| check_reference(id, &own, dep))
        .collect()
}

fn check_reference(id: &str, own: &ParsedId, dep: &str) -> Option<ScopeIssue> {
    let example = sibling_example(own);

    let Some(parsed) = parse_artifact_id(dep) else {
        return Some(ScopeIssue {
            code: ScopeCode::RelationshipInvalidId,
            relationship_id: dep.to_string(),
            message: format!(
                "{dep} is not a valid artifact id; {} {id} may only reference ids like {example}",
                own.artifact_type
            ),
        });
    };

    if parsed.artifact_type != own.artifact_type {
        return Some(ScopeIssue {
            code: ScopeCode::RelationshipWrongType,
            relationship_id: dep.to_string(),
            message: format!(
                "{} {id} cannot reference {} {dep}; expected a sibling {} like {example}",
                own.artifact_type, parsed.artifact_type, own.artifact_type
            ),
        });
    }

    match own.artifact_type {
        ArtifactType::Initiative => None,
        ArtifactType::Milestone => {
            if parsed.initiative != own.initiative {
                Some(ScopeIssue {
                    code: ScopeCode::RelationshipDifferentInitiative,
                    relationship_id: dep.to_string(),
                    message: format!(
                        "milestone {id} cannot reference {dep} outside initiative {}; expected a milestone with prefix {}. (e.g. {example})",
                        own.initiative, own.initiative
                    ),
                })
            } else {
                None
            }
        }
        ArtifactType::Issue => {
            if parsed.initiative != own.initiative {
                Some(ScopeIssue {
                    code: ScopeCode::RelationshipDifferentInitiative,
                    relationship_id: dep.to_string(),
                    message: format!(
                        "issue {id} cannot reference {dep} outside initiative {}; expected an issue with prefix {} (e.g. {example})",
                        own.initiative,
                        prefix_of(own),
                    ),
                })
            } else if parsed.milestone != own.milestone {
                Some(ScopeIssue {
                    code: ScopeCode::RelationshipDifferentMilestone,
                    relationship_id: dep.to_string(),
                    message: format!(
                        "issue {id} cannot reference {dep} outside milestone {}; expected an issue with prefix {} (e.g. {example})",
                        own.milestone_prefix().expect("issue ids carry a milestone"),
                        prefix_of(own),
                    ),
                })
            } else {
                None
            }
        }
    }
}

/// A plausible in-scope sibling id for error messages.
fn sibling_example(own: &ParsedId) -> String {
    match own.artifact_type {
        ArtifactType::Initiative => "B".to_string(),
        ArtifactType::Milestone => format!("{}.1", own.initiative),
        ArtifactType::Issue => format!(
            "{}.1",
            own.milestone_prefix().expect("issue ids carry a milestone")
        ),
    }
}

fn prefix_of(own: &ParsedId) -> String {
    format!(
        "{}.",
        own.milestone_prefix().expect("issue ids carry a milestone")
    )
}
