//! Reciprocity and reference checks over the relationship lists.

use std::collections::BTreeSet;

use crate::models::ArtifactMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyCode {
    /// A `blocks`/`blocked_by` entry names an id not present in the map.
    RelationshipUnknownArtifact,
    /// The referenced artifact exists but does not list the reverse
    /// relationship back.
    RelationshipInconsistentPair,
}

impl ConsistencyCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RelationshipUnknownArtifact => "RELATIONSHIP_UNKNOWN_ARTIFACT",
            Self::RelationshipInconsistentPair => "RELATIONSHIP_INCONSISTENT_PAIR",
        }
    }
}

/// One relationship defect, located by the entry that exposed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyIssue {
    pub code: ConsistencyCode,
    /// Where the issue was found, e.g. `A.1.relationships.blocks[0]`.
    pub path: String,
    pub message: String,
}

/// Check every `blocks`/`blocked_by` entry for dangling references and
/// missing reciprocals.
///
/// A one-sided pair is detectable from both ends and both lists; a
/// canonical sorted-pair key keeps each unordered pair to a single issue.
pub fn validate_relationship_consistency(artifacts: &ArtifactMap) -> Vec<ConsistencyIssue> {
    let mut issues = Vec::new();
    let mut reported_pairs: BTreeSet<(String, String)> = BTreeSet::new();

    for (id, artifact) in artifacts {
        let relationships = &artifact.metadata.relationships;
        let lists = [
            ("blocks", &relationships.blocks, "blocked_by"),
            ("blocked_by", &relationships.blocked_by, "blocks"),
        ];

        for (list_name, list, reverse_name) in lists {
            for (index, dep) in list.iter().enumerate() {
                let path = format!("{id}.relationships.{list_name}[{index}]");

                let Some(other) = artifacts.get(dep) else {
                    issues.push(ConsistencyIssue {
                        code: ConsistencyCode::RelationshipUnknownArtifact,
                        path,
                        message: format!("{id} lists unknown artifact {dep} in {list_name}"),
                    });
                    continue;
                };

                let reverse = match reverse_name {
                    "blocks" => &other.metadata.relationships.blocks,
                    _ => &other.metadata.relationships.blocked_by,
                };
                if reverse.iter().any(|r| r == id) {
                    continue;
                }

                let pair = canonical_pair(id, dep);
                if !reported_pairs.insert(pair) {
                    continue;
                }

                issues.push(ConsistencyIssue {
                    code: ConsistencyCode::RelationshipInconsistentPair,
                    path,
                    message: format!(
                        "{id} lists {dep} in {list_name} but {dep} does not list {id} in {reverse_name}"
                    ),
                });
            }
        }
    }

    issues
}

fn canonical_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
