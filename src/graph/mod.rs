//! Whole-map validation of the blocking-dependency graph.
//!
//! Unlike the lifecycle checks, nothing here fails fast: every pass walks
//! the entire map and returns an exhaustive list of structured issues, so
//! a caller can report all problems in one round instead of fixing them
//! one rerun at a time.

mod consistency;
mod cross_level;
mod cycles;
mod scope;

pub use consistency::{validate_relationship_consistency, ConsistencyCode, ConsistencyIssue};
pub use cross_level::{detect_cross_level_dependencies, CrossLevelDependency};
pub use cycles::{detect_circular_dependencies, CircularDependency};
pub use scope::{validate_relationship_scope, ScopeCode, ScopeIssue};

use crate::models::ArtifactMap;

/// The combined result of every graph-level pass.
#[derive(Debug, Clone, Default)]
pub struct GraphReport {
    pub cycles: Vec<CircularDependency>,
    pub cross_level: Vec<CrossLevelDependency>,
    pub consistency: Vec<ConsistencyIssue>,
    /// Scope issues paired with the artifact id they were found on.
    pub scope: Vec<(String, ScopeIssue)>,
}

impl GraphReport {
    pub fn is_clean(&self) -> bool {
        self.cycles.is_empty()
            && self.cross_level.is_empty()
            && self.consistency.is_empty()
            && self.scope.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.cycles.len() + self.cross_level.len() + self.consistency.len() + self.scope.len()
    }
}

/// Run every graph pass over the map and collect the results.
pub fn validate_graph(artifacts: &ArtifactMap) -> GraphReport {
    let mut scope = Vec::new();
    for (id, artifact) in artifacts {
        for issue in validate_relationship_scope(id, &artifact.metadata.relationships) {
            scope.push((id.clone(), issue));
        }
    }

    GraphReport {
        cycles: detect_circular_dependencies(artifacts),
        cross_level: detect_cross_level_dependencies(artifacts),
        consistency: validate_relationship_consistency(artifacts),
        scope,
    }
}
