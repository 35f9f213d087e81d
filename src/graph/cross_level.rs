//! Dependencies that cross hierarchy levels.

use crate::models::{artifact_type_of, ArtifactMap, ArtifactType};

/// A `blocked_by` reference whose target sits at a different hierarchy
/// level than the artifact holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossLevelDependency {
    pub source_id: String,
    pub source_type: ArtifactType,
    pub dependency_id: String,
    pub dependency_type: ArtifactType,
    pub message: String,
}

/// Flag every dependency whose two ends classify to different types.
///
/// Ids that fail to classify, and dependencies on ids absent from the map,
/// are skipped; those defects belong to the scope and consistency passes.
pub fn detect_cross_level_dependencies(artifacts: &ArtifactMap) -> Vec<CrossLevelDependency> {
    let mut issues = Vec::new();

    for (id, artifact) in artifacts {
        let Some(source_type) = artifact_type_of(id) else {
            continue;
        };

        for dep in &artifact.metadata.relationships.blocked_by {
            if !artifacts.contains_key(dep) {
                continue;
            }
            let Some(dependency_type) = artifact_type_of(dep) else {
                continue;
            };
            if dependency_type == source_type {
                continue;
            }

            issues.push(CrossLevelDependency {
                source_id: id.clone(),
                source_type,
                dependency_id: dep.clone(),
                dependency_type,
                message: format!(
                    "Cross-level dependency detected: {source_type} {id} cannot depend on {dependency_type} {dep}."
                ),
            });
        }
    }

    issues
}
