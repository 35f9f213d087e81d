use speculate2::speculate;

use waymark::graph::{
    detect_circular_dependencies, detect_cross_level_dependencies, validate_graph,
    validate_relationship_consistency, validate_relationship_scope, ConsistencyCode, ScopeCode,
};
use waymark::models::{
    Artifact, ArtifactMap, ArtifactMetadata, ArtifactType, Relationships,
};

fn artifact(blocks: &[&str], blocked_by: &[&str]) -> Artifact {
    Artifact {
        metadata: ArtifactMetadata {
            events: Vec::new(),
            relationships: Relationships {
                blocks: blocks.iter().map(|s| s.to_string()).collect(),
                blocked_by: blocked_by.iter().map(|s| s.to_string()).collect(),
            },
            extra: serde_json::Map::new(),
        },
    }
}

fn map(entries: Vec<(&str, Artifact)>) -> ArtifactMap {
    entries
        .into_iter()
        .map(|(id, artifact)| (id.to_string(), artifact))
        .collect()
}

fn relationships(blocks: &[&str], blocked_by: &[&str]) -> Relationships {
    Relationships {
        blocks: blocks.iter().map(|s| s.to_string()).collect(),
        blocked_by: blocked_by.iter().map(|s| s.to_string()).collect(),
    }
}

speculate! {
    describe "detect_circular_dependencies" {
        it "finds a three-artifact ring exactly once" {
            let artifacts = map(vec![
                ("A.1", artifact(&[], &["A.2"])),
                ("A.2", artifact(&[], &["A.3"])),
                ("A.3", artifact(&[], &["A.1"])),
            ]);

            let issues = detect_circular_dependencies(&artifacts);
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].cycle, vec!["A.1", "A.2", "A.3", "A.1"]);
            assert_eq!(
                issues[0].message,
                "Circular dependency detected: A.1 -> A.2 -> A.3 -> A.1"
            );
        }

        it "treats a self-loop as a one-node cycle" {
            let artifacts = map(vec![("A.1", artifact(&[], &["A.1"]))]);

            let issues = detect_circular_dependencies(&artifacts);
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].cycle, vec!["A.1", "A.1"]);
        }

        it "returns nothing for an acyclic graph" {
            let artifacts = map(vec![
                ("A.1", artifact(&[], &[])),
                ("A.2", artifact(&[], &["A.1"])),
                ("A.3", artifact(&[], &["A.1", "A.2"])),
                ("A.4", artifact(&[], &["A.3"])),
            ]);

            assert!(detect_circular_dependencies(&artifacts).is_empty());
        }

        it "reports each disjoint cycle once" {
            let artifacts = map(vec![
                ("A.1", artifact(&[], &["A.2"])),
                ("A.2", artifact(&[], &["A.1"])),
                ("B.1", artifact(&[], &["B.2"])),
                ("B.2", artifact(&[], &["B.1"])),
            ]);

            let issues = detect_circular_dependencies(&artifacts);
            assert_eq!(issues.len(), 2);
        }

        it "ignores dependencies on ids absent from the map" {
            let artifacts = map(vec![("A.1", artifact(&[], &["A.9"]))]);
            assert!(detect_circular_dependencies(&artifacts).is_empty());
        }
    }

    describe "detect_cross_level_dependencies" {
        it "flags a milestone depending on its own initiative" {
            let artifacts = map(vec![
                ("A", artifact(&[], &[])),
                ("A.1", artifact(&[], &["A"])),
            ]);

            let issues = detect_cross_level_dependencies(&artifacts);
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].source_id, "A.1");
            assert_eq!(issues[0].source_type, ArtifactType::Milestone);
            assert_eq!(issues[0].dependency_id, "A");
            assert_eq!(issues[0].dependency_type, ArtifactType::Initiative);
            assert_eq!(
                issues[0].message,
                "Cross-level dependency detected: milestone A.1 cannot depend on initiative A."
            );
        }

        it "flags an issue depending on its own initiative" {
            let artifacts = map(vec![
                ("A", artifact(&[], &[])),
                ("A.1.2", artifact(&[], &["A"])),
            ]);

            let issues = detect_cross_level_dependencies(&artifacts);
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].source_type, ArtifactType::Issue);
            assert_eq!(issues[0].dependency_type, ArtifactType::Initiative);
        }

        it "allows a milestone depending on a sibling milestone" {
            let artifacts = map(vec![
                ("A.1", artifact(&[], &["A.2"])),
                ("A.2", artifact(&[], &[])),
            ]);

            assert!(detect_cross_level_dependencies(&artifacts).is_empty());
        }

        it "skips dependencies absent from the map" {
            let artifacts = map(vec![("A.1", artifact(&[], &["A"]))]);
            assert!(detect_cross_level_dependencies(&artifacts).is_empty());
        }

        it "skips ids that do not classify" {
            let artifacts = map(vec![
                ("not-an-id", artifact(&[], &["A.1"])),
                ("A.1", artifact(&[], &["not-an-id"])),
            ]);

            assert!(detect_cross_level_dependencies(&artifacts).is_empty());
        }
    }

    describe "validate_relationship_consistency" {
        it "flags a reference to an artifact missing from the map" {
            let artifacts = map(vec![("A.1", artifact(&["A.9"], &[]))]);

            let issues = validate_relationship_consistency(&artifacts);
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].code, ConsistencyCode::RelationshipUnknownArtifact);
            assert_eq!(issues[0].path, "A.1.relationships.blocks[0]");
        }

        it "reports a one-sided pair exactly once" {
            let artifacts = map(vec![
                ("A.1", artifact(&["A.2"], &[])),
                ("A.2", artifact(&[], &[])),
            ]);

            let issues = validate_relationship_consistency(&artifacts);
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].code, ConsistencyCode::RelationshipInconsistentPair);
        }

        it "accepts a reciprocal pair" {
            let artifacts = map(vec![
                ("A.1", artifact(&["A.2"], &[])),
                ("A.2", artifact(&[], &["A.1"])),
            ]);

            assert!(validate_relationship_consistency(&artifacts).is_empty());
        }

        it "reports two independent one-sided lists separately" {
            // A.1 -> A.2 missing its reciprocal, and A.3 -> A.1 missing
            // its reciprocal: two distinct pairs, two issues.
            let artifacts = map(vec![
                ("A.1", artifact(&["A.2"], &[])),
                ("A.2", artifact(&[], &[])),
                ("A.3", artifact(&[], &["A.1"])),
            ]);

            let issues = validate_relationship_consistency(&artifacts);
            assert_eq!(issues.len(), 2);
            assert!(issues
                .iter()
                .all(|i| i.code == ConsistencyCode::RelationshipInconsistentPair));
        }
    }

    describe "validate_relationship_scope" {
        it "accepts initiatives referencing initiatives" {
            assert!(validate_relationship_scope("A", &relationships(&["B"], &[])).is_empty());
        }

        it "flags an unparseable reference" {
            let issues = validate_relationship_scope("A.1", &relationships(&["wat?"], &[]));
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].code, ScopeCode::RelationshipInvalidId);
            assert_eq!(issues[0].relationship_id, "wat?");
        }

        it "flags a reference to a different level" {
            let issues = validate_relationship_scope("A.1", &relationships(&[], &["A.1.2"]));
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].code, ScopeCode::RelationshipWrongType);
        }

        it "flags a milestone outside the initiative" {
            let issues = validate_relationship_scope("A.1", &relationships(&["B.1"], &[]));
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].code, ScopeCode::RelationshipDifferentInitiative);
            assert!(issues[0].message.contains("A.1"), "message names the expected scope");
        }

        it "flags an issue outside the milestone" {
            let issues = validate_relationship_scope("A.1.2", &relationships(&[], &["A.2.1"]));
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].code, ScopeCode::RelationshipDifferentMilestone);
            assert!(issues[0].message.contains("A.1."), "message names the expected prefix");
        }

        it "flags an issue outside the initiative as a different initiative" {
            let issues = validate_relationship_scope("A.1.2", &relationships(&["B.1.1"], &[]));
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].code, ScopeCode::RelationshipDifferentInitiative);
        }

        it "checks both lists" {
            let issues = validate_relationship_scope(
                "A.1",
                &relationships(&["B.1"], &["garbage"]),
            );
            assert_eq!(issues.len(), 2);
        }

        it "returns nothing when the owning id does not parse" {
            assert!(validate_relationship_scope("???", &relationships(&["A.1"], &[])).is_empty());
        }
    }

    describe "validate_graph" {
        it "aggregates every pass into one report" {
            let artifacts = map(vec![
                ("A.1", artifact(&["A.1"], &["A.1"])),
                ("A.2", artifact(&["A.9"], &[])),
                ("B.1", artifact(&["A.1"], &[])),
            ]);

            let report = validate_graph(&artifacts);
            assert!(!report.is_clean());
            assert_eq!(report.cycles.len(), 1);
            // A.2 -> A.9 dangling, B.1 -> A.1 missing its reciprocal.
            assert_eq!(report.consistency.len(), 2);
            // B.1 references a milestone under a different initiative.
            assert_eq!(report.scope.len(), 1);
            assert_eq!(report.issue_count(), 4);
        }

        it "is clean for a consistent map" {
            let artifacts = map(vec![
                ("A.1", artifact(&["A.2"], &[])),
                ("A.2", artifact(&[], &["A.1"])),
            ]);

            let report = validate_graph(&artifacts);
            assert!(report.is_clean());
            assert_eq!(report.issue_count(), 0);
        }
    }
}
