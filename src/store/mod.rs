//! YAML-backed artifact storage.
//!
//! Artifacts live one per document in `.yml`/`.yaml` files anywhere under
//! a root directory; the directory layout itself carries no meaning. Each
//! document is `{id, metadata: {events, relationships, ...}}`. Structural
//! validation beyond what deserialization enforces belongs to the schema
//! layer, not here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{Artifact, ArtifactMap, ArtifactMetadata};

/// On-disk shape of one artifact document.
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactDocument {
    id: String,
    metadata: ArtifactMetadata,
}

/// Load every artifact document under `root` into a map keyed by id.
pub fn load_dir(root: &Path) -> Result<ArtifactMap> {
    let mut files = Vec::new();
    collect_yaml_files(root, &mut files)
        .with_context(|| format!("Failed to scan artifact directory {}", root.display()))?;
    files.sort();

    let mut artifacts = ArtifactMap::new();
    for path in files {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let doc: ArtifactDocument = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::debug!(id = %doc.id, path = %path.display(), "loaded artifact");

        if artifacts
            .insert(
                doc.id.clone(),
                Artifact {
                    metadata: doc.metadata,
                },
            )
            .is_some()
        {
            bail!("Duplicate artifact id {} in {}", doc.id, path.display());
        }
    }

    Ok(artifacts)
}

/// Write one artifact document to `path`, creating parent directories.
pub fn write_artifact(path: &Path, id: &str, artifact: &Artifact) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let doc = ArtifactDocument {
        id: id.to_string(),
        metadata: artifact.metadata.clone(),
    };
    let raw = serde_yaml::to_string(&doc)
        .with_context(|| format!("Failed to serialize artifact {id}"))?;
    fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!(id, path = %path.display(), "wrote artifact");
    Ok(())
}

fn collect_yaml_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_yaml_files(&path, files)?;
            continue;
        }
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "yml" || e == "yaml");
        if is_yaml {
            files.push(path);
        }
    }
    Ok(())
}
