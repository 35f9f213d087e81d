use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::event::Event;
use super::state::LifecycleState;

/// Blocking relationships between sibling artifacts.
///
/// `blocks` lists artifacts that cannot proceed until this one completes;
/// `blocked_by` lists prerequisites. References are sibling-only: an
/// initiative may only reference initiatives, a milestone only milestones
/// under the same initiative, an issue only issues under the same milestone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Relationships {
    #[serde(default)]
    pub blocks: Vec<String>,
    #[serde(default)]
    pub blocked_by: Vec<String>,
}

/// The validated metadata of an artifact document.
///
/// Only `events` and `relationships` matter to the consistency core; every
/// other field the schema layer validated (title, description, owners, ...)
/// passes through untouched so a round trip does not lose it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactMetadata {
    pub events: Vec<Event>,
    #[serde(default)]
    pub relationships: Relationships,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A tracked work item: an initiative, milestone, or issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    pub metadata: ArtifactMetadata,
}

impl Artifact {
    /// The artifact's current state: its last event's state, if any.
    pub fn current_state(&self) -> Option<LifecycleState> {
        self.metadata.events.last().map(|e| e.state)
    }
}

/// The full set of loaded artifacts, keyed by id.
///
/// A `BTreeMap` keeps validator output in a stable order regardless of
/// load order.
pub type ArtifactMap = BTreeMap<String, Artifact>;
