//! Waymark keeps hierarchical work artifacts consistent.
//!
//! Artifacts (initiatives, milestones, issues) share one lifecycle and can
//! depend on, and cascade state to, one another. The crate is organized
//! around the checks that keep them sound:
//!
//! - [`lifecycle`]: legal transitions, chronological histories, event
//!   construction, and parent-state cascades.
//! - [`graph`]: whole-map validation of the blocking-dependency graph.
//! - [`models`]: the shared entity model.
//! - [`store`]: YAML documents in, artifact map out.
//! - [`report`]: structured results rendered as text.

pub mod graph;
pub mod lifecycle;
pub mod models;
pub mod report;
pub mod store;
