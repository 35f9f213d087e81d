//! Human-readable rendering of validation results.
//!
//! The core raises structured errors and returns structured issue lists;
//! everything that turns them into text for a terminal lives here.

use crate::graph::GraphReport;
use crate::models::{Event, LifecycleState};

const DRAFT: char = '◇';
const READY: char = '○';
const BLOCKED: char = '⊘';
const IN_PROGRESS: char = '◐';
const IN_REVIEW: char = '◑';
const COMPLETED: char = '●';
const CANCELLED: char = '✗';
const ARCHIVED: char = '▪';

/// Status symbol for a lifecycle state.
pub fn state_symbol(state: LifecycleState) -> char {
    match state {
        LifecycleState::Draft => DRAFT,
        LifecycleState::Ready => READY,
        LifecycleState::Blocked => BLOCKED,
        LifecycleState::InProgress => IN_PROGRESS,
        LifecycleState::InReview => IN_REVIEW,
        LifecycleState::Completed => COMPLETED,
        LifecycleState::Cancelled => CANCELLED,
        LifecycleState::Archived => ARCHIVED,
    }
}

/// Render the combined graph report, one line per issue.
///
/// Example output:
/// ```text
/// Dependency graph: 2 issues
///   [cycle] Circular dependency detected: A.1 -> A.2 -> A.1
///   [RELATIONSHIP_UNKNOWN_ARTIFACT] A.1.relationships.blocks[0]: A.1 lists unknown artifact A.9 in blocks
/// ```
pub fn render_graph_report(report: &GraphReport) -> String {
    if report.is_clean() {
        return "Dependency graph: no issues\n".to_string();
    }

    let count = report.issue_count();
    let mut out = if count == 1 {
        "Dependency graph: 1 issue\n".to_string()
    } else {
        format!("Dependency graph: {count} issues\n")
    };

    for issue in &report.cycles {
        out.push_str(&format!("  [cycle] {}\n", issue.message));
    }
    for issue in &report.cross_level {
        out.push_str(&format!("  [cross-level] {}\n", issue.message));
    }
    for issue in &report.consistency {
        out.push_str(&format!(
            "  [{}] {}: {}\n",
            issue.code.as_str(),
            issue.path,
            issue.message
        ));
    }
    for (id, issue) in &report.scope {
        out.push_str(&format!("  [{}] {}: {}\n", issue.code.as_str(), id, issue.message));
    }

    out
}

/// Render one artifact's event history, newest last.
///
/// Example output:
/// ```text
/// A.1 — 3 events
///   ◇ draft        2026-01-05T09:00:00Z  alice  (artifact_created)
///   ○ ready        2026-01-06T10:00:00Z  alice  (dependencies_met)
///   ◐ in_progress  2026-01-07T11:30:00Z  alice  (branch_created)
/// ```
pub fn render_history(id: &str, events: &[Event]) -> String {
    let mut out = if events.len() == 1 {
        format!("{id} — 1 event\n")
    } else {
        format!("{id} — {} events\n", events.len())
    };

    let state_width = events
        .iter()
        .map(|e| e.state.as_str().len())
        .max()
        .unwrap_or(0);

    for event in events {
        out.push_str(&format!(
            "  {} {:state_width$}  {}  {}  ({})\n",
            state_symbol(event.state),
            event.state.as_str(),
            event.timestamp,
            event.actor,
            event.trigger
        ));
    }

    out
}

/// One line locating a lifecycle defect in a specific artifact.
pub fn render_history_issue(id: &str, detail: &str) -> String {
    format!("  [history] {id}: {detail}\n")
}
