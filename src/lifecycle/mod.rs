//! The consistency core for single-artifact lifecycle checks.
//!
//! Four pieces, leaves first:
//!
//! - [`transitions`]: which state moves are legal per artifact type.
//! - [`ordering`]: a history starts at `draft` and never goes back in time.
//! - [`builder`]: events are built with an explicit, compatible trigger.
//! - [`cascade`]: a parent's state inferred from its children, plus
//!   blocking-dependency resolution.
//!
//! Everything here is synchronous and side-effect free; the only function
//! that "writes" anything returns an updated copy of its input.

pub mod builder;
pub mod cascade;
pub mod ordering;
pub mod time;
pub mod transitions;

pub use builder::{
    archived_event, cancelled_event, completed_event, create_blocked_event, create_event,
    created_event, ready_event, review_event, started_event, EventBuildError, NewEvent,
};
pub use cascade::{
    CascadeDecision, CascadeEngine, CascadeError, DependencyResolution,
    DependencyResolutionOutcome, SYSTEM_ACTOR,
};
pub use ordering::{validate_event_order, EventOrderError};
pub use transitions::{assert_transition, can_transition, valid_transitions, StateTransitionError};
