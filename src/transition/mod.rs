//! Lifecycle transitions between active and archived notes.
//!
//! ```text
//! Active --archive--> Archived
//! Archived --restore--> Active
//! Active (project) --complete--> Archived + completed
//! ```
//!
//! Each transition is a short sequence of metadata edits, status rewrites
//! and moves recorded in a [`Journal`]. When a step fails the earlier steps
//! are undone in reverse order.

mod engine;
mod journal;

pub use engine::{MovedEntry, Transition, TransitionEngine, TransitionReport};
pub use journal::{Journal, Step};
