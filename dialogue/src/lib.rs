//! # Dialogue
//!
//! Plays a [`corkboard::NarrativeGraph`] as a branching conversation.
//!
//! The engine is a set of pure functions over a borrowed graph. The caller
//! holds the [`Cursor`], asks for the current [`Turn`], and feeds the player's
//! answer back through [`Dialogue::advance`]. Nothing is stored on the graph,
//! so any number of sessions can read the same project.
//!
//! ## Core Components
//!
//! - **engine**: choice enumeration, transitions, narration rendering
//! - **error**: rejected inputs and non-fatal traversal warnings
//!
//! Cycles are not detected; bounding automatic steps is up to the caller.

pub mod engine;
pub mod error;

pub use engine::*;
pub use error::*;
