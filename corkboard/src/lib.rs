//! # Corkboard
//!
//! The narrative graph: nodes, labeled connections between them, and the
//! importer that builds a fully linked graph from a flow-graph editor export.
//! This crate holds no traversal logic; see the `dialogue` crate for that.
//!
//! ## Core Components
//!
//! - **elements**: identity base, nodes, connections, node bodies
//! - **project**: the arena that owns every node and connection
//! - **importer**: two-phase JSON import with deferred reference resolution

pub mod elements;
pub mod importer;
pub mod project;

pub use elements::*;
pub use importer::*;
pub use project::*;
