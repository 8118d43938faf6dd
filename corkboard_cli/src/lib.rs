//! Console front end for corkboard projects: configuration, the project
//! summary and the interactive dialogue player.

pub mod cli;
pub mod config;
pub mod play;
pub mod summary;

pub use cli::Cli;
pub use config::Config;
pub use play::{Player, WalkEnd};
pub use summary::write_summary;
