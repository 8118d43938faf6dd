use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "corkboard_cli",
    version,
    about = "Play or inspect a corkboard narrative project"
)]
pub struct Cli {
    /// Project file exported by the editor.
    pub project: PathBuf,

    /// TOML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read the project with the legacy schema (enables jumper nodes).
    #[arg(long)]
    pub legacy: bool,

    /// Start at the first node with this label instead of the starting node.
    #[arg(long, value_name = "LABEL")]
    pub start: Option<String>,

    /// Print the project structure and exit.
    #[arg(long)]
    pub summary: bool,
}
