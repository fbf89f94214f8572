//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - add: Add command arguments
//! - remove: Remove command arguments
//! - list: List command arguments
//! - query: Query command arguments
//! - cache: Cache command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod add;
pub mod cache;
pub mod completions;
pub mod list;
pub mod query;
pub mod remove;

pub use add::AddArgs;
pub use cache::{CacheArgs, CacheSubcommand, ClearCacheArgs};
pub use completions::CompletionsArgs;
pub use list::ListArgs;
pub use query::QueryArgs;
pub use remove::RemoveArgs;

/// kpkg - integration package manager
///
/// Install, replace and remove versioned integration packages.
#[derive(Parser, Debug)]
#[command(
    name = "kpkg",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Lifecycle manager for versioned integration packages",
    long_about = "kpkg installs integration packages (.ptar artifacts) from local files or \
                  from a remote repository, enforces a version policy and keeps an extracted \
                  copy of every installed package ready for use.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  kpkg add s3                                \x1b[90m# Install from the repository\x1b[0m\n   \
                  kpkg add ./s3_v1.0.0_linux_amd64.ptar      \x1b[90m# Install a local artifact\x1b[0m\n   \
                  kpkg add s3 --version v1.1.0 --replace     \x1b[90m# Replace the installed version\x1b[0m\n   \
                  kpkg remove s3                             \x1b[90m# Remove every version of s3\x1b[0m\n   \
                  kpkg list                                  \x1b[90m# List installed packages\x1b[0m\n   \
                  kpkg query --type storage                  \x1b[90m# Browse the catalog\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to the user configuration directory)
    #[arg(long, short = 'c', global = true, env = "KPKG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a package
    Add(AddArgs),

    /// Remove installed packages
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// List installed packages
    #[command(alias = "ls")]
    List(ListArgs),

    /// Browse installed and available integrations
    Query(QueryArgs),

    /// Re-extract and re-register every installed package
    Reload,

    /// Manage extracted packages
    #[command(name = "cache")]
    Cache(CacheArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
