use clap::{Parser, Subcommand};

/// Arguments for cache command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show cache statistics:\n    kpkg cache\n\n\
                  List extracted packages:\n    kpkg cache list\n\n\
                  Remove every extraction:\n    kpkg cache clear\n\n\
                  Remove the extractions of one package:\n    kpkg cache clear --only s3")]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: Option<CacheSubcommand>,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// List extracted packages
    List,

    /// Remove extracted packages; `kpkg reload` restores them
    Clear(ClearCacheArgs),
}

/// Arguments for cache clear command
#[derive(Parser, Debug)]
pub struct ClearCacheArgs {
    /// Remove only the extractions of this package
    #[arg(long)]
    pub only: Option<String>,
}
