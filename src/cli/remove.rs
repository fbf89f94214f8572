use clap::Parser;

/// Arguments for the remove command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove every installed version of a package:\n    kpkg remove s3\n\n\
                  Remove everything:\n    kpkg remove --all\n\n\
                  Remove everything without confirmation:\n    kpkg remove --all -y")]
pub struct RemoveArgs {
    /// Package name
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub name: Option<String>,

    /// Remove every installed package
    #[arg(long)]
    pub all: bool,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}
