use clap::Parser;

use crate::manager::QueryOptions;
use crate::remote::{InstallationStatus, IntegrationType};

/// Arguments for the query command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Browse the whole catalog:\n    kpkg query\n\n\
                  Storage integrations only:\n    kpkg query --type storage\n\n\
                  Installed integrations, without contacting the repository:\n    kpkg query --local\n\n\
                  Machine-readable output:\n    kpkg query --json")]
pub struct QueryArgs {
    /// Only integrations providing this connector type
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    pub kind: Option<IntegrationType>,

    /// Only integrations carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only integrations with this installation status
    #[arg(long, value_enum)]
    pub status: Option<InstallationStatus>,

    /// Do not fetch the remote catalog
    #[arg(long)]
    pub local: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl From<&QueryArgs> for QueryOptions {
    fn from(args: &QueryArgs) -> Self {
        Self {
            kind: args.kind,
            tag: args.tag.clone(),
            status: args.status,
            only_local: args.local,
        }
    }
}
