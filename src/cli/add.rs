use clap::Parser;

use crate::manager::{AddOptions, AddPolicy};

/// Arguments for the add command
#[derive(Parser, Debug)]
#[command(
    after_help = "EXAMPLES:\n  \
                  Install the recommended version:\n    kpkg add s3\n\n\
                  Install a specific version:\n    kpkg add s3 --version v1.0.0\n\n\
                  Install a local artifact:\n    kpkg add ./s3_v1.0.0_linux_amd64.ptar\n\n\
                  Replace whatever version is installed:\n    kpkg add s3 --version v1.1.0 --replace\n\n\
                  Keep several versions side by side:\n    kpkg add s3 --version v0.9.0 --allow-multiple"
)]
pub struct AddArgs {
    /// Package name, or path to a .ptar artifact
    pub target: String,

    /// Version to install (defaults to the repository recommendation)
    #[arg(long = "version", value_name = "VERSION")]
    pub version: Option<String>,

    /// Replace an installed version that is higher than the new one
    #[arg(long)]
    pub upgrade: bool,

    /// Replace an installed version that is lower than the new one
    #[arg(long)]
    pub downgrade: bool,

    /// Replace every installed version
    #[arg(long)]
    pub replace: bool,

    /// Install alongside other versions of the same package
    #[arg(long = "allow-multiple")]
    pub allow_multiple: bool,

    /// Never download; the target must be a .ptar file
    #[arg(long = "no-fetch")]
    pub no_fetch: bool,
}

impl From<&AddArgs> for AddOptions {
    fn from(args: &AddArgs) -> Self {
        Self {
            version: args.version.clone(),
            policy: AddPolicy {
                upgrade: args.upgrade,
                downgrade: args.downgrade,
                replace: args.replace,
                allow_multiple_versions: args.allow_multiple,
            },
            implicit_fetch: !args.no_fetch,
        }
    }
}
