//! Add command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::AddArgs;
use crate::error::Result;
use crate::manager::AddOptions;

/// Run add command
pub fn run(config: Option<PathBuf>, args: AddArgs) -> Result<()> {
    let manager = super::context::open_manager(config.as_deref())?;
    let identity = manager.add(&args.target, &AddOptions::from(&args))?;

    println!(
        "{} {} {}",
        Style::new().green().bold().apply_to("Installed"),
        Style::new().bold().apply_to(identity.name()),
        identity.version()
    );
    Ok(())
}
