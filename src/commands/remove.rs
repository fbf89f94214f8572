//! Remove command implementation

use std::path::PathBuf;

use console::Style;
use inquire::Confirm;

use crate::cli::RemoveArgs;
use crate::error::Result;
use crate::manager::RemoveOptions;
use crate::package::PackageIdentity;

/// Run remove command
pub fn run(config: Option<PathBuf>, args: RemoveArgs) -> Result<()> {
    let manager = super::context::open_manager(config.as_deref())?;

    if args.all && !args.yes {
        let installed = manager.list_installed().collect::<Result<Vec<_>>>()?;
        if installed.is_empty() {
            println!("No packages installed.");
            return Ok(());
        }
        if !confirm_remove_all(&installed)? {
            println!("Remove cancelled.");
            return Ok(());
        }
    }

    let target = args.name.as_deref().unwrap_or_default();
    let removed = manager.remove(target, &RemoveOptions { all: args.all })?;

    for identity in &removed {
        println!(
            "{} {} {}",
            Style::new().red().bold().apply_to("Removed"),
            Style::new().bold().apply_to(identity.name()),
            identity.version()
        );
    }
    if removed.is_empty() {
        println!("No packages installed.");
    }
    Ok(())
}

fn confirm_remove_all(installed: &[PackageIdentity]) -> Result<bool> {
    println!("\nThe following package(s) will be removed:");
    for identity in installed {
        println!("  - {identity}");
    }
    println!();

    Ok(Confirm::new("Proceed with removal?")
        .with_default(false)
        .with_help_message("Press 'y' to confirm, or Enter to cancel")
        .prompt()?)
}
