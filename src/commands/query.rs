//! Query command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::QueryArgs;
use crate::error::Result;
use crate::manager::QueryOptions;
use crate::remote::{InstallationStatus, Integration, IntegrationType};

/// Run query command
pub fn run(config: Option<PathBuf>, args: QueryArgs) -> Result<()> {
    let manager = super::context::open_manager(config.as_deref())?;
    let integrations = manager.query(&QueryOptions::from(&args))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&integrations)?);
        return Ok(());
    }

    if integrations.is_empty() {
        println!("No integrations found.");
        return Ok(());
    }

    for integration in &integrations {
        display_integration(integration);
    }
    Ok(())
}

fn display_integration(integration: &Integration) {
    let status = match integration.installation.status {
        InstallationStatus::Installed => Style::new().green().apply_to(format!(
            "installed {}",
            integration.installation.version.as_deref().unwrap_or_default()
        )),
        InstallationStatus::NotInstalled => {
            Style::new().dim().apply_to(InstallationStatus::NotInstalled.to_string())
        }
    };

    println!(
        "  {:<24} {:<28} {}",
        Style::new().bold().yellow().apply_to(&integration.name),
        status,
        type_labels(integration).join(",")
    );
    if !integration.description.is_empty() {
        println!("    {}", integration.description);
    }
}

fn type_labels(integration: &Integration) -> Vec<&'static str> {
    [
        (IntegrationType::Storage, "storage"),
        (IntegrationType::Source, "source"),
        (IntegrationType::Destination, "destination"),
        (IntegrationType::Provider, "provider"),
    ]
    .into_iter()
    .filter(|(kind, _)| integration.types.provides(*kind))
    .map(|(_, label)| label)
    .collect()
}
