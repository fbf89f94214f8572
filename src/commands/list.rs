//! List command implementation
//!
//! Lists installed packages grouped by name, with every installed version.

use std::collections::BTreeMap;
use std::path::PathBuf;

use console::Style;

use crate::cli::ListArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::package::{PackageIdentity, version};
use crate::store::FlatStore;

/// Run list command
pub fn run(config: Option<PathBuf>, args: ListArgs) -> Result<()> {
    let settings = Settings::load(config.as_deref())?;
    let store = super::context::open_store(&settings)?;
    list_packages(&store, args.detailed)
}

fn list_packages(store: &FlatStore, detailed: bool) -> Result<()> {
    let mut identities = Vec::new();
    for entry in store.packages(None) {
        match entry {
            Ok(identity) => identities.push(identity),
            // keep listing the well-formed entries
            Err(e) => eprintln!("{} {}", Style::new().yellow().apply_to("Warning:"), e),
        }
    }
    let grouped = group_by_name(identities);

    if grouped.is_empty() {
        println!("No packages installed.");
        return Ok(());
    }

    println!("Installed packages ({}):", grouped.len());
    println!();

    for (name, identities) in &grouped {
        println!("  {}", Style::new().bold().yellow().apply_to(name));
        for identity in identities {
            println!(
                "    {} {}",
                identity.version(),
                Style::new().dim().apply_to(format!("({}/{})", identity.os(), identity.arch()))
            );
            if detailed {
                display_paths(store, identity);
            }
        }
    }

    Ok(())
}

fn display_paths(store: &FlatStore, identity: &PackageIdentity) {
    let extracted = store.extraction_path(identity);
    println!(
        "      {} {}",
        Style::new().bold().apply_to("Artifact:"),
        store.artifact_path(identity).display()
    );
    if extracted.is_dir() {
        println!(
            "      {} {}",
            Style::new().bold().apply_to("Extracted:"),
            extracted.display()
        );
    } else {
        println!(
            "      {} {}",
            Style::new().bold().apply_to("Extracted:"),
            Style::new().red().apply_to("missing, run 'kpkg reload'")
        );
    }
}

/// Group identities by name, versions in ascending order
fn group_by_name(identities: Vec<PackageIdentity>) -> BTreeMap<String, Vec<PackageIdentity>> {
    let mut grouped: BTreeMap<String, Vec<PackageIdentity>> = BTreeMap::new();
    for identity in identities {
        grouped
            .entry(identity.name().to_string())
            .or_default()
            .push(identity);
    }
    for versions in grouped.values_mut() {
        versions.sort_by(|a, b| version::compare(a.version(), b.version()));
    }
    grouped
}
