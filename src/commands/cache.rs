use std::path::PathBuf;

use crate::cli::{CacheArgs, CacheSubcommand};
use crate::config::Settings;
use crate::error::{PkgError, Result};
use crate::store::FlatStore;

pub fn run(config: Option<PathBuf>, args: CacheArgs) -> Result<()> {
    let settings = Settings::load(config.as_deref())?;
    let store = super::context::open_store(&settings)?;

    match args.command {
        Some(CacheSubcommand::List) => list_cached_packages(&store),
        Some(CacheSubcommand::Clear(clear_args)) => match clear_args.only {
            Some(name) => clean_specific_package(&store, &name),
            None => clean_all_cache(&store),
        },
        // Default: show only cache statistics
        None => show_cache_stats(&store),
    }
}

fn print_stats_header(store: &FlatStore) -> Result<usize> {
    let stats = store.cache_stats()?;

    println!("Cache Statistics:");
    println!("  Location: {}", store.cachedir().display());
    println!("  Packages: {}", stats.entries);
    println!("  Size: {}", stats.formatted_size());
    Ok(stats.entries)
}

fn show_cache_stats(store: &FlatStore) -> Result<()> {
    if print_stats_header(store)? == 0 {
        println!("\nCache is empty.");
    } else {
        println!("\nRun 'kpkg cache list' to list extracted packages.");
        println!("Run 'kpkg cache clear' to remove every extraction.");
        println!("Run 'kpkg reload' to extract installed packages again.");
    }
    Ok(())
}

fn list_cached_packages(store: &FlatStore) -> Result<()> {
    print_stats_header(store)?;
    println!();

    let packages = store.cache_entries()?;
    if packages.is_empty() {
        println!("No extracted packages.");
        return Ok(());
    }

    println!("Extracted packages ({}):", packages.len());
    for package in &packages {
        let installed = package
            .identity
            .as_ref()
            .is_some_and(|identity| store.artifact_path(identity).is_file());
        println!(
            "  {} ({}{})",
            package.name,
            package.formatted_size(),
            if installed { "" } else { ", orphaned" }
        );
    }
    Ok(())
}

fn clean_all_cache(store: &FlatStore) -> Result<()> {
    let removed = store.clear_cache(None)?;
    println!("Cache cleared successfully ({removed} removed).");
    Ok(())
}

fn clean_specific_package(store: &FlatStore, name: &str) -> Result<()> {
    if store.clear_cache(Some(name))? == 0 {
        return Err(PkgError::NotInstalled {
            name: name.to_string(),
        });
    }
    println!("Removed extracted package: {name}");
    Ok(())
}
