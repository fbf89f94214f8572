//! kpkg - integration package manager

use clap::Parser;
use miette::Diagnostic;

use kpkg::cli::{Cli, Commands};
use kpkg::{commands, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Add(args) => commands::add::run(cli.config, args),
        Commands::Remove(args) => commands::remove::run(cli.config, args),
        Commands::List(args) => commands::list::run(cli.config, args),
        Commands::Query(args) => commands::query::run(cli.config, args),
        Commands::Reload => commands::reload::run(cli.config),
        Commands::Cache(args) => commands::cache::run(cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}
