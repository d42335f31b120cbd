//! salsheli CLI
//!
//! Maintenance tool for the shopping-list app's product catalog: merges new
//! products, fixes names, moves products between category files and checks
//! the catalog for duplicates.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction, RulesAction};
use commands::Context;
pub(crate) use error::CliError;
pub(crate) use logging::log_blank;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logger(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = || Context::load(cli.catalog_dir.clone(), cli.rules_dir.clone(), cli.dry_run);

    match &cli.command {
        Commands::Add {
            partition,
            from,
            sort,
        } => commands::add::run_add(&ctx()?, partition, from, *sort),
        Commands::Fix { partitions } => commands::cleanup::run_fix(&ctx()?, partitions),
        Commands::Cleanup => commands::cleanup::run_cleanup(&ctx()?),
        Commands::Reclassify { plan } => commands::reclassify::run_reclassify(&ctx()?, plan),
        Commands::Split { master } => commands::split::run_split(&ctx()?, master),
        Commands::Prune { plan } => commands::prune::run_prune(&ctx()?, plan),
        Commands::Sort { partition, by_name } => {
            commands::sort::run_sort(&ctx()?, partition, *by_name)
        }
        Commands::Check { partitions } => commands::check::run_check(&ctx()?, partitions),
        Commands::Rules { action } => match action {
            RulesAction::Show => commands::rules::run_rules_show(&ctx()?),
            RulesAction::Normalize { text } => commands::rules::run_rules_normalize(&ctx()?, text),
            RulesAction::Classify { plan, name } => {
                commands::rules::run_rules_classify(&ctx()?, plan, name)
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(cli.catalog_dir.clone(), cli.rules_dir.clone());
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetDir { dir, rules } => commands::config::run_config_set_dir(dir, *rules),
        },
    }
}
