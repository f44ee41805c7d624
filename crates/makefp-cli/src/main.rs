mod cli;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::Result;
use clap::Parser;
use makefp::workflows::config::GenerateConfig;
use makefp::workflows::generate::{self, GenerateInputs};
use std::time::Instant;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, &cli.log_file)?;

    info!("🚀 makefp CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let mut config = match &cli.config {
        Some(path) => GenerateConfig::load(path)?,
        None => GenerateConfig::default(),
    };
    if cli.with_ligands {
        config.include_ligands = true;
    }
    if cli.with_superfragment {
        config.include_superfragment = true;
    }

    let inputs = GenerateInputs {
        reference_path: cli.reference,
        shell_path: cli.shell,
        charge_types_path: cli.charge_types,
        ligand_names_path: cli.ligand_names,
        excluded_names_path: cli.excluded_names,
        output_root: cli.output_root,
    };

    let start = Instant::now();
    match generate::run(&inputs, &config) {
        Ok(outcome) => {
            info!(
                "✅ Run {} completed in {:.2?}.",
                outcome.run_tag,
                start.elapsed()
            );
            println!(
                "✅ Wrote {} fragment file(s){} to '{}'.",
                outcome.fragment_files.len(),
                if outcome.superfragment_file.is_some() {
                    " and the superfragment"
                } else {
                    ""
                },
                outcome.output_dir.display()
            );
            if outcome.unmapped_atoms > 0 {
                println!(
                    "⚠️  {} atom(s) had no element mapping and were dropped.",
                    outcome.unmapped_atoms
                );
            }
            if outcome.unassigned_monopoles > 0 {
                println!(
                    "⚠️  {} superfragment site(s) carry no monopole.",
                    outcome.unassigned_monopoles
                );
            }
            Ok(())
        }
        Err(e) => {
            error!("❌ Run failed: {}", e);
            Err(e.into())
        }
    }
}
