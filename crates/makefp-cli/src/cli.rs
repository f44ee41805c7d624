use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "makefp - Converts MD snapshot coordinate tables into per-residue GAMESS MAKEFP inputs and an aggregate point-charge superfragment for EFP calculations.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Path to the reference coordinate table covering the whole system.
    /// Its file name must contain the run tag (a run of decimal digits).
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Path to the coordinate table covering the solvation shell.
    #[arg(value_name = "SHELL")]
    pub shell: PathBuf,

    /// Path to the charge-type table mapping type ids to partial charges.
    #[arg(value_name = "CHARGE_TYPES")]
    pub charge_types: PathBuf,

    /// Path to the ligand residue-name list, one name per line.
    #[arg(long, value_name = "PATH", default_value = "ligands")]
    pub ligand_names: PathBuf,

    /// Path to the excluded residue-name list, one name per line.
    #[arg(long, value_name = "PATH", default_value = "taas")]
    pub excluded_names: PathBuf,

    /// Path to an optional settings file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit fragments for ligand residues, overriding the settings file.
    #[arg(long)]
    pub with_ligands: bool,

    /// Emit the point-charge superfragment, overriding the settings file.
    #[arg(long)]
    pub with_superfragment: bool,

    /// Directory under which the per-run output directory is created.
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub output_root: PathBuf,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
