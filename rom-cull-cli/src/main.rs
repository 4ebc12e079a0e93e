//! rom-cull CLI
//!
//! Command-line interface for culling near-duplicate ROM catalogs down to
//! one release per title.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use rom_cull_core::SelectionPolicy;

mod commands;
mod config;
mod error;

use commands::dat::{DatOptions, run_dat};
use commands::pick::{PickOptions, run_pick};
use error::CliError;

#[derive(Parser)]
#[command(name = "rom-cull")]
#[command(about = "Pick one release per title from a ROM catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Scoring policy overrides shared by all commands. Values given here win
/// over the policy file.
#[derive(Args, Clone)]
struct PolicyArgs {
    /// Policy file (TOML); default: rom-cull/policy.toml in the user config dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Country preference order (e.g. USA,World,Europe)
    #[arg(long, value_delimiter = ',')]
    prefer: Option<Vec<String>>,

    /// Veto entries whose tags contain one of these substrings
    #[arg(long, value_delimiter = ',')]
    skip: Option<Vec<String>>,

    /// Veto entries whose base name contains one of these substrings
    #[arg(long = "skip-name", value_delimiter = ',')]
    skip_name: Option<Vec<String>>,

    /// Bonus for entries whose tags contain one of these substrings
    #[arg(long = "force-include", value_delimiter = ',')]
    force_include: Option<Vec<String>>,

    /// Veto entries whose countries are all outside the preference list
    #[arg(long)]
    exclude_unlisted: bool,

    /// Veto BIOS / system firmware entries
    #[arg(long)]
    exclude_bios: bool,
}

impl PolicyArgs {
    fn apply_to(&self, policy: &mut SelectionPolicy) {
        if let Some(ref prefer) = self.prefer {
            policy.country_preference = prefer.clone();
        }
        if let Some(ref skip) = self.skip {
            policy.skip_attrs = skip.clone();
        }
        if let Some(ref skip_name) = self.skip_name {
            policy.skip_name_patterns = skip_name.clone();
        }
        if let Some(ref force) = self.force_include {
            policy.force_include_attrs = force.clone();
        }
        if self.exclude_unlisted {
            policy.exclude_unlisted_countries = true;
        }
        if self.exclude_bios {
            policy.bios_excluded = true;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Select winners from a flat catalog (ROM directory or name list)
    Pick {
        /// Directory of ROM files, or a line-delimited list of names
        input: PathBuf,

        /// Write the winner list here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print per-candidate scores instead of writing output
        #[arg(short = 'n', long)]
        analyze: bool,

        /// Print every attribute token encountered
        #[arg(long)]
        list_attrs: bool,

        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Select winners from a hierarchical XML Dat file
    Dat {
        /// Logiqx XML Dat file with parent/clone links
        input: PathBuf,

        /// Write the filtered Dat here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print per-candidate scores instead of writing output
        #[arg(short = 'n', long)]
        analyze: bool,

        /// Print every attribute token encountered
        #[arg(long)]
        list_attrs: bool,

        /// Keep only games from this manufacturer (post-selection)
        #[arg(long)]
        manufacturer: Option<String>,

        #[command(flatten)]
        policy: PolicyArgs,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Pick {
            input,
            out,
            analyze,
            list_attrs,
            policy,
        } => load_policy_with(&policy).and_then(|resolved| {
            run_pick(
                &PickOptions {
                    input,
                    out,
                    analyze,
                    list_attrs,
                },
                &resolved,
            )
        }),
        Commands::Dat {
            input,
            out,
            analyze,
            list_attrs,
            manufacturer,
            policy,
        } => load_policy_with(&policy).and_then(|mut resolved| {
            if let Some(manufacturer) = manufacturer {
                resolved.manufacturer_filter = Some(manufacturer);
            }
            run_dat(
                &DatOptions {
                    input,
                    out,
                    analyze,
                    list_attrs,
                },
                &resolved,
            )
        }),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{} {}",
                "\u{2718}".if_supports_color(Stderr, |t| t.red()),
                e,
            );
            ExitCode::FAILURE
        }
    }
}

/// Resolve the effective policy: file (or defaults), then flag overrides.
fn load_policy_with(args: &PolicyArgs) -> Result<SelectionPolicy, CliError> {
    let mut policy = config::load_policy(args.config.as_deref())?;
    args.apply_to(&mut policy);
    Ok(policy)
}
