use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_cull_core::{GroupingStrategy, SelectionPolicy, run_selection};
use rom_cull_dat::{parse_dat_file, players_variant, project_catalog, write_dat};

use crate::commands::report;
use crate::error::CliError;

pub(crate) struct DatOptions {
    pub input: PathBuf,
    pub out: Option<PathBuf>,
    pub analyze: bool,
    pub list_attrs: bool,
}

/// Select one release per parent/clone group from a hierarchical Dat
/// catalog and write the filtered document.
pub(crate) fn run_dat(opts: &DatOptions, policy: &SelectionPolicy) -> Result<(), CliError> {
    let dat = parse_dat_file(&opts.input)?;
    log::info!(
        "{}: {} games in \"{}\"",
        opts.input.display(),
        dat.games.len(),
        dat.header.name,
    );

    let entries = dat.to_entries();
    let result = run_selection(entries, GroupingStrategy::ExplicitLink, policy, opts.analyze)?;

    report::print_invalid(&result.invalid);

    if let Some(ref trace) = result.trace {
        report::print_trace(trace);
    } else {
        let projected = project_catalog(
            &dat,
            &result.winners,
            players_variant,
            policy.manufacturer_filter.as_deref(),
        );

        match opts.out {
            Some(ref path) => {
                let file = fs::File::create(path)?;
                write_dat(&projected, io::BufWriter::new(file))?;
                println!(
                    "{} {} games written to {}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    projected.games.len(),
                    path.display(),
                );
            }
            None => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                write_dat(&projected, &mut lock)?;
                writeln!(lock)?;
            }
        }
    }

    if opts.list_attrs {
        report::print_attribute_index(&result);
    }
    report::print_summary(&result);

    Ok(())
}
