use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_cull_core::{GroupingStrategy, SelectionPolicy, parse_entry, run_selection};

use crate::commands::report;
use crate::error::CliError;

pub(crate) struct PickOptions {
    pub input: PathBuf,
    pub out: Option<PathBuf>,
    pub analyze: bool,
    pub list_attrs: bool,
}

/// Select one release per title from a flat catalog: a directory of ROM
/// files or a line-delimited list of names.
pub(crate) fn run_pick(opts: &PickOptions, policy: &SelectionPolicy) -> Result<(), CliError> {
    let names = collect_names(&opts.input)?;
    log::info!("{} candidate names from {}", names.len(), opts.input.display());

    let entries = names.iter().map(|name| parse_entry(name)).collect();
    let result = run_selection(
        entries,
        GroupingStrategy::SequentialPrefix,
        policy,
        opts.analyze,
    )?;

    report::print_invalid(&result.invalid);

    if let Some(ref trace) = result.trace {
        report::print_trace(trace);
    } else {
        match opts.out {
            Some(ref path) => {
                write_winner_list(path, &result)?;
                println!(
                    "{} {} winners written to {}",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    result.selected_count(),
                    path.display(),
                );
            }
            None => {
                for winner in &result.winners {
                    println!("{}", winner.raw_name);
                }
            }
        }
    }

    if opts.list_attrs {
        report::print_attribute_index(&result);
    }
    report::print_summary(&result);

    Ok(())
}

/// Gather candidate names from the input path, sorted by name as the
/// sequential grouper requires. Directories contribute file stems; plain
/// files contribute one name per non-empty line.
fn collect_names(input: &Path) -> Result<Vec<String>, CliError> {
    let mut names = Vec::new();

    if input.is_dir() {
        for entry in fs::read_dir(input)?.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
    } else {
        let text = fs::read_to_string(input)?;
        names.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }

    names.sort();
    Ok(names)
}

fn write_winner_list(
    path: &Path,
    result: &rom_cull_core::SelectionResult,
) -> Result<(), CliError> {
    let mut file = fs::File::create(path)?;
    for winner in &result.winners {
        writeln!(file, "{}", winner.raw_name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_from_list_file() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("games.txt");
        fs::write(&list, "Game (USA)\n\n  Game (Europe)  \n").unwrap();

        let names = collect_names(&list).unwrap();
        assert_eq!(names, vec!["Game (Europe)", "Game (USA)"]);
    }

    #[test]
    fn names_from_directory_use_file_stems() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Game (USA).sfc"), b"").unwrap();
        fs::write(dir.path().join("Game (Europe).sfc"), b"").unwrap();

        let names = collect_names(dir.path()).unwrap();
        assert_eq!(names, vec!["Game (Europe)", "Game (USA)"]);
    }
}
