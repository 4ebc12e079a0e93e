use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use rom_cull_core::{GroupTrace, SelectionResult};

/// Format a score with up to three decimals, trailing zeros trimmed.
pub(crate) fn format_score(value: f64) -> String {
    let s = format!("{value:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Print the per-group analysis trace: one `<score> <marker><name>` line
/// per candidate, `*` marking the winner, one blank line per group.
pub(crate) fn print_trace(trace: &[GroupTrace]) {
    for group in trace {
        for candidate in &group.candidates {
            let marker = if candidate.winner { "*" } else { "" };
            println!(
                "{} {}{}",
                format_score(candidate.score),
                marker,
                candidate.name,
            );
        }
        println!();
    }
}

/// List entries that carried no extractable tag group.
pub(crate) fn print_invalid(invalid: &[String]) {
    for name in invalid {
        eprintln!(
            "{} missing region tag: {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            name,
        );
    }
}

/// Print the run summary in processed/invalid/vetoed/selected order.
pub(crate) fn print_summary(result: &SelectionResult) {
    println!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    println!("  {} entries processed", result.processed);
    if result.invalid_count() > 0 {
        println!(
            "  {} {} invalid (no region tag)",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            result.invalid_count(),
        );
    }
    if result.vetoed_count > 0 {
        println!(
            "  {} {} vetoed",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            result.vetoed_count,
        );
    }
    println!(
        "  {} {} selected",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        result.selected_count(),
    );
}

/// Print every attribute token encountered during the run, sorted.
pub(crate) fn print_attribute_index(result: &SelectionResult) {
    println!(
        "{}",
        "Attributes encountered:".if_supports_color(Stdout, |t| t.bold()),
    );
    for attr in &result.attribute_index {
        println!("  {attr}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_formatting_trims_noise() {
        assert_eq!(format_score(3.0), "3");
        assert_eq!(format_score(3.1), "3.1");
        assert_eq!(format_score(-1.0), "-1");
        assert_eq!(format_score(0.1 * 3.0), "0.3");
    }
}
