//! End-to-end selection scenarios over flat catalogs.

use rom_cull_core::{GroupingStrategy, SelectionPolicy, parse_entry, run_selection};

fn select(names: &[&str], policy: &SelectionPolicy) -> Vec<String> {
    let entries = names.iter().map(|n| parse_entry(n)).collect();
    let result =
        run_selection(entries, GroupingStrategy::SequentialPrefix, policy, false).unwrap();
    result.winners.into_iter().map(|e| e.raw_name).collect()
}

#[test]
fn regional_release_prefers_usa() {
    let winners = select(&["Game (USA)", "Game (Europe)"], &SelectionPolicy::default());
    assert_eq!(winners, vec!["Game (USA)"]);
}

#[test]
fn later_revision_beats_base_release() {
    let winners = select(
        &["Game (USA)", "Game (USA) (Rev 1)"],
        &SelectionPolicy::default(),
    );
    assert_eq!(winners, vec!["Game (USA) (Rev 1)"]);
}

#[test]
fn skip_attr_empties_a_group() {
    let policy = SelectionPolicy::new().with_skip_attrs(["Beta"]);
    let entries = vec![parse_entry("Game (USA) (Beta)")];
    let result =
        run_selection(entries, GroupingStrategy::SequentialPrefix, &policy, false).unwrap();
    assert!(result.winners.is_empty());
    assert_eq!(result.vetoed_count, 1);
}

#[test]
fn whole_catalog_one_winner_per_title() {
    let policy = SelectionPolicy::default();
    let winners = select(
        &[
            "Alpha Strike (Europe)",
            "Alpha Strike (USA)",
            "Alpha Strike (USA) (Rev 1)",
            "Battle Nine (Japan)",
            "Battle Nine (World)",
            "Cosmic Run (Europe) (Beta)",
            "Cosmic Run (Europe) (Rev 2)",
        ],
        &policy,
    );
    assert_eq!(
        winners,
        vec![
            "Alpha Strike (USA) (Rev 1)",
            "Battle Nine (World)",
            "Cosmic Run (Europe) (Rev 2)",
        ]
    );
}

#[test]
fn unlisted_exclusion_drops_import_only_titles() {
    let policy = SelectionPolicy::new().with_exclude_unlisted(true);
    let entries = vec![
        parse_entry("Import Only (Japan)"),
        parse_entry("Worldwide (World)"),
    ];
    let result =
        run_selection(entries, GroupingStrategy::SequentialPrefix, &policy, false).unwrap();
    let names: Vec<_> = result.winners.iter().map(|e| e.raw_name.as_str()).collect();
    assert_eq!(names, vec!["Worldwide (World)"]);
    assert_eq!(result.vetoed_count, 1);
}

#[test]
fn counts_separate_processed_invalid_vetoed_selected() {
    let policy = SelectionPolicy::new().with_skip_attrs(["Proto"]);
    let entries = vec![
        parse_entry("Good Game (USA)"),
        parse_entry("Leaked Build (USA) (Proto)"),
        parse_entry("Broken Name"),
    ];
    let result =
        run_selection(entries, GroupingStrategy::SequentialPrefix, &policy, false).unwrap();

    assert_eq!(result.processed, 3);
    assert_eq!(result.invalid_count(), 1);
    assert_eq!(result.vetoed_count, 1);
    assert_eq!(result.selected_count(), 1);
}

#[test]
fn analysis_trace_lines_match_candidates() {
    let entries = vec![
        parse_entry("Game (Europe)"),
        parse_entry("Game (USA)"),
        parse_entry("Game (USA) (Rev 1)"),
    ];
    let result = run_selection(
        entries,
        GroupingStrategy::SequentialPrefix,
        &SelectionPolicy::default(),
        true,
    )
    .unwrap();

    let trace = result.trace.unwrap();
    assert_eq!(trace.len(), 1);
    assert_eq!(trace[0].candidates.len(), 3);
    let winners: Vec<_> = trace[0]
        .candidates
        .iter()
        .filter(|c| c.winner)
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(winners, vec!["Game (USA) (Rev 1)"]);
}
