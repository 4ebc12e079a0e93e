use std::collections::BTreeSet;

use crate::entry::Entry;
use crate::error::PolicyError;
use crate::group::{Group, GroupingStrategy, group_entries};
use crate::policy::SelectionPolicy;
use crate::score::{GroupContext, score_entry};

/// One candidate's line in the analysis trace.
#[derive(Debug, Clone)]
pub struct CandidateTrace {
    pub name: String,
    pub score: f64,
    pub vetoed: bool,
    /// Set only on the candidate that was recorded as the group's winner.
    pub winner: bool,
}

/// Per-group trace of scores and the marked winner.
#[derive(Debug, Clone)]
pub struct GroupTrace {
    pub key: String,
    pub candidates: Vec<CandidateTrace>,
}

/// Result of one selection run over a catalog.
#[derive(Debug)]
pub struct SelectionResult {
    /// One winner per group that produced one, in group-discovery order.
    pub winners: Vec<Entry>,
    /// Total entries fed into the run, valid or not.
    pub processed: usize,
    /// Raw names of entries with no extractable tag group. Reported,
    /// excluded from scoring, still counted in `processed`.
    pub invalid: Vec<String>,
    /// Candidates whose score hit the veto sentinel.
    pub vetoed_count: usize,
    /// Every tag token seen across every candidate, vetoed ones included.
    pub attribute_index: BTreeSet<String>,
    /// Per-group score trace, present when analysis mode was requested.
    pub trace: Option<Vec<GroupTrace>>,
}

impl SelectionResult {
    pub fn selected_count(&self) -> usize {
        self.winners.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }
}

/// Run grouping and scoring across a whole catalog and pick one winner per
/// group.
///
/// The policy is validated up front so a malformed configuration fails
/// before any entry is processed. Within a group the tie-break is
/// last-max-wins: a candidate whose score equals the running maximum
/// displaces the earlier one. A group where every candidate is vetoed
/// contributes no winner.
pub fn run_selection(
    entries: Vec<Entry>,
    strategy: GroupingStrategy,
    policy: &SelectionPolicy,
    analyze: bool,
) -> Result<SelectionResult, PolicyError> {
    policy.validate()?;

    let processed = entries.len();
    let mut invalid = Vec::new();

    let valid: Vec<Entry> = entries
        .into_iter()
        .filter_map(|entry| {
            if entry.is_valid() {
                Some(entry)
            } else {
                invalid.push(entry.raw_name);
                None
            }
        })
        .collect();

    let groups = group_entries(valid, strategy);
    log::debug!("{} groups from {} entries", groups.len(), processed);

    let mut winners = Vec::new();
    let mut vetoed_count = 0usize;
    let mut attribute_index = BTreeSet::new();
    let mut traces = analyze.then(Vec::new);

    for group in &groups {
        let (winner, group_trace) =
            select_in_group(group, policy, &mut attribute_index, &mut vetoed_count);

        if let Some(entry) = winner {
            winners.push(entry);
        }
        if let Some(traces) = traces.as_mut() {
            traces.push(group_trace);
        }
    }

    Ok(SelectionResult {
        winners,
        processed,
        invalid,
        vetoed_count,
        attribute_index,
        trace: traces,
    })
}

/// Score one group's candidates and resolve its winner.
fn select_in_group(
    group: &Group,
    policy: &SelectionPolicy,
    attribute_index: &mut BTreeSet<String>,
    vetoed_count: &mut usize,
) -> (Option<Entry>, GroupTrace) {
    // Fresh context per group: version counters must never leak between
    // groups.
    let mut ctx = GroupContext::new();
    let mut best: Option<(usize, f64)> = None;
    let mut lines = Vec::with_capacity(group.candidates.len());

    for (i, entry) in group.candidates.iter().enumerate() {
        for tag in &entry.tags {
            attribute_index.insert(tag.clone());
        }

        let score = score_entry(entry, &mut ctx, policy);
        if score.vetoed {
            *vetoed_count += 1;
        }

        // Last-max-wins: >= lets a later candidate displace an equal one.
        match best {
            Some((_, top)) if score.value >= top => best = Some((i, score.value)),
            None => best = Some((i, score.value)),
            _ => {}
        }

        lines.push(CandidateTrace {
            name: entry.raw_name.clone(),
            score: score.value,
            vetoed: score.vetoed,
            winner: false,
        });
    }

    let winner = best.and_then(|(i, top)| {
        if top >= 0.0 {
            lines[i].winner = true;
            Some(group.candidates[i].clone())
        } else {
            None
        }
    });

    (
        winner,
        GroupTrace {
            key: group.key.clone(),
            candidates: lines,
        },
    )
}
