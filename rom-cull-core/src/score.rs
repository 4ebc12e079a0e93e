use std::collections::HashMap;

use crate::entry::Entry;
use crate::name_parser::is_version_tag;
use crate::policy::SelectionPolicy;

/// Sentinel score of a vetoed entry. Absolute: no bonus can lift it.
pub const VETO_SCORE: f64 = -1.0;

/// Per-group scoring state.
///
/// Carries the running version counter, keyed by country-rank bucket, that
/// makes repeated revisions in the same bucket escalate. Scoped to one
/// group's evaluation; the engine creates a fresh context per group and
/// discards it afterward — reuse across groups would corrupt the version
/// bonus for unrelated groups.
#[derive(Debug, Default)]
pub struct GroupContext {
    versions_seen: HashMap<usize, u32>,
}

impl GroupContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the version counter for a rank bucket and return the new
    /// count.
    fn bump_versions(&mut self, bucket: usize) -> u32 {
        let count = self.versions_seen.entry(bucket).or_insert(0);
        *count += 1;
        *count
    }
}

/// Outcome of scoring one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub value: f64,
    pub vetoed: bool,
}

/// Case-insensitive substring containment.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_any_ci(token: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| contains_ci(token, p))
}

/// Score one entry against the policy inside its group.
///
/// Steps run in a fixed order: country score, re-edition bonus, version
/// bonus, force-include bonus, then the veto checks. A veto overrides any
/// accumulated bonus and pins the score to [`VETO_SCORE`].
pub fn score_entry(entry: &Entry, ctx: &mut GroupContext, policy: &SelectionPolicy) -> Score {
    let mut value = 0.0;
    let mut vetoed = false;

    // 1. Country score: best (lowest) rank among the entry's countries.
    let rank = entry
        .countries
        .iter()
        .filter_map(|country| {
            policy
                .country_preference
                .iter()
                .position(|preferred| preferred.eq_ignore_ascii_case(country))
        })
        .min();

    match rank {
        Some(r) => value += (policy.country_preference.len() - r) as f64,
        None if policy.exclude_unlisted_countries => vetoed = true,
        None => {}
    }

    // Unranked entries share the bucket past the end of the preference list.
    let bucket = rank.unwrap_or(policy.country_preference.len());

    // 2. Re-edition bonus.
    if entry
        .tags
        .iter()
        .any(|tag| matches_any_ci(tag, &policy.re_edition_attrs))
    {
        value += policy.re_edition_weight;
    }

    // 3. Version bonus: bump the bucket counter first so repeated
    //    revisions escalate instead of all getting the same increment.
    if entry.tags.iter().any(|tag| is_version_tag(tag)) {
        let occurrence = ctx.bump_versions(bucket);
        value += policy.version_weight * f64::from(occurrence);
    }

    // 4. Force-include bonus, once per matching tag token, uncapped.
    for tag in &entry.tags {
        if matches_any_ci(tag, &policy.force_include_attrs) {
            value += policy.force_include_weight;
        }
    }

    // 5. Veto checks, each unconditional.
    if entry
        .tags
        .iter()
        .any(|tag| matches_any_ci(tag, &policy.skip_attrs))
    {
        vetoed = true;
    }
    if matches_any_ci(&entry.base_name, &policy.skip_name_patterns) {
        vetoed = true;
    }
    if policy.bios_excluded && entry.bios {
        vetoed = true;
    }

    if vetoed {
        Score {
            value: VETO_SCORE,
            vetoed: true,
        }
    } else {
        Score {
            value,
            vetoed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::parse_entry;

    fn score_one(name: &str, policy: &SelectionPolicy) -> Score {
        let mut ctx = GroupContext::new();
        score_entry(&parse_entry(name), &mut ctx, policy)
    }

    #[test]
    fn country_rank_contribution() {
        let policy = SelectionPolicy::default();
        assert_eq!(score_one("Game (USA)", &policy).value, 3.0);
        assert_eq!(score_one("Game (World)", &policy).value, 2.0);
        assert_eq!(score_one("Game (Europe)", &policy).value, 1.0);
        assert_eq!(score_one("Game (Japan)", &policy).value, 0.0);
    }

    #[test]
    fn best_rank_wins_among_countries() {
        let policy = SelectionPolicy::default();
        // Europe alone is 1; USA in the same list lifts it to 3.
        assert_eq!(score_one("Game (Europe, USA)", &policy).value, 3.0);
    }

    #[test]
    fn country_match_is_case_insensitive() {
        let policy = SelectionPolicy::default();
        assert_eq!(score_one("Game (usa)", &policy).value, 3.0);
    }

    #[test]
    fn unlisted_country_scores_zero_by_default() {
        let policy = SelectionPolicy::default();
        let s = score_one("Game (Japan)", &policy);
        assert_eq!(s.value, 0.0);
        assert!(!s.vetoed);
    }

    #[test]
    fn unlisted_country_vetoed_when_excluded() {
        let policy = SelectionPolicy::new().with_exclude_unlisted(true);
        let s = score_one("Game (Japan)", &policy);
        assert_eq!(s.value, VETO_SCORE);
        assert!(s.vetoed);
    }

    #[test]
    fn re_edition_bonus_applies() {
        let policy = SelectionPolicy::default();
        assert_eq!(score_one("Game (USA) (GameCube Edition)", &policy).value, 4.0);
    }

    #[test]
    fn version_bonus_escalates_within_bucket() {
        let policy = SelectionPolicy::default();
        let mut ctx = GroupContext::new();

        let first = score_entry(&parse_entry("Game (USA) (Rev 1)"), &mut ctx, &policy);
        let second = score_entry(&parse_entry("Game (USA) (Rev 2)"), &mut ctx, &policy);
        let third = score_entry(&parse_entry("Game (USA) (Rev 3)"), &mut ctx, &policy);

        assert!((first.value - 3.1).abs() < 1e-9);
        assert!((second.value - 3.2).abs() < 1e-9);
        assert!((third.value - 3.3).abs() < 1e-9);
    }

    #[test]
    fn version_buckets_are_per_rank() {
        let policy = SelectionPolicy::default();
        let mut ctx = GroupContext::new();

        let usa = score_entry(&parse_entry("Game (USA) (Rev 1)"), &mut ctx, &policy);
        // Different rank bucket: counter starts over.
        let eur = score_entry(&parse_entry("Game (Europe) (Rev 1)"), &mut ctx, &policy);

        assert!((usa.value - 3.1).abs() < 1e-9);
        assert!((eur.value - 1.1).abs() < 1e-9);
    }

    #[test]
    fn force_include_bonus_per_matching_token() {
        let policy = SelectionPolicy::new().with_force_include_attrs(["Edition"]);
        let s = score_one("Game (USA) (Special Edition) (Collector Edition)", &policy);
        assert!((s.value - 3.2).abs() < 1e-9);
    }

    #[test]
    fn skip_attr_veto_overrides_bonuses() {
        let policy = SelectionPolicy::new().with_skip_attrs(["Beta"]);
        let s = score_one("Game (USA) (GameCube Edition) (Beta)", &policy);
        assert_eq!(s.value, VETO_SCORE);
        assert!(s.vetoed);
    }

    #[test]
    fn skip_name_pattern_vetoes() {
        let policy = SelectionPolicy::new().with_skip_name_patterns(["demo disc"]);
        let s = score_one("Demo Disc 12 (USA)", &policy);
        assert!(s.vetoed);
    }

    #[test]
    fn bios_veto_only_when_excluded() {
        let entry = parse_entry("Console BIOS (World)").with_bios(true);
        let lax = SelectionPolicy::default();
        let strict = SelectionPolicy::new().with_bios_excluded(true);

        let mut ctx = GroupContext::new();
        assert!(!score_entry(&entry, &mut ctx, &lax).vetoed);

        let mut ctx = GroupContext::new();
        assert!(score_entry(&entry, &mut ctx, &strict).vetoed);
    }
}
