use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Weighted rule configuration for scoring entries.
///
/// Every option is independently toggleable; the defaults reproduce the
/// stock behavior (prefer USA, then World, then Europe; reward GameCube
/// re-editions and later revisions). All attribute rules are free-form,
/// case-insensitive substrings supplied at configuration time, not a
/// closed tag vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPolicy {
    /// Country rank order; earlier is better.
    pub country_preference: Vec<String>,
    /// Veto entries whose countries are all outside the preference list
    /// instead of scoring them zero.
    pub exclude_unlisted_countries: bool,
    /// Substrings marking a later-platform re-edition.
    pub re_edition_attrs: Vec<String>,
    /// Flat bonus for a re-edition match.
    pub re_edition_weight: f64,
    /// Per-occurrence bonus for version/revision tags. Escalates with
    /// each additional versioned entry in the same country-rank bucket
    /// of a group.
    pub version_weight: f64,
    /// Substrings that add a fixed bonus per matching tag token.
    pub force_include_attrs: Vec<String>,
    /// Bonus added once per force-include tag match.
    pub force_include_weight: f64,
    /// Substrings that veto an entry when any tag token matches.
    pub skip_attrs: Vec<String>,
    /// Substrings that veto an entry when its base name matches.
    pub skip_name_patterns: Vec<String>,
    /// Veto entries flagged as BIOS/system firmware.
    pub bios_excluded: bool,
    /// Restrict output to one manufacturer. Applied after selection,
    /// never during scoring; hierarchical catalogs only.
    pub manufacturer_filter: Option<String>,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            country_preference: vec![
                "USA".to_string(),
                "World".to_string(),
                "Europe".to_string(),
            ],
            exclude_unlisted_countries: false,
            re_edition_attrs: vec!["GameCube".to_string()],
            re_edition_weight: 1.0,
            version_weight: 0.1,
            force_include_attrs: Vec::new(),
            force_include_weight: 0.1,
            skip_attrs: Vec::new(),
            skip_name_patterns: Vec::new(),
            bios_excluded: false,
            manufacturer_filter: None,
        }
    }
}

impl SelectionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the policy for contradictions.
    ///
    /// Called by the selection engine before any entry is touched, so a
    /// bad configuration fails fast.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.exclude_unlisted_countries && self.country_preference.is_empty() {
            return Err(PolicyError::EmptyCountryPreference);
        }

        for forced in &self.force_include_attrs {
            if self
                .skip_attrs
                .iter()
                .any(|skip| skip.eq_ignore_ascii_case(forced))
            {
                return Err(PolicyError::ConflictingAttrRules(forced.clone()));
            }
        }

        Ok(())
    }

    pub fn with_country_preference<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.country_preference = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skip_attrs<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_attrs = attrs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skip_name_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_name_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_force_include_attrs<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.force_include_attrs = attrs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_unlisted(mut self, exclude: bool) -> Self {
        self.exclude_unlisted_countries = exclude;
        self
    }

    pub fn with_bios_excluded(mut self, excluded: bool) -> Self {
        self.bios_excluded = excluded;
        self
    }

    pub fn with_manufacturer_filter(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer_filter = Some(manufacturer.into());
        self
    }
}
