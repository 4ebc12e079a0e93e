use crate::name_parser::{parse_name, split_countries};

/// One catalog entry competing for selection.
///
/// Built from a raw display name via [`parse_entry`], plus whatever linkage
/// and flags the catalog source can supply (parent key, BIOS marker, an
/// index into the source's own backing store).
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Original identifier, unmodified.
    pub raw_name: String,
    /// Name with all tag groups stripped; the grouping key.
    pub base_name: String,
    /// Tag tokens in name order.
    pub tags: Vec<String>,
    /// Comma-split contents of the first tag group. Empty means the entry
    /// is malformed and must be reported, not scored.
    pub countries: Vec<String>,
    /// Name of the parent this entry is a variant of (hierarchical
    /// catalogs only).
    pub parent_key: Option<String>,
    /// Set when the catalog source flags this entry as BIOS/system
    /// firmware.
    pub bios: bool,
    /// Index into the catalog source's backing store, carried through
    /// untouched so projection can re-emit the original node.
    pub handle: Option<usize>,
}

impl Entry {
    /// Whether the entry carries a usable country list.
    pub fn is_valid(&self) -> bool {
        !self.countries.is_empty()
    }

    pub fn with_parent_key(mut self, parent: impl Into<String>) -> Self {
        self.parent_key = Some(parent.into());
        self
    }

    pub fn with_bios(mut self, bios: bool) -> Self {
        self.bios = bios;
        self
    }

    pub fn with_handle(mut self, handle: usize) -> Self {
        self.handle = Some(handle);
        self
    }
}

/// Parse a raw display name into an [`Entry`].
///
/// Fills `base_name`, `tags`, and `countries`; linkage fields start unset
/// and are added by the catalog source via the `with_*` builders. An entry
/// with no tag groups at all comes back with empty `countries` — callers
/// must treat it as invalid ([`Entry::is_valid`]) rather than score it.
pub fn parse_entry(raw_name: &str) -> Entry {
    let parsed = parse_name(raw_name);
    let countries = parsed
        .tags
        .first()
        .map(|first| split_countries(first))
        .unwrap_or_default();

    Entry {
        raw_name: raw_name.to_string(),
        base_name: parsed.base_name,
        tags: parsed.tags,
        countries,
        parent_key: None,
        bios: false,
        handle: None,
    }
}
