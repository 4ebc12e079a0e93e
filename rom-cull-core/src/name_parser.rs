//! Parser for tagged release names.
//!
//! Catalog entries encode their metadata in parenthesized (and occasionally
//! bracketed) tag groups appended to the display name:
//! ```text
//! Game Name (USA, Europe) (Rev 1) (GameCube Edition) [b]
//! ```
//!
//! The first tag group carries the country list; later groups carry
//! revision, version, and special-edition markers. This parser splits a raw
//! name into the tag-free base name and the ordered tag sequence.

/// Parsed components of a tagged release name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Base name without any parenthetical or bracketed tags.
    pub base_name: String,
    /// Tag tokens in left-to-right order, parens/brackets stripped.
    pub tags: Vec<String>,
}

/// Split a raw name into the base name and its ordered tag tokens.
///
/// Every maximal parenthesized span is one tag group, read left to right.
/// Bracketed spans are carried as tag tokens too so that skip rules can
/// match dump-status flags like `[b]`.
///
/// # Examples
///
/// ```
/// use rom_cull_core::name_parser::parse_name;
///
/// let parsed = parse_name("Super Mario Bros. (USA)");
/// assert_eq!(parsed.base_name, "Super Mario Bros.");
/// assert_eq!(parsed.tags, vec!["USA"]);
///
/// let parsed = parse_name("Game (USA, Europe) (Rev 1)");
/// assert_eq!(parsed.tags, vec!["USA, Europe", "Rev 1"]);
/// ```
pub fn parse_name(raw: &str) -> ParsedName {
    let mut tags = Vec::new();
    let mut base_end = None;
    let mut chars = raw.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        let (open, close) = match ch {
            '(' => ('(', ')'),
            '[' => ('[', ']'),
            _ => continue,
        };

        if base_end.is_none() {
            base_end = Some(i);
        }

        let mut depth = 1u32;
        let start = i + open.len_utf8();
        let mut end = start;

        for (j, c) in chars.by_ref() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    end = j;
                    break;
                }
            }
        }

        let content = raw[start..end].trim();
        if !content.is_empty() {
            tags.push(content.to_string());
        }
    }

    let base_name = match base_end {
        Some(pos) => raw[..pos].trim_end().to_string(),
        None => raw.trim().to_string(),
    };

    ParsedName { base_name, tags }
}

/// Split a country tag group into its individual country names.
///
/// The first tag group of an entry is a comma-separated country list
/// (`"USA, Europe"`). Empty parts are dropped.
pub fn split_countries(tag: &str) -> Vec<String> {
    tag.split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}

/// Whether a tag token marks a revision or version.
///
/// Matches a `Rev` or `v` prefix, case-insensitively (`"Rev 1"`, `"Rev A"`,
/// `"v1.2"`).
pub fn is_version_tag(tag: &str) -> bool {
    let t = tag.trim();
    let rev = t.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("rev"));
    rev || t.starts_with('v') || t.starts_with('V')
}
