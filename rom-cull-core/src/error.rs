/// Errors raised when a selection policy is malformed.
///
/// Policy problems are configuration problems: they surface before any
/// entry is processed, never mid-scan.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("country preference list is empty while unlisted countries are excluded")]
    EmptyCountryPreference,

    #[error("attribute rule conflict: \"{0}\" is both force-included and skipped")]
    ConflictingAttrRules(String),
}
