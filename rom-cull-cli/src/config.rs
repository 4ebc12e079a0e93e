use std::fs;
use std::path::{Path, PathBuf};

use rom_cull_core::SelectionPolicy;

use crate::error::CliError;

/// Default policy file location: `<config dir>/rom-cull/policy.toml`.
pub(crate) fn default_policy_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rom-cull").join("policy.toml"))
}

/// Load the selection policy from a TOML file.
///
/// With an explicit path the file must exist and parse. Without one, the
/// default location is used when present, otherwise the stock policy.
/// Validation happens later, inside the selection run.
pub(crate) fn load_policy(explicit: Option<&Path>) -> Result<SelectionPolicy, CliError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_policy_path().filter(|p| p.exists()),
    };

    match path {
        Some(path) => {
            log::debug!("loading policy from {}", path.display());
            let text = fs::read_to_string(&path)?;
            toml::from_str(&text)
                .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))
        }
        None => Ok(SelectionPolicy::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_policy_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
country_preference = ["Japan", "USA"]
skip_attrs = ["Beta", "Proto"]
exclude_unlisted_countries = true
"#
        )
        .unwrap();

        let policy = load_policy(Some(file.path())).unwrap();
        assert_eq!(policy.country_preference, vec!["Japan", "USA"]);
        assert_eq!(policy.skip_attrs, vec!["Beta", "Proto"]);
        assert!(policy.exclude_unlisted_countries);
        // Unset fields keep their defaults.
        assert_eq!(policy.version_weight, 0.1);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_policy(Some(Path::new("/nonexistent/policy.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "country_preference = 12").unwrap();

        let result = load_policy(Some(file.path()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
