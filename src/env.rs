//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests use [`Env::mock()`] backed by a `HashMap`, so config layering can
//! be exercised without touching the process environment.

use std::collections::HashMap;

/// Environment variable reader.
#[derive(Clone, Debug)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    #[cfg(test)]
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.overrides {
            Some(map) => map.get(name).cloned().ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// Look up the first of `names` that is set to a non-blank value.
    ///
    /// Blank values are skipped so an exported-but-empty `USERCTL_API_URL`
    /// does not mask a usable `API_URL`.
    pub fn first_non_empty(&self, names: &[&str]) -> Option<String> {
        names
            .iter()
            .filter_map(|name| self.var(name).ok())
            .find(|value| !value.trim().is_empty())
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        let env = Env::real();
        assert!(env.var("CARGO_MANIFEST_DIR").is_ok());
    }

    #[test]
    fn mock_env_returns_not_present_for_missing() {
        let env = Env::mock(Vec::<(&str, &str)>::new());
        assert!(env.var("USERCTL_API_URL").is_err());
    }

    #[test]
    fn first_non_empty_prefers_earlier_names() {
        let env = Env::mock([
            ("USERCTL_API_URL", "http://primary"),
            ("API_URL", "http://fallback"),
        ]);
        assert_eq!(
            env.first_non_empty(&["USERCTL_API_URL", "API_URL"]),
            Some("http://primary".to_string())
        );
    }

    #[test]
    fn first_non_empty_skips_blank_values() {
        let env = Env::mock([("USERCTL_API_URL", "  "), ("API_URL", "http://fallback")]);
        assert_eq!(
            env.first_non_empty(&["USERCTL_API_URL", "API_URL"]),
            Some("http://fallback".to_string())
        );
    }

    #[test]
    fn first_non_empty_none_when_unset() {
        let env = Env::mock([("OTHER", "x")]);
        assert_eq!(env.first_non_empty(&["USERCTL_API_URL", "API_URL"]), None);
    }
}
