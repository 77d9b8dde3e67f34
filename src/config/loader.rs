//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags (applied by the binary)
//! 2. Environment variables
//! 3. `.userctl.toml` in the working directory
//! 4. `~/.config/userctl/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, ENV_API_AUTHORITY, ENV_API_AUTHORITY_FALLBACK,
    ENV_API_URL, ENV_API_URL_FALLBACK, ENV_TIMEOUT,
};
use crate::env::Env;
use crate::models::AuthoritySet;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config file {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub authority: AuthoritySet,
}

/// Where and how to reach the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// One config file as written. Only keys present in the file are `Some`,
/// so a file can set a value back to its built-in default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub api: ApiLayer,
    pub authority: AuthorityLayer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiLayer {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthorityLayer {
    pub employee: Option<String>,
    pub manager: Option<String>,
    pub admin: Option<String>,
    pub locked: Option<String>,
}

impl ConfigLayer {
    /// Reject values the environment layer would also refuse.
    fn validate(&self) -> Result<(), String> {
        if self.api.timeout_secs == Some(0) {
            return Err("api.timeout_secs must be at least 1".into());
        }
        let roles = [
            ("employee", &self.authority.employee),
            ("manager", &self.authority.manager),
            ("admin", &self.authority.admin),
            ("locked", &self.authority.locked),
        ];
        for (role, identifier) in roles {
            if identifier.as_deref().is_some_and(|id| id.trim().is_empty()) {
                return Err(format!("authority.{role} must not be empty"));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then `.userctl.toml` under `work_dir`,
    /// then applies environment variable overrides.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: local config
        if let Some(dir) = work_dir {
            let local_path = dir.join(crate::constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load and validate a single config file.
    pub fn load_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        layer.validate().map_err(|message| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(layer)
    }

    /// Get the global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge a file layer into this config. Keys set in the layer win.
    fn merge(&mut self, layer: ConfigLayer) {
        if let Some(url) = layer.api.base_url {
            self.api.base_url = url;
        }
        if let Some(secs) = layer.api.timeout_secs {
            self.api.timeout_secs = secs;
        }

        // Roles are merged one at a time so a local file can rename a
        // single identifier without restating the rest.
        if let Some(id) = layer.authority.employee {
            self.authority.employee = id;
        }
        if let Some(id) = layer.authority.manager {
            self.authority.manager = id;
        }
        if let Some(id) = layer.authority.admin {
            self.authority.admin = id;
        }
        if let Some(id) = layer.authority.locked {
            self.authority.locked = id;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(url) = env.first_non_empty(&[ENV_API_URL, ENV_API_URL_FALLBACK]) {
            self.api.base_url = url.trim().to_string();
        }

        if let Some(json) = env.first_non_empty(&[ENV_API_AUTHORITY, ENV_API_AUTHORITY_FALLBACK]) {
            match self.authority.with_json_overrides(&json) {
                Ok(set) => self.authority = set,
                Err(e) => warn!("ignoring invalid {ENV_API_AUTHORITY} value: {e}"),
            }
        }

        if let Ok(val) = env.var(ENV_TIMEOUT) {
            match val.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.api.timeout_secs = secs,
                _ => warn!("ignoring invalid {ENV_TIMEOUT} value: {val}"),
            }
        }
    }

    /// Render as TOML, for `userctl config`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> Env {
        Env::mock(Vec::<(&str, &str)>::new())
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.authority, AuthoritySet::default());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[api]
base_url = "https://users.example.com/api"
timeout_secs = 5

[authority]
admin = "ROLE_ADMIN"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://users.example.com/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.authority.admin, "ROLE_ADMIN");
        assert_eq!(config.authority.employee, "EMPLOYEE");
    }

    fn layer(toml_str: &str) -> ConfigLayer {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn merge_overrides_set_values() {
        let mut base = Config::default();
        base.merge(layer(
            r#"
[api]
base_url = "https://other"
timeout_secs = 3

[authority]
locked = "ROLE_LOCKED"
"#,
        ));

        assert_eq!(base.api.base_url, "https://other");
        assert_eq!(base.api.timeout_secs, 3);
        assert_eq!(base.authority.locked, "ROLE_LOCKED");
        assert_eq!(base.authority.admin, "ADMIN");
    }

    #[test]
    fn merge_keeps_base_when_layer_is_empty() {
        let mut base = Config::default();
        base.api.base_url = "https://base".into();
        base.authority.manager = "ROLE_MANAGER".into();

        base.merge(ConfigLayer::default());

        assert_eq!(base.api.base_url, "https://base");
        assert_eq!(base.authority.manager, "ROLE_MANAGER");
    }

    #[test]
    fn merge_can_restore_default_values() {
        let mut base = Config::default();
        base.merge(layer(
            r#"
[api]
base_url = "https://global.example.com"
timeout_secs = 5

[authority]
admin = "ROLE_ADMIN"
"#,
        ));
        base.merge(layer(
            r#"
[api]
base_url = "http://localhost:8080"
timeout_secs = 30

[authority]
admin = "ADMIN"
"#,
        ));

        assert_eq!(base, Config::default());
    }

    #[test]
    fn load_file_rejects_empty_authority() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.toml");
        std::fs::write(&path, "[authority]\nmanager = \"  \"\n").unwrap();

        let err = Config::load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert!(err.to_string().contains("authority.manager"), "got: {err}");
    }

    #[test]
    fn load_file_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 0\n").unwrap();

        let err = Config::load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn invalid_local_file_fails_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".userctl.toml"), "[authority]\nadmin = \"\"\n").unwrap();

        assert!(Config::load(Some(dir.path()), &no_env()).is_err());
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{ toml").unwrap();

        let result = Config::load_file(&path);
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn load_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_file(&dir.path().join("missing.toml"));
        assert!(result.unwrap_err().to_string().contains("read"));
    }

    #[test]
    fn load_from_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".userctl.toml"),
            r#"
[api]
base_url = "https://local.example.com"
"#,
        )
        .unwrap();

        let config = Config::load(Some(dir.path()), &no_env()).unwrap();
        assert_eq!(config.api.base_url, "https://local.example.com");
    }

    #[test]
    fn env_overrides_local_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".userctl.toml"),
            "[api]\nbase_url = \"https://local.example.com\"\n",
        )
        .unwrap();
        let env = Env::mock([("API_URL", "https://env.example.com")]);

        let config = Config::load(Some(dir.path()), &env).unwrap();
        assert_eq!(config.api.base_url, "https://env.example.com");
    }

    #[test]
    fn prefixed_env_wins_over_fallback() {
        let env = Env::mock([
            ("USERCTL_API_URL", "https://prefixed"),
            ("API_URL", "https://fallback"),
        ]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.api.base_url, "https://prefixed");
    }

    #[test]
    fn authority_env_applies_json_overrides() {
        let env = Env::mock([(
            "API_AUTHORITY",
            r#"{"EMPLOYEE": "ROLE_USER", "ADMIN": "ROLE_ADMIN"}"#,
        )]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.authority.employee, "ROLE_USER");
        assert_eq!(config.authority.admin, "ROLE_ADMIN");
        assert_eq!(config.authority.manager, "MANAGER");
    }

    #[test]
    fn invalid_authority_env_is_ignored() {
        let env = Env::mock([("USERCTL_API_AUTHORITY", "not json")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.authority, AuthoritySet::default());
    }

    #[test]
    fn timeout_env_parsing() {
        let mut config = Config::default();
        config.apply_env_vars(&Env::mock([("USERCTL_TIMEOUT", "12")]));
        assert_eq!(config.api.timeout_secs, 12);

        config.apply_env_vars(&Env::mock([("USERCTL_TIMEOUT", "soon")]));
        assert_eq!(config.api.timeout_secs, 12);

        config.apply_env_vars(&Env::mock([("USERCTL_TIMEOUT", "0")]));
        assert_eq!(config.api.timeout_secs, 12);
    }

    #[test]
    fn to_toml_round_trips_through_parser() {
        let mut config = Config::default();
        config.authority.admin = "ROLE_ADMIN".into();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[authority]"));
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
