//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and API defaults so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "userctl";

/// Crate version, as reported by `userctl version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple (exported by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// `User-Agent` header sent with every API request.
pub const USER_AGENT: &str = concat!("userctl/", env!("CARGO_PKG_VERSION"));

/// Local config filename (e.g. `.userctl.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".userctl.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "userctl";

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── API paths ───────────────────────────────────────────────────────

pub const USERS_PATH: &str = "/users";
pub const AUTHENTICATE_PATH: &str = "/users/authenticate";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_API_URL: &str = "USERCTL_API_URL";
pub const ENV_API_AUTHORITY: &str = "USERCTL_API_AUTHORITY";
pub const ENV_TIMEOUT: &str = "USERCTL_TIMEOUT";
pub const ENV_PASSWORD: &str = "USERCTL_PASSWORD";

/// Unprefixed names shared with the web front end's environment.
pub const ENV_API_URL_FALLBACK: &str = "API_URL";
pub const ENV_API_AUTHORITY_FALLBACK: &str = "API_AUTHORITY";
