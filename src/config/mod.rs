//! Configuration loading and layering.
//!
//! Handles `.userctl.toml` loading, environment variable resolution,
//! and the defaults the CLI flags are merged over.

pub mod loader;

pub use loader::{ApiConfig, Config, ConfigError, ConfigLayer};
