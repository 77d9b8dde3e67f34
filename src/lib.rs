//! userctl — client for a user-management REST API (library crate).
//!
//! Re-exports public modules for the CLI, integration tests, and
//! external use.

pub mod client;
pub mod config;
pub mod constants;
pub mod env;
pub mod models;
pub mod output;

pub use client::{ClientError, UserClient};
