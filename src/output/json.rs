//! JSON output renderer.
//!
//! Prints payloads as the backend shaped them, pretty-printed.

use crate::models::{AuthToken, User, UserList};
use crate::output::OutputRenderer;

/// JSON output renderer.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render_users(&self, users: &UserList) -> String {
        serde_json::to_string_pretty(users).unwrap_or_else(|_| "[]".to_string())
    }

    fn render_user(&self, user: &User) -> String {
        serde_json::to_string_pretty(user).unwrap_or_else(|_| "{}".to_string())
    }

    fn render_token(&self, token: &AuthToken) -> String {
        serde_json::to_string_pretty(token).unwrap_or_else(|_| "{}".to_string())
    }
}
