//! Output renderers: terminal and JSON.

pub mod json;
pub mod terminal;

use crate::models::{AuthToken, User, UserList};

/// Trait for rendering API results to an output format.
pub trait OutputRenderer {
    /// Render a user listing.
    fn render_users(&self, users: &UserList) -> String;

    /// Render a single user.
    fn render_user(&self, user: &User) -> String;

    /// Render an authentication token.
    fn render_token(&self, token: &AuthToken) -> String;
}
