//! Terminal renderer: styled flowing text, one block per user.

use colored::Colorize;

use crate::models::{AuthToken, User, UserList};
use crate::output::OutputRenderer;

/// Terminal output renderer with colored, flowing text.
pub struct TerminalRenderer;

fn user_block(user: &User) -> String {
    let id = user
        .id
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "#?".to_string());
    let username = user.username.as_deref().unwrap_or("(no username)");

    let mut output = format!(" {} {}", id.dimmed(), username.bold());
    if let Some(ref authority) = user.authority {
        output.push_str(&format!("  {}", authority.cyan()));
    }
    output.push('\n');

    if let Some(name) = user.full_name() {
        output.push_str(&format!("   {}  {}\n", "name:".dimmed(), name));
    }
    if let Some(ref email) = user.email {
        output.push_str(&format!("   {} {}\n", "email:".dimmed(), email));
    }
    output
}

impl OutputRenderer for TerminalRenderer {
    fn render_users(&self, users: &UserList) -> String {
        let list = users.users();
        if list.is_empty() {
            return format!("{}", "  No users found.\n".yellow());
        }

        let mut output = String::new();
        for user in list {
            output.push_str(&user_block(user));
            output.push('\n');
        }

        output.push_str(&format!("{}\n", "───────────────────────────────────".dimmed()));
        let shown = list.len();
        match users.total() {
            Some(total) => output.push_str(&format!(
                " {} of {} {}\n",
                shown.to_string().bold(),
                total.to_string().bold(),
                if total == 1 { "user" } else { "users" },
            )),
            None => output.push_str(&format!(
                " {} {}\n",
                shown.to_string().bold(),
                if shown == 1 { "user" } else { "users" },
            )),
        }

        output
    }

    fn render_user(&self, user: &User) -> String {
        user_block(user)
    }

    fn render_token(&self, token: &AuthToken) -> String {
        // Unrecognised response shapes are shown whole.
        let value = match token.token() {
            Some(token) => token.to_string(),
            None => token.raw().to_string(),
        };
        format!(" {} {}\n", "✔ authenticated".green().bold(), value)
    }
}
