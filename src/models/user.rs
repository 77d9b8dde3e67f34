//! User payloads: what we send to the backend and what it sends back.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields for creating a user.
///
/// The profile trio (`first_name`, `last_name`, `authority`) is only sent
/// when all three are present and non-empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Requested role identifier; unrecognised values become the default role.
    pub authority: Option<String>,
}

impl NewUser {
    /// A user with only the required fields.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Attach the optional profile fields.
    pub fn with_profile(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        authority: impl Into<String>,
    ) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self.authority = Some(authority.into());
        self
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("authority", &self.authority)
            .finish()
    }
}

/// Username and password for `POST /users/authenticate`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// A user as returned by the backend.
///
/// Every known field is optional so that differently shaped backends still
/// decode; fields we do not model are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// "First Last", when either name is known.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// A page of users as returned by a paging backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub content: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `GET /users`: either a bare array or a page object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserList {
    Plain(Vec<User>),
    Page(UserPage),
}

impl UserList {
    pub fn users(&self) -> &[User] {
        match self {
            UserList::Plain(users) => users,
            UserList::Page(page) => &page.content,
        }
    }

    /// Total number of users on the server, when the backend reports it.
    pub fn total(&self) -> Option<u64> {
        match self {
            UserList::Plain(_) => None,
            UserList::Page(page) => page.total_elements,
        }
    }
}

/// Keys that commonly carry the token in an authentication response.
const TOKEN_KEYS: [&str; 4] = ["token", "jwt", "accessToken", "access_token"];

/// Response of a successful authentication.
///
/// The body is kept exactly as the backend sent it. The token itself
/// (usually a JWT) is opaque to this crate; [`AuthToken::token`] finds it
/// in a bare JSON string or under one of the usual keys.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken {
    raw: Value,
}

impl AuthToken {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// The token string, when the response has a recognised shape.
    pub fn token(&self) -> Option<&str> {
        match &self.raw {
            Value::String(token) => Some(token),
            Value::Object(map) => TOKEN_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str)),
            _ => None,
        }
    }

    /// The response body as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field(
                "token",
                &self.token().map(|token| format!("[{} chars]", token.len())),
            )
            .finish_non_exhaustive()
    }
}
