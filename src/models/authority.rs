//! User roles and their wire identifiers.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Closed set of roles a user can hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter)]
pub enum Authority {
    /// Standard role, assigned whenever a requested role is not recognised.
    #[default]
    Employee,
    Manager,
    Admin,
    /// Account exists but may not sign in.
    Locked,
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authority::Employee => write!(f, "EMPLOYEE"),
            Authority::Manager => write!(f, "MANAGER"),
            Authority::Admin => write!(f, "ADMIN"),
            Authority::Locked => write!(f, "LOCKED"),
        }
    }
}

impl std::str::FromStr for Authority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EMPLOYEE" => Ok(Authority::Employee),
            "MANAGER" => Ok(Authority::Manager),
            "ADMIN" => Ok(Authority::Admin),
            "LOCKED" => Ok(Authority::Locked),
            other => Err(format!(
                "unknown authority: '{other}'. Supported: EMPLOYEE, MANAGER, ADMIN, LOCKED"
            )),
        }
    }
}

/// Wire identifier the backend uses for each [`Authority`].
///
/// Loaded from configuration and handed to the client at construction,
/// so deployments whose backend spells roles differently (e.g.
/// `ROLE_ADMIN`) only need a config change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoritySet {
    pub employee: String,
    pub manager: String,
    pub admin: String,
    pub locked: String,
}

impl Default for AuthoritySet {
    fn default() -> Self {
        Self {
            employee: Authority::Employee.to_string(),
            manager: Authority::Manager.to_string(),
            admin: Authority::Admin.to_string(),
            locked: Authority::Locked.to_string(),
        }
    }
}

impl AuthoritySet {
    /// The wire identifier for `authority`.
    pub fn identifier(&self, authority: Authority) -> &str {
        match authority {
            Authority::Employee => &self.employee,
            Authority::Manager => &self.manager,
            Authority::Admin => &self.admin,
            Authority::Locked => &self.locked,
        }
    }

    /// Classify a requested identifier.
    ///
    /// Matching is exact. Anything that is not the identifier of a
    /// non-default role falls back to [`Authority::Employee`].
    pub fn classify(&self, requested: &str) -> Authority {
        Authority::iter()
            .filter(|a| *a != Authority::Employee)
            .find(|a| self.identifier(*a) == requested)
            .unwrap_or_default()
    }

    /// The identifier to send for a requested authority.
    pub fn resolve(&self, requested: &str) -> &str {
        self.identifier(self.classify(requested))
    }

    /// Apply a JSON object of `ROLE -> identifier` overrides, as found in
    /// the `API_AUTHORITY` environment variable.
    ///
    /// Roles missing from the object keep their current identifier.
    pub fn with_json_overrides(&self, json: &str) -> Result<Self, String> {
        let map: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| format!("expected a JSON object of strings: {e}"))?;

        let mut set = self.clone();
        for (role, identifier) in map {
            if identifier.trim().is_empty() {
                return Err(format!("empty identifier for role '{role}'"));
            }
            match role.parse::<Authority>()? {
                Authority::Employee => set.employee = identifier,
                Authority::Manager => set.manager = identifier,
                Authority::Admin => set.admin = identifier,
                Authority::Locked => set.locked = identifier,
            }
        }
        Ok(set)
    }
}
