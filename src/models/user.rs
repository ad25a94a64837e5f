use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::permissions;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Analyst,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Analyst => "analyst",
        }
    }

    /// Capabilities granted to a freshly registered account of this role.
    #[must_use]
    pub fn default_permissions(self) -> Vec<String> {
        let set = match self {
            Self::Admin => permissions::ADMIN,
            Self::Analyst => permissions::ANALYST,
        };
        set.iter().map(|p| (*p).to_string()).collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "analyst" => Ok(Self::Analyst),
            other => Err(format!("Unknown role '{other}'. Expected admin or analyst")),
        }
    }
}

/// Stored account record. `password_hash` never leaves the store layer
/// through any response type.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: String,
    pub permissions: Vec<String>,
}

impl User {
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Canonical key for the user map: trimmed and lowercased.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Structural check only: a non-empty local part, one `@`, and a dotted
/// domain without empty labels.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
