//! User identity and roles

use serde::{Deserialize, Serialize};

/// Organizational role driving the access-control gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Executive,
    PracticeManager,
    PracticePrincipal,
    PracticeMember,
    /// Any other authenticated user
    #[serde(other)]
    Staff,
}

/// A user. Email is the identity key throughout the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Organizational tags; compared to board practices after
    /// normalization (lowercase, whitespace removed)
    #[serde(default)]
    pub practices: Vec<String>,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role,
            practices: Vec::new(),
        }
    }

    pub fn with_practices(mut self, practices: Vec<String>) -> Self {
        self.practices = practices;
        self
    }
}
