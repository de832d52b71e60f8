//! The identity behind an administrative request.

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Role granted to an actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    /// Full access, including deletion of singleton documents.
    Admin,
    /// May create and edit content.
    #[default]
    Editor,
}

/// A signed-in actor. Anonymous requests carry no actor at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Display name.
    pub name: String,
    /// Granted role.
    pub role: ActorRole,
}

impl Actor {
    /// Create a new actor.
    #[must_use]
    pub fn new(name: impl Into<String>, role: ActorRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// Whether the actor holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }

    /// Fail with [`AppError::Forbidden`] unless the actor is an admin.
    pub fn require_admin(&self, action: &str) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("Only admins can {action}")))
        }
    }
}
