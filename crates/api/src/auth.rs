// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actors and role gating.
//!
//! Authentication itself is an external collaborator: callers arrive with
//! an already-authenticated [`Actor`]. This module only decides whether a
//! given actor may perform a given operation.

use crate::error::ApiError;
use escala_domain::Matricula;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The two access levels of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access: week generation, convoys, alerts,
    /// holidays, reporting dashboards.
    Admin,
    /// A field officer: booking, own history, report submission as a
    /// convoy team leader.
    Officer,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Officer => "officer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "officer" => Ok(Self::Officer),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's registration number.
    pub matricula: Matricula,
    /// The actor's name.
    pub name: String,
    /// The actor's access level.
    pub role: Role,
}

impl Actor {
    /// Creates a new `Actor`.
    #[must_use]
    pub const fn new(matricula: Matricula, name: String, role: Role) -> Self {
        Self {
            matricula,
            name,
            role,
        }
    }

    /// Returns whether this actor holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Gates an operation on the admin role.
///
/// # Errors
///
/// Returns `ApiError::PermissionDenied` for non-admin actors.
pub fn require_admin(actor: &Actor, action: &str) -> Result<(), ApiError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ApiError::PermissionDenied {
            action: action.to_string(),
            required_role: Role::Admin.as_str().to_string(),
        })
    }
}
