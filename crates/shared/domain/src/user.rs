//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_FIRST_NAME_REQUIRED, ERR_ID_REQUIRED, ERR_LAST_NAME_REQUIRED};
use crate::error::{DomainError, DomainResult};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Unique user identifier (UUID v4 string)
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Creation timestamp, drives the default list ordering (newest first)
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a user that has not been persisted yet.
///
/// The store assigns the identifier and timestamps on insert.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl NewUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: Option<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            phone,
        }
    }

    /// Check required fields. The first name is checked before the last name.
    pub fn validate(&self) -> DomainResult<()> {
        if self.first_name.is_empty() {
            return Err(DomainError::validation(ERR_FIRST_NAME_REQUIRED));
        }
        if self.last_name.is_empty() {
            return Err(DomainError::validation(ERR_LAST_NAME_REQUIRED));
        }
        Ok(())
    }
}

/// Partial update of a user.
///
/// `None` means "absent": the stored column is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserPatch {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserPatch {
    /// Create an empty patch for the given user
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    /// The identifier must be non-blank after trimming whitespace.
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::validation(ERR_ID_REQUIRED));
        }
        Ok(())
    }

    /// Whether at least one field is present
    pub fn has_changes(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.email.is_some()
            || self.phone.is_some()
    }
}

/// Substring filters for listing users.
///
/// Matching is case-insensitive "contains". Empty strings are stored as
/// `None`, meaning no constraint on that field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserFilters {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserFilters {
    pub fn new(first_name: Option<String>, last_name: Option<String>) -> Self {
        Self {
            first_name: first_name.filter(|v| !v.is_empty()),
            last_name: last_name.filter(|v| !v.is_empty()),
        }
    }
}
