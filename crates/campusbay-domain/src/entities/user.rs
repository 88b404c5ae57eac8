//! User entity.

use crate::Email;
use campusbay_core::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered marketplace member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Login address, unique across users.
    pub email: Email,

    /// Hashed password (never exposed via API).
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Free-text college name.
    pub college: Option<String>,

    /// Whether the address belongs to the configured college domain.
    pub verified: bool,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user, deriving the verified flag from the college domain.
    #[must_use]
    pub fn register(
        name: String,
        email: Email,
        password_hash: String,
        college: Option<String>,
        college_domain: &str,
    ) -> Self {
        let now = Utc::now();
        let verified = email.belongs_to(college_domain);
        Self {
            id: UserId::new(),
            name: name.trim().to_string(),
            email,
            password_hash,
            college: college
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            verified,
            created_at: now,
            updated_at: now,
        }
    }
}
