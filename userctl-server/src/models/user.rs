//! User record and the validated inputs used to create and change it

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// User record as stored in the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
}

/// Validated email address.
///
/// Only presence is checked here; uniqueness is enforced by the schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create an email, rejecting blank input.
    ///
    /// # Example
    /// ```
    /// use userctl_server::models::Email;
    ///
    /// assert!(Email::new("ada@example.com").is_ok());
    /// assert!(Email::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Input for inserting a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: Email,
    pub name: Option<String>,
}

impl NewUser {
    /// Build from raw request fields. `email` must be present and non-blank.
    pub fn new(email: Option<&str>, name: Option<String>) -> Result<Self, ValidationError> {
        let email = email.ok_or(ValidationError::Missing { field: "email" })?;

        Ok(Self {
            email: Email::new(email)?,
            name,
        })
    }
}

/// Partial update for a user. `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub email: Option<Email>,
    pub name: Option<String>,
}

impl UserChanges {
    /// Build from raw request fields. A supplied `email` must be non-blank.
    pub fn new(email: Option<&str>, name: Option<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            email: email.map(Email::new).transpose()?,
            name,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none()
    }

    /// Apply to an existing record, keeping fields that weren't supplied.
    pub fn apply_to(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email.into_string();
        }
        if let Some(name) = self.name {
            user.name = Some(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_requires_email() {
        let err = NewUser::new(None, Some("Ada".into())).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "email" });
    }

    #[test]
    fn new_user_rejects_blank_email() {
        let err = NewUser::new(Some(""), None).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));

        let err = NewUser::new(Some("  \t"), None).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn new_user_name_is_optional() {
        let user = NewUser::new(Some("ada@example.com"), None).unwrap();
        assert_eq!(user.email.as_str(), "ada@example.com");
        assert!(user.name.is_none());
    }

    #[test]
    fn changes_reject_blank_email() {
        let err = UserChanges::new(Some(""), None).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "email" }));
    }

    #[test]
    fn changes_keep_unset_fields() {
        let mut user = User {
            id: 7,
            email: "ada@example.com".into(),
            name: Some("Ada".into()),
        };

        let changes = UserChanges::new(None, Some("Ada Lovelace".into())).unwrap();
        assert!(!changes.is_empty());
        changes.apply_to(&mut user);

        assert_eq!(user.id, 7);
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn empty_changes() {
        assert!(UserChanges::default().is_empty());
    }

    #[test]
    fn user_serializes_null_name() {
        let user = User {
            id: 1,
            email: "x@example.com".into(),
            name: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert!(json["name"].is_null());
    }
}
