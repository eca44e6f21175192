use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::StoreError;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserModel {
    pub id: Uuid,
    pub email: String,
    // Never exposed in serialized representations
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUserModel {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewUserModel {
    pub fn validate(&self) -> Result<(), StoreError> {
        validate_email(&self.email)?;
        if self.password_hash.is_empty() {
            return Err(StoreError::Validation(
                "password_hash must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shape check only: exactly one '@', non-empty local part, dotted domain.
/// Uniqueness is case-sensitive and enforced by the database.
pub fn validate_email(email: &str) -> Result<(), StoreError> {
    let ok = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if ok {
        Ok(())
    } else {
        Err(StoreError::Validation(format!("malformed email: {email:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("demo@example.com").is_ok());
        assert!(validate_email("john.investor+tag@sub.example.co").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "no-at-sign",
            "@example.com",
            "user@",
            "user@nodot",
            "user@@example.com",
            "user@.com",
            "user@example.com.",
            "user name@example.com",
        ] {
            assert!(validate_email(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn new_user_requires_a_password_hash() {
        let user = NewUserModel {
            email: "demo@example.com".to_string(),
            password_hash: String::new(),
            first_name: None,
            last_name: None,
        };
        assert!(matches!(user.validate(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = UserModel {
            id: Uuid::new_v4(),
            email: "demo@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            first_name: Some("Demo".to_string()),
            last_name: Some("User".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "demo@example.com");
    }
}
