use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{check_optional_text, check_text};
use crate::utils::error::AppError;

const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Organizer,
    #[default]
    Client,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

fn check_email(email: &str) -> Result<(), AppError> {
    check_text("email", email, EMAIL_MAX)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::ValidationError(format!(
            "'{}' is not a valid email address",
            email
        ))),
    }
}

impl NewUser {
    pub fn validate(&self) -> Result<(), AppError> {
        check_text("name", &self.name, NAME_MAX)?;
        check_email(&self.email)
    }
}

impl UpdateUser {
    pub fn validate(&self) -> Result<(), AppError> {
        check_optional_text("name", self.name.as_deref(), NAME_MAX)?;
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_client() {
        let user: NewUser =
            serde_json::from_str(r#"{"name":"Ana","email":"ana@example.com"}"#).unwrap();
        assert_eq!(user.role, UserRole::Client);
        assert!(user.validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_email() {
        let user = NewUser {
            name: "Ana".into(),
            email: "ana.example.com".into(),
            role: UserRole::Organizer,
        };
        assert!(matches!(user.validate(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Organizer).unwrap(),
            "\"organizer\""
        );
    }
}
