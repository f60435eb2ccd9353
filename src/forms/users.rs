use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::forms::sanitize_inline_text;

const NAME_MAX_LEN: u64 = 100;
const EMAIL_MAX_LEN: u64 = 100;
const PASSWORD_MIN_LEN: u64 = 8;
const PASSWORD_MAX_LEN: u64 = 128;

/// Result type returned by the user form helpers.
pub type UserFormResult<T> = Result<T, UserFormError>;

#[derive(Debug, Error)]
pub enum UserFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("user name cannot be empty")]
    EmptyName,
}

/// Account details once validated; the password is still in clear text and
/// must be hashed before it reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /v1/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(email, length(max = EMAIL_MAX_LEN))]
    pub email: String,
    #[validate(length(min = PASSWORD_MIN_LEN, max = PASSWORD_MAX_LEN))]
    pub password: String,
}

impl RegisterUserForm {
    pub fn into_registration(mut self) -> UserFormResult<Registration> {
        self.email = self.email.trim().to_lowercase();
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(UserFormError::EmptyName);
        }

        Ok(Registration {
            name,
            email: self.email,
            password: self.password,
        })
    }
}

/// Body of `PUT /v1/users/me`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditUserForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[validate(email, length(max = EMAIL_MAX_LEN))]
    pub email: Option<String>,
    #[validate(length(min = PASSWORD_MIN_LEN, max = PASSWORD_MAX_LEN))]
    pub password: Option<String>,
}

/// Sanitized profile changes; `password` is still in clear text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl EditUserForm {
    pub fn into_profile_changes(mut self) -> UserFormResult<ProfileChanges> {
        self.email = self.email.map(|email| email.trim().to_lowercase());
        self.validate()?;

        let name = match self.name {
            Some(name) => {
                let name = sanitize_inline_text(&name);
                if name.is_empty() {
                    return Err(UserFormError::EmptyName);
                }
                Some(name)
            }
            None => None,
        };

        Ok(ProfileChanges {
            name,
            email: self.email,
            password: self.password,
        })
    }
}

/// Body of `POST /v1/session`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    /// Trim and lower-case the email, then validate.
    pub fn into_credentials(mut self) -> UserFormResult<Self> {
        self.email = self.email.trim().to_lowercase();
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_form_normalizes_fields() {
        let form = RegisterUserForm {
            name: "  Maria   Silva ".to_string(),
            email: "Maria@Example.com".to_string(),
            password: "s3cret-pass".to_string(),
        };

        let registration = form.into_registration().expect("expected success");

        assert_eq!(registration.name, "Maria Silva");
        assert_eq!(registration.email, "maria@example.com");
        assert_eq!(registration.password, "s3cret-pass");
    }

    #[test]
    fn surrounding_whitespace_in_email_is_accepted() {
        let registration = RegisterUserForm {
            name: "Maria".to_string(),
            email: "  Maria@Example.com \n".to_string(),
            password: "s3cret-pass".to_string(),
        }
        .into_registration()
        .expect("expected success");
        assert_eq!(registration.email, "maria@example.com");

        let changes = EditUserForm {
            email: Some(" new@example.com ".to_string()),
            ..Default::default()
        }
        .into_profile_changes()
        .expect("expected success");
        assert_eq!(changes.email.as_deref(), Some("new@example.com"));

        let login = LoginForm {
            email: " MARIA@example.com ".to_string(),
            password: "s3cret-pass".to_string(),
        }
        .into_credentials()
        .expect("expected success");
        assert_eq!(login.email, "maria@example.com");
    }

    #[test]
    fn register_form_rejects_short_password() {
        let form = RegisterUserForm {
            name: "Maria".to_string(),
            email: "maria@example.com".to_string(),
            password: "short".to_string(),
        };

        assert!(matches!(
            form.into_registration(),
            Err(UserFormError::Validation(_))
        ));
    }

    #[test]
    fn register_form_rejects_invalid_email() {
        let form = RegisterUserForm {
            name: "Maria".to_string(),
            email: "maria.example.com".to_string(),
            password: "s3cret-pass".to_string(),
        };

        assert!(matches!(
            form.into_registration(),
            Err(UserFormError::Validation(_))
        ));
    }

    #[test]
    fn edit_form_rejects_blank_name() {
        let form = EditUserForm {
            name: Some(" \n ".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            form.into_profile_changes(),
            Err(UserFormError::EmptyName)
        ));
    }

    #[test]
    fn empty_edit_form_changes_nothing() {
        let changes = EditUserForm::default()
            .into_profile_changes()
            .expect("expected success");

        assert_eq!(changes, ProfileChanges::default());
    }
}
