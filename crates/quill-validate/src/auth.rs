//! Login and registration form checks.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ErrorMap;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

static PERSON_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("Invalid person name regex"));

/// Minimum password length for both forms.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Fields of the authentication forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl AuthField {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

fn check_email(email: &str, errors: &mut ErrorMap<AuthField>) {
    let email = email.trim();
    if email.is_empty() {
        errors.insert(AuthField::Email, "Email is required");
    } else if !EMAIL_SHAPE.is_match(email) {
        errors.insert(AuthField::Email, "Please enter a valid email");
    }
}

fn check_password(password: &str, errors: &mut ErrorMap<AuthField>) {
    if password.trim().is_empty() {
        errors.insert(AuthField::Password, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            AuthField::Password,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
}

pub fn validate_login(form: &LoginForm) -> ErrorMap<AuthField> {
    let mut errors = ErrorMap::new();
    check_email(&form.email, &mut errors);
    check_password(&form.password, &mut errors);
    errors
}

pub fn validate_register(form: &RegisterForm) -> ErrorMap<AuthField> {
    let mut errors = ErrorMap::new();

    let name = form.name.trim();
    let name_len = name.chars().count();
    if name.is_empty() {
        errors.insert(AuthField::Name, "Name is required");
    } else if !(2..=50).contains(&name_len) {
        errors.insert(AuthField::Name, "Name must be between 2 and 50 characters");
    } else if !PERSON_NAME.is_match(name) {
        errors.insert(AuthField::Name, "Name can only contain letters and spaces");
    }

    check_email(&form.email, &mut errors);
    check_password(&form.password, &mut errors);

    if form.confirm_password.trim().is_empty() {
        errors.insert(AuthField::ConfirmPassword, "Please confirm your password");
    } else if form.password != form.confirm_password {
        errors.insert(AuthField::ConfirmPassword, "Passwords do not match");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: "engine1".into(),
            confirm_password: "engine1".into(),
        }
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = validate_login(&LoginForm::default());
        assert_eq!(errors.get(AuthField::Email), Some("Email is required"));
        assert_eq!(errors.get(AuthField::Password), Some("Password is required"));
    }

    #[test]
    fn login_checks_email_shape_and_password_length() {
        let errors = validate_login(&LoginForm {
            email: "not-an-email".into(),
            password: "12345".into(),
        });
        assert_eq!(errors.get(AuthField::Email), Some("Please enter a valid email"));
        assert_eq!(
            errors.get(AuthField::Password),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn email_padding_is_ignored() {
        let form = LoginForm {
            email: "  demo@example.com \t".into(),
            password: "demo123".into(),
        };
        assert!(validate_login(&form).is_empty());
    }

    #[test]
    fn valid_registration_passes() {
        assert!(validate_register(&register_form()).is_empty());
    }

    #[test]
    fn registration_rejects_digits_in_name() {
        let form = RegisterForm {
            name: "R2D2".into(),
            ..register_form()
        };
        assert_eq!(
            validate_register(&form).get(AuthField::Name),
            Some("Name can only contain letters and spaces")
        );
    }

    #[test]
    fn registration_requires_matching_confirmation() {
        let form = RegisterForm {
            confirm_password: "engine2".into(),
            ..register_form()
        };
        assert_eq!(
            validate_register(&form).get(AuthField::ConfirmPassword),
            Some("Passwords do not match")
        );

        let form = RegisterForm {
            confirm_password: String::new(),
            ..register_form()
        };
        assert_eq!(
            validate_register(&form).get(AuthField::ConfirmPassword),
            Some("Please confirm your password")
        );
    }
}
