//! # Form input and validation
//!
//! Each form is a plain struct deserialised from an urlencoded body. Missing
//! fields default to empty strings so that an incomplete submission becomes a
//! validation error instead of a rejected request. `validate` is a pure function
//! of the input: it returns either the cleaned fields or a [`FieldErrors`] map
//! keyed by field name.
//!
//! | Form | Validated as | Rules |
//! |------|--------------|-------|
//! | [`RegisterForm`] | [`NewAccount`] | every field required, `email` must be a valid address |
//! | [`LoginForm`] | [`Credentials`] | `username`, `password` required |
//! | [`FeedbackForm`] | [`FeedbackFields`] | `title`, `content` required |
//!
//! Values are trimmed before the required check, except passwords which are
//! kept exactly as typed.

use std::collections::BTreeMap;

use feedback_store::Feedback;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_EMAIL: &str = "Must be Valid Email";

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Messages for `field`, empty when it is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn required(errors: &mut FieldErrors, field: &'static str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
    value.to_string()
}

fn required_secret(errors: &mut FieldErrors, field: &'static str, value: &str) -> String {
    if value.is_empty() {
        errors.add(field, REQUIRED);
    }
    value.to_string()
}

/// Registration form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// A registration that passed validation. `password` is still plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<NewAccount, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = required(&mut errors, "username", &self.username);
        let password = required_secret(&mut errors, "password", &self.password);
        let email = self.email.trim().to_string();
        if !email.validate_email() {
            errors.add("email", INVALID_EMAIL);
        }
        let first_name = required(&mut errors, "first_name", &self.first_name);
        let last_name = required(&mut errors, "last_name", &self.last_name);
        errors.into_result(|| NewAccount {
            username,
            password,
            email,
            first_name,
            last_name,
        })
    }

    /// Copy of the form safe to send back to the browser.
    pub fn without_password(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}

/// Login form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = required(&mut errors, "username", &self.username);
        let password = required_secret(&mut errors, "password", &self.password);
        errors.into_result(|| Credentials { username, password })
    }

    pub fn without_password(&self) -> Self {
        Self {
            username: self.username.clone(),
            password: String::new(),
        }
    }
}

/// Feedback add/edit form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackForm {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackFields {
    pub title: String,
    pub content: String,
}

impl FeedbackForm {
    pub fn validate(&self) -> Result<FeedbackFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = required(&mut errors, "title", &self.title);
        let content = required(&mut errors, "content", &self.content);
        errors.into_result(|| FeedbackFields { title, content })
    }
}

impl From<&Feedback> for FeedbackForm {
    fn from(feedback: &Feedback) -> Self {
        Self {
            title: feedback.title.clone(),
            content: feedback.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> RegisterForm {
        RegisterForm {
            username: "alice".into(),
            password: "pw1".into(),
            email: "a@x.com".into(),
            first_name: "A".into(),
            last_name: "A".into(),
        }
    }

    #[test]
    fn test_register_form_accepts_complete_input() {
        let account = alice().validate().unwrap();
        assert_eq!(account.username, "alice");
        assert_eq!(account.password, "pw1");
        assert_eq!(account.email, "a@x.com");
    }

    #[test]
    fn test_register_form_reports_every_missing_field() {
        let errors = RegisterForm::default().validate().unwrap_err();
        for field in ["username", "password", "first_name", "last_name"] {
            assert_eq!(errors.get(field), [REQUIRED.to_string()], "{field}");
        }
        assert_eq!(errors.get("email"), [INVALID_EMAIL.to_string()]);
    }

    #[test]
    fn test_register_form_rejects_malformed_email() {
        let form = RegisterForm {
            email: "not-an-email".into(),
            ..alice()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), [INVALID_EMAIL.to_string()]);
        assert!(errors.get("username").is_empty());
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let form = RegisterForm {
            username: "   ".into(),
            ..alice()
        };
        assert_eq!(
            form.validate().unwrap_err().get("username"),
            [REQUIRED.to_string()]
        );
    }

    #[test]
    fn test_passwords_are_not_trimmed_or_echoed() {
        let form = RegisterForm {
            password: " spaced ".into(),
            ..alice()
        };
        assert_eq!(form.validate().unwrap().password, " spaced ");
        assert!(form.without_password().password.is_empty());
        assert_eq!(form.without_password().username, "alice");
    }

    #[test]
    fn test_login_form() {
        let creds = LoginForm {
            username: " alice ".into(),
            password: "pw1".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(creds.username, "alice");

        let errors = LoginForm::default().validate().unwrap_err();
        assert!(!errors.get("username").is_empty());
        assert!(!errors.get("password").is_empty());
    }

    #[test]
    fn test_feedback_form() {
        let fields = FeedbackForm {
            title: "T".into(),
            content: "C".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(fields.title, "T");
        assert_eq!(fields.content, "C");

        let errors = FeedbackForm {
            title: "T".into(),
            content: String::new(),
        }
        .validate()
        .unwrap_err();
        assert!(errors.get("title").is_empty());
        assert_eq!(errors.get("content"), [REQUIRED.to_string()]);
    }
}
