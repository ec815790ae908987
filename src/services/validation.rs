use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::FieldErrors;
use crate::models::{Credentials, ProfileForm, SignUpForm};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Collects the first failure per field; later rules for an already failed field are skipped.
#[derive(Default)]
struct Rules {
    errors: FieldErrors,
}

impl Rules {
    fn check(&mut self, field: &'static str, ok: bool, message: &str) -> &mut Self {
        if !ok && !self.errors.contains_key(field) {
            self.errors.insert(field, message.to_string());
        }
        self
    }

    fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

fn check_email(rules: &mut Rules, email: &str) {
    rules
        .check("email", !email.is_empty(), "E-mail is required.")
        .check("email", is_valid_email(email), "Must be a valid e-mail.");
}

pub fn validate_sign_in(credentials: &Credentials) -> Result<(), FieldErrors> {
    let mut rules = Rules::default();
    check_email(&mut rules, &credentials.email);
    rules.check(
        "password",
        !credentials.password.is_empty(),
        "Password is required.",
    );
    rules.finish()
}

pub fn validate_sign_up(form: &SignUpForm) -> Result<(), FieldErrors> {
    let mut rules = Rules::default();
    rules.check("name", !form.name.trim().is_empty(), "Name is required");
    check_email(&mut rules, &form.email);
    rules.check(
        "password",
        form.password.chars().count() >= MIN_PASSWORD_LEN,
        "Password must be at least 6 characters.",
    );
    rules.finish()
}

pub fn validate_profile(form: &ProfileForm) -> Result<(), FieldErrors> {
    let mut rules = Rules::default();
    rules.check("name", !form.name.trim().is_empty(), "Name is required");
    check_email(&mut rules, &form.email);

    if form.wants_password_change() {
        rules
            .check("password", !form.password.is_empty(), "New password is required.")
            .check(
                "password",
                form.password.chars().count() >= MIN_PASSWORD_LEN,
                "Password must be at least 6 characters.",
            )
            .check(
                "password_confirmation",
                !form.password_confirmation.is_empty(),
                "Password confirmation is required.",
            );
    }

    // A confirmation that was typed must match even without a password change.
    rules.check(
        "password_confirmation",
        form.password_confirmation.is_empty() || form.password_confirmation == form.password,
        "Password confirmation does not match with password",
    );
    rules.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, email: &str, old: &str, new: &str, confirm: &str) -> ProfileForm {
        ProfileForm {
            name: name.to_string(),
            email: email.to_string(),
            old_password: old.to_string(),
            password: new.to_string(),
            password_confirmation: confirm.to_string(),
        }
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@barber.shop.io"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("ab.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_profile_name_required() {
        let errors = validate_profile(&profile("", "a@b.com", "", "", "")).unwrap_err();
        assert_eq!(errors.get("name").map(String::as_str), Some("Name is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_profile_email_messages() {
        let errors = validate_profile(&profile("Ana", "", "", "", "")).unwrap_err();
        assert_eq!(errors["email"], "E-mail is required.");

        let errors = validate_profile(&profile("Ana", "nope", "", "", "")).unwrap_err();
        assert_eq!(errors["email"], "Must be a valid e-mail.");
    }

    #[test]
    fn test_profile_short_new_password() {
        let errors = validate_profile(&profile("", "", "x", "abc", "abc")).unwrap_err();
        assert_eq!(errors["password"], "Password must be at least 6 characters.");
        assert!(!errors.contains_key("password_confirmation"));
    }

    #[test]
    fn test_profile_password_change_requires_new_password_and_confirmation() {
        let errors = validate_profile(&profile("Ana", "a@b.com", "old", "", "")).unwrap_err();
        assert_eq!(errors["password"], "New password is required.");
        assert_eq!(
            errors["password_confirmation"],
            "Password confirmation is required."
        );
    }

    #[test]
    fn test_profile_confirmation_mismatch() {
        let errors =
            validate_profile(&profile("Ana", "a@b.com", "old", "secret1", "secret2")).unwrap_err();
        assert_eq!(
            errors["password_confirmation"],
            "Password confirmation does not match with password"
        );
    }

    #[test]
    fn test_profile_without_password_change_is_valid() {
        assert!(validate_profile(&profile("Ana", "a@b.com", "", "", "")).is_ok());
        assert!(validate_profile(&profile("Ana", "a@b.com", "old", "secret1", "secret1")).is_ok());
    }

    #[test]
    fn test_sign_in_rules() {
        let errors = validate_sign_in(&Credentials {
            email: "bad".to_string(),
            password: String::new(),
        })
        .unwrap_err();
        assert_eq!(errors["email"], "Must be a valid e-mail.");
        assert_eq!(errors["password"], "Password is required.");

        assert!(validate_sign_in(&Credentials {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        })
        .is_ok());
    }

    #[test]
    fn test_sign_up_rules() {
        let errors = validate_sign_up(&SignUpForm {
            name: " ".to_string(),
            email: "a@b.com".to_string(),
            password: "12345".to_string(),
        })
        .unwrap_err();
        assert_eq!(errors["name"], "Name is required");
        assert_eq!(errors["password"], "Password must be at least 6 characters.");
        assert!(!errors.contains_key("email"));
    }
}
