use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    /// Initial shown in place of a missing avatar.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub old_password: String,
    pub password: String,
    pub password_confirmation: String,
}

impl ProfileForm {
    /// Form prefilled from the current user, password fields blank.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            ..Self::default()
        }
    }

    pub fn wants_password_change(&self) -> bool {
        !self.old_password.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

impl From<&ProfileForm> for ProfileUpdate {
    fn from(form: &ProfileForm) -> Self {
        let change = form.wants_password_change();
        let keep = |s: &str| change.then(|| s.to_string());
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            old_password: keep(&form.old_password),
            password: keep(&form.password),
            password_confirmation: keep(&form.password_confirmation),
        }
    }
}

/// Image payload for `PATCH users/avatar`.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    pub fn jpeg(user_id: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("{user_id}.jpg"),
            mime: "image/jpeg".to_string(),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(old: &str) -> ProfileForm {
        ProfileForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            old_password: old.to_string(),
            password: "secret1".to_string(),
            password_confirmation: "secret1".to_string(),
        }
    }

    #[test]
    fn test_update_omits_passwords_without_old_password() {
        let update = ProfileUpdate::from(&form(""));
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Ana", "email": "ana@example.com"}));
    }

    #[test]
    fn test_update_includes_passwords_with_old_password() {
        let update = ProfileUpdate::from(&form("old"));
        assert_eq!(update.old_password.as_deref(), Some("old"));
        assert_eq!(update.password.as_deref(), Some("secret1"));
        assert_eq!(update.password_confirmation.as_deref(), Some("secret1"));
    }

    #[test]
    fn test_user_without_avatar_deserializes() {
        let user: User =
            serde_json::from_str(r#"{"id":"1","name":"bob","email":"b@x.io"}"#).unwrap();
        assert_eq!(user.avatar_url, None);
        assert_eq!(user.initial(), Some('B'));
    }
}
