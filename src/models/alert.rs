use serde::Serialize;

/// User-visible notice, shown the way a modal alert would be.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn { user_id: String },
    Updated { user_id: String },
    SignedOut,
    Expired,
}
