use rocket::serde::Serialize;

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Info => "info",
        }
    }

    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "success" => NotificationLevel::Success,
            _ => NotificationLevel::Info,
        }
    }
}

/// One-shot message shown on the page a redirect lands on.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: String) -> Self {
        Notification { level, message }
    }

    pub fn success(message: String) -> Self {
        Notification::new(NotificationLevel::Success, message)
    }
}
