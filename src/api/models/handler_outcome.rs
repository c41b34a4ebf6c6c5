use serde_json::Value;
use crate::api::models::Notification;

/// What a handler wants sent back: a page to render or a redirect to follow.
#[derive(Clone, Debug, PartialEq)]
pub enum HandlerOutcome {
    Render(View),
    Redirect(Redirection),
}

#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub template: &'static str,
    pub context: Value,
}

impl View {
    pub fn new(template: &'static str, context: Value) -> Self {
        View { template, context }
    }

    pub fn with_notification(mut self, notification: Option<Notification>) -> Self {
        if let (Some(notification), Value::Object(context)) = (notification, &mut self.context) {
            context.insert("notification".to_string(), serde_json::json!(notification));
        }
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Redirection {
    pub location: &'static str,
    pub notification: Option<Notification>,
}

impl Redirection {
    pub fn to(location: &'static str) -> Self {
        Redirection { location, notification: None }
    }

    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }
}
