//! Platform notification seam.

/// Answer of the platform to a notification permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPermission {
    Granted,
    Denied,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    /// The notification sent when a step's countdown completes.
    pub fn step_complete(step_title: &str) -> Self {
        Self {
            title: "Step Complete!".to_string(),
            body: format!("Great job completing {step_title}!"),
        }
    }
}

/// Delivers notifications through the platform.
pub trait Notifier: Send + Sync {
    /// Asks the platform whether notifications may be shown.
    fn request_permission(&self) -> NotificationPermission;

    /// Shows a notification. Only called after permission was granted.
    fn notify(&self, notification: &Notification);
}
