use crate::notification::Notification;

/// Sink for transient messages shown to the user.
pub trait NotifierPort: Send + Sync {
    fn notify(&self, notification: Notification);
}
