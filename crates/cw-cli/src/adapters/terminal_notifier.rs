use cw_core::ports::NotifierPort;
use cw_core::{Notification, NotificationLevel};

/// Prints notifications as they arrive.
///
/// Warnings and errors go to stderr. Info and success go to stdout, or to
/// stderr as well when stdout is reserved for JSON output.
pub struct TerminalNotifier {
    stdout_reserved: bool,
}

impl TerminalNotifier {
    pub fn new(stdout_reserved: bool) -> Self {
        Self { stdout_reserved }
    }
}

impl NotifierPort for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        let line = format_notification(&notification);
        match notification.level {
            NotificationLevel::Warning | NotificationLevel::Error => eprintln!("{line}"),
            _ if self.stdout_reserved => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }
}

pub fn format_notification(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Info => "..",
        NotificationLevel::Success => "ok",
        NotificationLevel::Warning => "!!",
        NotificationLevel::Error => "xx",
    };
    format!("[{tag}] {}", notification.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_level_has_its_own_tag() {
        assert_eq!(
            format_notification(&Notification::success("valve opened")),
            "[ok] valve opened"
        );
        assert_eq!(
            format_notification(&Notification::error("failed to close valve: 订单不存在")),
            "[xx] failed to close valve: 订单不存在"
        );
        assert!(format_notification(&Notification::info("x")).starts_with("[..]"));
        assert!(format_notification(&Notification::warning("x")).starts_with("[!!]"));
    }
}
