//! Notifications queued for the next rendered page.

use actix_web_flash_messages::FlashMessage;

pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sends notifications as flash messages; must be used inside a request.
pub struct FlashNotifier;

impl Notifier for FlashNotifier {
    fn success(&self, message: &str) {
        FlashMessage::success(message.to_string()).send();
    }

    fn error(&self, message: &str) {
        FlashMessage::error(message.to_string()).send();
    }
}
