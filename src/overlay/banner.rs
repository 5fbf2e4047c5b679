//! Non-obtrusive error banners.

use std::sync::{Mutex, PoisonError};

/// Something that can report an error without covering content.
pub trait ErrorBanner: Send + Sync + 'static {
    fn show_error(&self, message: &str);

    fn hide_error(&self);
}

/// Banner that only remembers the message it currently shows.
#[derive(Debug, Default)]
pub struct MessageBanner {
    message: Mutex<Option<String>>,
}

impl MessageBanner {
    pub fn message(&self) -> Option<String> {
        self.message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_hidden(&self) -> bool {
        self.message().is_none()
    }
}

impl ErrorBanner for MessageBanner {
    fn show_error(&self, message: &str) {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.to_string());
    }

    fn hide_error(&self) {
        self.message.lock().unwrap_or_else(PoisonError::into_inner).take();
    }
}
