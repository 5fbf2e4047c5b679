//! Non-obtrusive loading indicators.

use std::sync::atomic::{AtomicBool, Ordering};

/// Something that can show ongoing loading without covering content.
pub trait LoadingAnimatable: Send + Sync + 'static {
    fn start_loading_animation(&self);

    fn stop_loading_animation(&self);
}

/// Indicator that only tracks whether it is animating.
///
/// Hidden whenever it is stopped.
#[derive(Debug, Default)]
pub struct ActivityIndicator {
    animating: AtomicBool,
}

impl ActivityIndicator {
    pub fn is_animating(&self) -> bool {
        self.animating.load(Ordering::Acquire)
    }

    pub fn is_hidden(&self) -> bool {
        !self.is_animating()
    }
}

impl LoadingAnimatable for ActivityIndicator {
    fn start_loading_animation(&self) {
        self.animating.store(true, Ordering::Release);
    }

    fn stop_loading_animation(&self) {
        self.animating.store(false, Ordering::Release);
    }
}
