//! Per-category overlay content.

use crate::core::ContentState;

/// Supplies the image and text of each overlay category.
///
/// Every accessor has a built-in placeholder; override the ones that
/// need application-specific content. Returning `None` leaves the element
/// out.
pub trait OverlayConfiguration<S: ContentState>: Send + Sync + 'static {
    fn image_for_empty_view(&self, _state: &S) -> Option<String> {
        Some("ic_empty".to_string())
    }

    fn title_for_empty_view(&self, _state: &S) -> Option<String> {
        Some("All done!".to_string())
    }

    fn subtitle_for_empty_view(&self, _state: &S) -> Option<String> {
        Some("Clear screens ahead".to_string())
    }

    fn title_for_loading_view(&self, _state: &S) -> Option<String> {
        Some("Loading".to_string())
    }

    fn subtitle_for_loading_view(&self, _state: &S) -> Option<String> {
        Some("Almost there...".to_string())
    }

    fn image_for_error_view(&self, _state: &S) -> Option<String> {
        Some("ic_error".to_string())
    }

    fn title_for_error_view(&self, _state: &S) -> Option<String> {
        Some("Whoops!".to_string())
    }

    /// Defaults to the description of the state's error.
    fn subtitle_for_error_view(&self, state: &S) -> Option<String> {
        state.error().map(ToString::to_string)
    }
}

/// Configuration using every placeholder.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultOverlayConfiguration;

impl<S: ContentState> OverlayConfiguration<S> for DefaultOverlayConfiguration {}
