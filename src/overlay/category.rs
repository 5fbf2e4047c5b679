//! Visual categories and the overlays presenting them.

use crate::core::ContentState;
use crate::overlay::configuration::OverlayConfiguration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A class of overlay presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewCategory {
    Empty,
    Loading,
    Error,
}

impl ViewCategory {
    pub const ALL: [ViewCategory; 3] = [Self::Empty, Self::Loading, Self::Error];

    /// Build a fully configured overlay for `state`, covering `bounds`.
    ///
    /// The origin is always (0, 0): a scrolled container reports shifted
    /// bounds, but the overlay must cover what is visible.
    pub fn overlay<S, F>(self, state: &S, configuration: &F, bounds: Rect) -> Overlay
    where
        S: ContentState,
        F: OverlayConfiguration<S> + ?Sized,
    {
        let content = match self {
            Self::Empty => OverlayContent {
                image: configuration.image_for_empty_view(state),
                title: configuration.title_for_empty_view(state),
                subtitle: configuration.subtitle_for_empty_view(state),
            },
            Self::Loading => OverlayContent {
                image: None,
                title: configuration.title_for_loading_view(state),
                subtitle: configuration.subtitle_for_loading_view(state),
            },
            Self::Error => OverlayContent {
                image: configuration.image_for_error_view(state),
                title: configuration.title_for_error_view(state),
                subtitle: configuration.subtitle_for_error_view(state),
            },
        };

        Overlay {
            id: Uuid::new_v4(),
            category: self,
            content,
            frame: Rect::new(0.0, 0.0, bounds.width, bounds.height),
        }
    }
}

/// Axis-aligned rectangle in container coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Image and text shown by an overlay.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayContent {
    /// Name of the image asset
    pub image: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

/// One presented overlay instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub id: Uuid,
    pub category: ViewCategory,
    pub content: OverlayContent,
    pub frame: Rect,
}
