//! Overlay-based presentation of view categories.
//!
//! Binds the decision engine to a concrete container: each category maps
//! to one overlay, configured through per-category content accessors and
//! shown or hidden inside the container's animation. Rendering itself is
//! left to the `OverlayContainer` implementation.

mod banner;
mod category;
mod configuration;
mod container;
mod indicator;
mod presenter;

pub use banner::{ErrorBanner, MessageBanner};
pub use category::{Overlay, OverlayContent, Rect, ViewCategory};
pub use configuration::{DefaultOverlayConfiguration, OverlayConfiguration};
pub use container::{
    Animation, AnimationCurve, AnimationOptions, AnimationSettings, OverlayContainer,
    OverlayStack, DEFAULT_ANIMATION_DURATION,
};
pub use indicator::{ActivityIndicator, LoadingAnimatable};
pub use presenter::OverlayPresenter;
