//! Containers hosting overlays, and the animation wrapping their changes.

use crate::overlay::category::{Overlay, Rect, ViewCategory};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Default duration of an animated state change.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AnimationCurve {
    EaseInOut,
    EaseIn,
    #[default]
    EaseOut,
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationOptions {
    /// Start from the current presentation of an animation already running
    pub begin_from_current_state: bool,
    pub cross_dissolve: bool,
    pub curve: AnimationCurve,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            begin_from_current_state: true,
            cross_dissolve: true,
            curve: AnimationCurve::EaseOut,
        }
    }
}

/// How state changes of a presenter are animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationSettings {
    pub duration: Duration,
    pub options: AnimationOptions,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration: DEFAULT_ANIMATION_DURATION,
            options: AnimationOptions::default(),
        }
    }
}

impl AnimationSettings {
    /// The animation for one change; non-animated changes take no time.
    pub fn animation(&self, animated: bool) -> Animation {
        Animation {
            duration: if animated { self.duration } else { Duration::ZERO },
            options: self.options,
        }
    }
}

/// Parameters of a single timed cross-fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animation {
    pub duration: Duration,
    pub options: AnimationOptions,
}

/// A view region that overlays are added to and removed from.
///
/// Called from the presentation executor only.
pub trait OverlayContainer: Send + Sync + 'static {
    /// Current bounds; the origin moves when the container scrolls.
    fn bounds(&self) -> Rect;

    fn add_overlay(&self, overlay: Overlay);

    /// Remove the most recently added overlay of `category`.
    fn remove_last(&self, category: ViewCategory) -> Option<Overlay>;

    /// Overlays currently shown, oldest first.
    fn overlays(&self) -> Vec<Overlay>;

    /// Run `mutation` wrapped in `animation`.
    ///
    /// Default implementation applies the mutation immediately.
    fn animate(&self, animation: Animation, mutation: Box<dyn FnOnce() + '_>) {
        let _ = animation;
        mutation()
    }
}

/// In-memory container, e.g. for headless rendering or tests.
///
/// Records every animation it was asked to run.
#[derive(Debug, Default)]
pub struct OverlayStack {
    bounds: Mutex<Rect>,
    overlays: Mutex<Vec<Overlay>>,
    animations: Mutex<Vec<Animation>>,
}

impl OverlayStack {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: Mutex::new(bounds),
            ..Self::default()
        }
    }

    /// Move or resize the container, e.g. when it scrolls.
    pub fn set_bounds(&self, bounds: Rect) {
        *self.bounds.lock().unwrap_or_else(PoisonError::into_inner) = bounds;
    }

    /// Overlays of `category` currently shown.
    pub fn count(&self, category: ViewCategory) -> usize {
        self.overlays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|overlay| overlay.category == category)
            .count()
    }

    pub fn animations(&self) -> Vec<Animation> {
        self.animations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OverlayContainer for OverlayStack {
    fn bounds(&self) -> Rect {
        *self.bounds.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn add_overlay(&self, overlay: Overlay) {
        self.overlays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(overlay);
    }

    fn remove_last(&self, category: ViewCategory) -> Option<Overlay> {
        let mut overlays = self.overlays.lock().unwrap_or_else(PoisonError::into_inner);
        let index = overlays.iter().rposition(|overlay| overlay.category == category)?;
        Some(overlays.remove(index))
    }

    fn overlays(&self) -> Vec<Overlay> {
        self.overlays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn animate(&self, animation: Animation, mutation: Box<dyn FnOnce() + '_>) {
        self.animations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(animation);
        mutation()
    }
}
