//! Default category presentation on top of an overlay container.

use crate::core::ContentState;
use crate::overlay::banner::ErrorBanner;
use crate::overlay::category::ViewCategory;
use crate::overlay::configuration::{DefaultOverlayConfiguration, OverlayConfiguration};
use crate::overlay::container::{AnimationSettings, OverlayContainer};
use crate::overlay::indicator::LoadingAnimatable;
use crate::transitioning::ViewStateTransitioning;
use std::sync::Arc;
use tracing::trace;

/// Presents each category as an overlay in a container.
///
/// Showing a category adds a freshly configured overlay covering the
/// container; hiding it removes the most recently added overlay of that
/// category. Both happen inside the container's animation. Loading over
/// existing content starts the non-obtrusive indicator instead, and an
/// error over content goes to the error banner, if they are attached.
///
/// # Example
///
/// ```rust
/// use viewstate::core::ViewState;
/// use viewstate::overlay::{OverlayPresenter, OverlayStack, Rect, ViewCategory};
/// use viewstate::transitioning::ViewStateTransitioning;
///
/// let presenter = OverlayPresenter::new(OverlayStack::new(Rect::new(0.0, 0.0, 320.0, 480.0)));
/// presenter.show_empty_view(&ViewState::empty(), false);
/// assert_eq!(presenter.container().count(ViewCategory::Empty), 1);
///
/// presenter.hide_empty_view(&ViewState::empty(), false);
/// assert_eq!(presenter.container().count(ViewCategory::Empty), 0);
/// ```
pub struct OverlayPresenter<K, F = DefaultOverlayConfiguration> {
    container: K,
    configuration: F,
    animation: AnimationSettings,
    indicator: Option<Arc<dyn LoadingAnimatable>>,
    banner: Option<Arc<dyn ErrorBanner>>,
}

impl<K: OverlayContainer> OverlayPresenter<K> {
    pub fn new(container: K) -> Self {
        Self {
            container,
            configuration: DefaultOverlayConfiguration,
            animation: AnimationSettings::default(),
            indicator: None,
            banner: None,
        }
    }
}

impl<K: OverlayContainer, F> OverlayPresenter<K, F> {
    /// Use `configuration` for overlay content.
    pub fn with_configuration<G>(self, configuration: G) -> OverlayPresenter<K, G> {
        OverlayPresenter {
            container: self.container,
            configuration,
            animation: self.animation,
            indicator: self.indicator,
            banner: self.banner,
        }
    }

    pub fn with_animation(mut self, animation: AnimationSettings) -> Self {
        self.animation = animation;
        self
    }

    /// Attach the indicator used for loading over existing content.
    pub fn with_loading_indicator(mut self, indicator: Arc<dyn LoadingAnimatable>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Attach the banner used for errors over existing content.
    pub fn with_error_banner(mut self, banner: Arc<dyn ErrorBanner>) -> Self {
        self.banner = Some(banner);
        self
    }

    pub fn container(&self) -> &K {
        &self.container
    }

    pub fn configuration(&self) -> &F {
        &self.configuration
    }

    pub fn animation_settings(&self) -> AnimationSettings {
        self.animation
    }

    fn show<S>(&self, category: ViewCategory, state: &S, animated: bool)
    where
        S: ContentState,
        F: OverlayConfiguration<S>,
    {
        let overlay = category.overlay(state, &self.configuration, self.container.bounds());
        trace!(?category, id = %overlay.id, "showing overlay");
        self.container.animate(
            self.animation.animation(animated),
            Box::new(move || self.container.add_overlay(overlay)),
        );
    }

    fn hide(&self, category: ViewCategory, animated: bool) {
        self.container.animate(
            self.animation.animation(animated),
            Box::new(move || {
                match category {
                    ViewCategory::Loading => {
                        if let Some(indicator) = &self.indicator {
                            indicator.stop_loading_animation();
                        }
                    }
                    ViewCategory::Error => {
                        if let Some(banner) = &self.banner {
                            banner.hide_error();
                        }
                    }
                    ViewCategory::Empty => {}
                }
                if let Some(overlay) = self.container.remove_last(category) {
                    trace!(?category, id = %overlay.id, "removed overlay");
                }
            }),
        );
    }
}

impl<S, K, F> ViewStateTransitioning<S> for OverlayPresenter<K, F>
where
    S: ContentState,
    K: OverlayContainer,
    F: OverlayConfiguration<S>,
{
    fn show_empty_view(&self, state: &S, animated: bool) {
        self.show(ViewCategory::Empty, state, animated);
    }

    fn hide_empty_view(&self, _state: &S, animated: bool) {
        self.hide(ViewCategory::Empty, animated);
    }

    fn show_obtrusive_error(&self, _error: &S::Error, state: &S, animated: bool) {
        self.show(ViewCategory::Error, state, animated);
    }

    fn show_non_obtrusive_error(&self, error: &S::Error, _state: &S, _animated: bool) {
        if let Some(banner) = &self.banner {
            banner.show_error(&error.to_string());
        }
    }

    fn hide_error(&self, _state: &S, animated: bool) {
        self.hide(ViewCategory::Error, animated);
    }

    fn show_obtrusive_loading_indicator(&self, state: &S, animated: bool) {
        self.show(ViewCategory::Loading, state, animated);
    }

    fn show_non_obtrusive_loading_indicator(&self, _state: &S, _animated: bool) {
        if let Some(indicator) = &self.indicator {
            indicator.start_loading_animation();
        }
    }

    fn hide_loading_indicator(&self, _state: &S, animated: bool) {
        self.hide(ViewCategory::Loading, animated);
    }
}
