//! Pure mapping from a content state to show/hide steps.
//!
//! Obtrusive presentation replaces the whole view and is only used when
//! there is no content to protect. Whenever content exists, loading and
//! errors are presented non-obtrusively on top of it.

use super::state::ContentState;

/// Number of leading hide steps in every plan.
const HIDDEN_CATEGORIES: usize = 3;

/// How a loading indicator or error is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Presentation {
    /// Replaces the view
    Obtrusive,

    /// Layered on top of existing content
    NonObtrusive,
}

/// A single show/hide operation on a target.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionStep<E> {
    HideEmptyView,
    HideError,
    HideLoadingIndicator,
    ShowEmptyView,
    ShowLoadingIndicator(Presentation),
    ShowError(Presentation, E),
}

/// Ordered steps computed for one state.
///
/// A plan always starts by hiding every category, so at most one
/// instance of each category is visible after it has been applied.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionPlan<E> {
    steps: Vec<TransitionStep<E>>,
}

impl<E> TransitionPlan<E> {
    pub fn steps(&self) -> &[TransitionStep<E>] {
        &self.steps
    }

    /// Steps after the unconditional hides.
    pub fn shows(&self) -> &[TransitionStep<E>] {
        &self.steps[HIDDEN_CATEGORIES..]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Never true for a plan built by [`plan`], which always hides.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<E> IntoIterator for TransitionPlan<E> {
    type Item = TransitionStep<E>;
    type IntoIter = std::vec::IntoIter<TransitionStep<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Decide which categories to show for `state`.
///
/// # Example
///
/// ```rust
/// use viewstate::core::{plan, Presentation, TransitionStep, ViewState};
///
/// let plan = plan(&ViewState::loading_over(ViewState::content()));
/// assert_eq!(
///     plan.shows(),
///     &[TransitionStep::ShowLoadingIndicator(Presentation::NonObtrusive)]
/// );
/// ```
pub fn plan<S: ContentState>(state: &S) -> TransitionPlan<S::Error> {
    let mut steps = vec![
        TransitionStep::HideEmptyView,
        TransitionStep::HideError,
        TransitionStep::HideLoadingIndicator,
    ];

    match (state.has_content(), state.is_loading(), state.error().cloned()) {
        (true, true, Some(error)) => {
            steps.push(TransitionStep::ShowLoadingIndicator(Presentation::NonObtrusive));
            steps.push(TransitionStep::ShowError(Presentation::NonObtrusive, error));
        }
        (true, true, None) => {
            steps.push(TransitionStep::ShowLoadingIndicator(Presentation::NonObtrusive));
        }
        (true, false, Some(error)) => {
            steps.push(TransitionStep::ShowError(Presentation::NonObtrusive, error));
        }
        (false, true, Some(error)) => {
            steps.push(TransitionStep::ShowLoadingIndicator(Presentation::NonObtrusive));
            steps.push(TransitionStep::ShowError(Presentation::Obtrusive, error));
        }
        (false, true, None) => {
            steps.push(TransitionStep::ShowLoadingIndicator(Presentation::Obtrusive));
        }
        (false, false, None) => {
            steps.push(TransitionStep::ShowEmptyView);
        }
        (false, false, Some(error)) => {
            steps.push(TransitionStep::ShowError(Presentation::Obtrusive, error));
        }
        // content is rendered by the view itself
        (true, false, None) => {}
    }

    TransitionPlan { steps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StateError, ViewState};

    fn err(message: &str) -> StateError {
        StateError::new(message)
    }

    #[test]
    fn plan_always_hides_all_categories_first() {
        for state in [
            ViewState::empty(),
            ViewState::content(),
            ViewState::loading(),
            ViewState::content_with_error("x"),
        ] {
            let plan = plan(&state);
            assert_eq!(
                &plan.steps()[..3],
                &[
                    TransitionStep::HideEmptyView,
                    TransitionStep::HideError,
                    TransitionStep::HideLoadingIndicator,
                ]
            );
        }
    }

    #[test]
    fn empty_without_error_shows_empty_view() {
        let plan = plan(&ViewState::empty());
        assert_eq!(plan.shows(), &[TransitionStep::ShowEmptyView]);
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn empty_with_error_shows_obtrusive_error() {
        let plan = plan(&ViewState::empty_with_error("down"));
        assert_eq!(
            plan.shows(),
            &[TransitionStep::ShowError(Presentation::Obtrusive, err("down"))]
        );
    }

    #[test]
    fn bare_loading_shows_obtrusive_indicator() {
        let plan = plan(&ViewState::loading());
        assert_eq!(
            plan.shows(),
            &[TransitionStep::ShowLoadingIndicator(Presentation::Obtrusive)]
        );
    }

    #[test]
    fn loading_without_content_but_with_error() {
        let plan = plan(&ViewState::loading_over(ViewState::empty_with_error("retrying")));
        assert_eq!(
            plan.shows(),
            &[
                TransitionStep::ShowLoadingIndicator(Presentation::NonObtrusive),
                TransitionStep::ShowError(Presentation::Obtrusive, err("retrying")),
            ]
        );
    }

    #[test]
    fn refresh_over_content_is_non_obtrusive() {
        let plan = plan(&ViewState::loading_over(ViewState::content()));
        assert_eq!(
            plan.shows(),
            &[TransitionStep::ShowLoadingIndicator(Presentation::NonObtrusive)]
        );
    }

    #[test]
    fn refresh_over_failed_content_shows_both_non_obtrusively() {
        let plan = plan(&ViewState::loading_over(ViewState::content_with_error("stale")));
        assert_eq!(
            plan.shows(),
            &[
                TransitionStep::ShowLoadingIndicator(Presentation::NonObtrusive),
                TransitionStep::ShowError(Presentation::NonObtrusive, err("stale")),
            ]
        );
    }

    #[test]
    fn content_with_error_shows_non_obtrusive_error() {
        let plan = plan(&ViewState::content_with_error("X"));
        assert_eq!(
            plan.shows(),
            &[TransitionStep::ShowError(Presentation::NonObtrusive, err("X"))]
        );
    }

    #[test]
    fn plain_content_shows_nothing() {
        let plan = plan(&ViewState::content());
        assert!(plan.shows().is_empty());
        assert_eq!(plan.len(), 3);
        assert!(!plan.is_empty());
    }
}
