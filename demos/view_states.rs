//! View States Walkthrough
//!
//! This example drives a screen through a typical fetch cycle and prints
//! the overlays left in its container after each transition.
//!
//! Key concepts:
//! - Serialized transitions on a dedicated presentation thread
//! - Obtrusive vs non-obtrusive loading and errors
//! - Duplicate states skipped without presenting
//! - Configurable machine (label, history capacity)
//!
//! Run with: RUST_LOG=viewstate=debug cargo run --example view_states

use std::sync::Arc;
use viewstate::core::ViewState;
use viewstate::machine::{MachineConfig, PresentationThread, StateMachine};
use viewstate::overlay::{
    ActivityIndicator, MessageBanner, OverlayContainer, OverlayPresenter, OverlayStack, Rect,
};
use viewstate::transitioning::{HasStateMachine, StatefulBinding};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== View States ===\n");

    let presentation = PresentationThread::spawn("presentation")?;
    let indicator = Arc::new(ActivityIndicator::default());
    let banner = Arc::new(MessageBanner::default());
    let screen = Arc::new(
        OverlayPresenter::new(OverlayStack::new(Rect::new(0.0, 0.0, 375.0, 667.0)))
            .with_loading_indicator(indicator.clone())
            .with_error_banner(banner.clone()),
    );

    let config = MachineConfig::from_json(r#"{ "label": "demo.inbox", "history_capacity": 16 }"#)?;
    let machine = StateMachine::<ViewState>::builder()
        .config(config)
        .executor(presentation.handle())
        .build()?;
    let binding = StatefulBinding::new(machine, &screen);

    let steps = [
        ("initial fetch", ViewState::loading()),
        ("fetch failed", ViewState::empty_with_error("The network connection was lost.")),
        ("same empty state again", ViewState::empty()),
        ("retry", ViewState::loading_over(ViewState::empty())),
        ("items arrived", ViewState::content()),
        ("pull to refresh", ViewState::loading_over(ViewState::content())),
        ("refresh failed", ViewState::content_with_error("Could not refresh.")),
    ];

    for (label, state) in steps {
        let outcome = binding.set_state_and_wait(state.clone(), true).await?;
        let overlays: Vec<String> = screen
            .container()
            .overlays()
            .iter()
            .map(|overlay| {
                format!(
                    "{:?}({})",
                    overlay.category,
                    overlay.content.title.as_deref().unwrap_or("-")
                )
            })
            .collect();

        println!("{label}: {state:?}");
        println!("  outcome:   {outcome:?}");
        println!("  overlays:  {overlays:?}");
        println!("  indicator: {}", if indicator.is_animating() { "spinning" } else { "hidden" });
        println!("  banner:    {}\n", banner.message().as_deref().unwrap_or("hidden"));
    }

    let history = binding.state_machine().history();
    println!("Committed path ({} transitions):", history.len());
    for state in history.get_path() {
        println!("  -> {state:?}");
    }
    if let Some(elapsed) = history.duration() {
        println!("Elapsed: {}ms", elapsed.as_millis());
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
