//! Dispatcher behavior against an in-memory storefront.

mod common;

use common::{storefront_page, RecordingPlayback};
use std::sync::Arc;
use voxcart_app::dispatch::{
    DispatchOutcome, Dispatcher, EngineRequest, NO_MATCH_STATUS, NO_MATCH_TOAST,
};
use voxcart_app::feedback::{FeedbackKind, RecordingSurface, SurfaceCall};
use voxcart_commands::{
    base_commands, discover_page_commands, merge_for_cycle, resolve, CommandSet, Resolution,
    SelectorCatalog,
};
use voxcart_dom::{DomPage, Element, MemoryPage, PageEffect};
use voxcart_foundation::FeedbackLevel;

struct Fixture {
    page: Arc<MemoryPage>,
    playback: Arc<RecordingPlayback>,
    surface: Arc<RecordingSurface>,
    dispatcher: Dispatcher,
}

fn fixture_with(page: MemoryPage, level: FeedbackLevel) -> Fixture {
    let page = Arc::new(page);
    let playback = RecordingPlayback::new();
    let surface = Arc::new(RecordingSurface::new());
    let dispatcher = Dispatcher::new(
        Arc::clone(&page) as Arc<dyn DomPage>,
        SelectorCatalog::storefront(),
        Arc::clone(&playback) as _,
        Arc::clone(&surface) as _,
        level,
    );
    Fixture {
        page,
        playback,
        surface,
        dispatcher,
    }
}

fn fixture() -> Fixture {
    fixture_with(storefront_page(), FeedbackLevel::Full)
}

/// Resolves a transcript against the full registry (static + discovered)
/// and dispatches it, like one engine cycle.
fn run(fixture: &Fixture, transcript: &str) -> DispatchOutcome {
    let static_set = base_commands();
    let discovered = discover_page_commands(&*fixture.page);
    let merged = merge_for_cycle(&static_set, &discovered);
    let resolution = resolve(transcript, &merged);
    fixture.dispatcher.dispatch(&resolution).outcome
}

#[test]
fn substring_match_navigates_to_cart() {
    let fx = fixture();
    let outcome = run(&fx, "please go to cart now");
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(fx.page.location(), "/cart");
    assert_eq!(fx.playback.lines(), vec!["Opening your cart".to_string()]);
    assert_eq!(
        fx.surface.toasts(),
        vec![("Navigating to: Cart".to_string(), FeedbackKind::Success)]
    );
}

#[test]
fn wildcard_fills_search_and_submits() {
    let fx = fixture();
    let outcome = run(&fx, "search for red shoes");
    assert_eq!(outcome, DispatchOutcome::Completed);
    let input = fx.page.query("input[type=search]").unwrap();
    let effects = fx.page.effects();
    assert!(effects.contains(&PageEffect::ValueSet(input, "red shoes".to_string())));
    assert!(effects.contains(&PageEffect::FormSubmitted(input)));
    assert_eq!(fx.playback.lines(), vec!["Searching for red shoes".to_string()]);
}

#[test]
fn read_price_speaks_the_page_text() {
    let fx = fixture();
    let outcome = run(&fx, "read price");
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(fx.playback.lines(), vec!["The price is $49.00".to_string()]);
    assert_eq!(
        fx.surface.toasts(),
        vec![("Price: $49.00".to_string(), FeedbackKind::Success)]
    );
}

#[test]
fn speak_total_uses_the_template() {
    let fx = fixture();
    run(&fx, "speak total");
    assert_eq!(fx.playback.lines(), vec!["Your total is $98.00".to_string()]);
    assert_eq!(
        fx.surface.toasts(),
        vec![("Total: $98.00".to_string(), FeedbackKind::Success)]
    );
}

#[test]
fn missing_target_is_handled_not_no_match() {
    let fx = fixture_with(MemoryPage::new(), FeedbackLevel::Full);
    let outcome = run(&fx, "add to cart");
    assert_eq!(outcome, DispatchOutcome::TargetMissing);
    assert!(fx.page.effects().is_empty());
    assert_eq!(
        fx.surface.toasts(),
        vec![(
            "Add to Cart button not found".to_string(),
            FeedbackKind::Error
        )]
    );
    assert_eq!(
        fx.playback.lines(),
        vec!["Add to cart button not found".to_string()]
    );
}

#[test]
fn no_match_emits_exactly_one_feedback_and_no_action() {
    let fx = fixture();
    let outcome = run(&fx, "do a barrel roll");
    assert_eq!(outcome, DispatchOutcome::NoMatch);
    assert!(fx.page.effects().is_empty());
    assert_eq!(
        fx.surface.toasts(),
        vec![(NO_MATCH_TOAST.to_string(), FeedbackKind::Error)]
    );
    assert!(fx
        .surface
        .statuses()
        .contains(&NO_MATCH_STATUS.to_string()));
    assert_eq!(
        fx.playback.lines(),
        vec!["Sorry, I didn't understand that command".to_string()]
    );
}

#[test]
fn stale_discovered_node_reports_target_missing() {
    let page = MemoryPage::new();
    let submit = page.insert(Element::new("button").text("Submit"));
    let fx = fixture_with(page, FeedbackLevel::Full);

    // Discover while the button is attached, then detach it before
    // dispatch, as a mutating page would.
    let static_set = base_commands();
    let discovered = discover_page_commands(&*fx.page);
    fx.page.detach(submit);

    let merged = merge_for_cycle(&static_set, &discovered);
    let resolution = resolve("click submit", &merged);
    let dispatched = fx.dispatcher.dispatch(&resolution);
    assert_eq!(dispatched.outcome, DispatchOutcome::TargetMissing);
    assert!(fx.page.effects().is_empty());
    assert_eq!(fx.surface.toasts().len(), 1);
    assert_eq!(fx.surface.toasts()[0].1, FeedbackKind::Error);
}

#[test]
fn discovered_command_clicks_its_button() {
    let page = MemoryPage::new();
    let submit = page.insert(Element::new("button").text("Submit"));
    let fx = fixture_with(page, FeedbackLevel::Full);
    let outcome = run(&fx, "click submit");
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(fx.page.effects(), vec![PageEffect::Clicked(submit)]);
    assert_eq!(fx.playback.lines(), vec!["Clicking submit".to_string()]);
}

#[test]
fn contact_us_finds_the_link_by_href() {
    let fx = fixture();
    let outcome = run(&fx, "contact us");
    assert_eq!(outcome, DispatchOutcome::Completed);
    // The link text has no "contact"; the href does.
    assert_eq!(fx.page.location(), "/pages/contact");
}

#[test]
fn subscribe_requires_both_form_parts() {
    let page = MemoryPage::new();
    page.insert(
        Element::new("input")
            .attr("type", "email")
            .class("newsletter-input"),
    );
    // No subscribe button on this page.
    let fx = fixture_with(page, FeedbackLevel::Full);
    let outcome = run(&fx, "subscribe");
    assert_eq!(outcome, DispatchOutcome::TargetMissing);
    assert!(fx.page.effects().is_empty());

    let fx = fixture();
    let outcome = run(&fx, "subscribe");
    assert_eq!(outcome, DispatchOutcome::Completed);
    let email = fx.page.query(".newsletter-input").unwrap();
    assert!(fx.page.effects().contains(&PageEffect::Focused(email)));
}

#[test]
fn help_toggles_the_panel() {
    let fx = fixture();
    run(&fx, "help");
    assert!(fx.surface.calls().contains(&SurfaceCall::HelpPanel));
}

#[test]
fn stop_listening_returns_an_engine_request() {
    let fx = fixture();
    let static_set = base_commands();
    let discovered = CommandSet::new();
    let merged = merge_for_cycle(&static_set, &discovered);
    let resolution = resolve("stop listening", &merged);
    let dispatched = fx.dispatcher.dispatch(&resolution);
    assert_eq!(dispatched.request, Some(EngineRequest::StopListening));
    assert!(matches!(resolution, Resolution::Matched { .. }));
}

#[test]
fn minimal_level_speaks_errors_only() {
    let mut fx = fixture_with(MemoryPage::new(), FeedbackLevel::Full);
    fx.dispatcher.set_feedback_level(FeedbackLevel::Minimal);

    run(&fx, "scroll down");
    assert!(fx.playback.lines().is_empty(), "success must not be spoken");

    run(&fx, "add to cart");
    assert_eq!(
        fx.playback.lines(),
        vec!["Add to cart button not found".to_string()]
    );
}

#[test]
fn silent_level_never_speaks() {
    let fx = fixture_with(MemoryPage::new(), FeedbackLevel::Silent);
    run(&fx, "scroll down");
    run(&fx, "add to cart");
    run(&fx, "gibberish phrase");
    assert!(fx.playback.lines().is_empty());
    // Toasts still appear.
    assert_eq!(fx.surface.toasts().len(), 3);
}

#[test]
fn discovered_entry_shadows_static_on_collision() {
    // A page link whose text is "cart" synthesizes "go to cart", colliding
    // with the static navigation command; the discovered action wins.
    let page = MemoryPage::new();
    let link = page.insert(Element::new("a").attr("href", "/custom-cart").text("Cart"));
    let fx = fixture_with(page, FeedbackLevel::Full);
    let outcome = run(&fx, "go to cart");
    assert_eq!(outcome, DispatchOutcome::Completed);
    assert!(fx.page.effects().contains(&PageEffect::Clicked(link)));
    assert_eq!(fx.page.location(), "/custom-cart");
}
