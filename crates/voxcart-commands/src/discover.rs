//! Page command discovery.
//!
//! Scans the live page for actionable elements and synthesizes a command per
//! element. Runs at the start of every resolution cycle when auto-discovery
//! is on; the result is never cached across utterances.

use crate::command::{Command, CommandOrigin, FeedbackText, PageAction};
use crate::registry::CommandSet;
use std::collections::HashSet;
use voxcart_dom::{DomPage, NodeId};

const BUTTON_SELECTORS: &str = "button, .btn, [role=button]";
const TEXT_INPUT_SELECTORS: &str =
    "input[type=text], input[type=email], input[type=search], textarea";
const CHOICE_SELECTORS: &str = "input[type=checkbox], input[type=radio]";

/// Spoken command text must be short enough to say: strictly between 1 and
/// 20 characters.
fn speakable(text: &str) -> bool {
    let len = text.chars().count();
    len > 1 && len < 20
}

/// Label for a form control: placeholder, else aria-label, else the text of
/// an associated `<label for=...>`, else the given fallback.
fn control_label(page: &dyn DomPage, node: NodeId, fallback: &str) -> String {
    if let Some(placeholder) = page.attr(node, "placeholder") {
        if !placeholder.is_empty() {
            return placeholder;
        }
    }
    if let Some(aria) = page.attr(node, "aria-label") {
        if !aria.is_empty() {
            return aria;
        }
    }
    if let Some(id) = page.attr(node, "id") {
        if let Some(label) = page.query(&format!("label[for={id}]")) {
            if let Some(text) = page.text(label) {
                let text = text.trim().to_string();
                if !text.is_empty() {
                    return text;
                }
            }
        }
    }
    fallback.to_string()
}

fn dedup_in_order(nodes: Vec<NodeId>) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    nodes.into_iter().filter(|n| seen.insert(*n)).collect()
}

/// Builds a fresh discovered command set from the current page.
///
/// Commands hold the node handle resolved here; the dispatcher re-validates
/// attachment before acting. Key collisions: the element scanned last wins.
/// Scanning an unchanged page twice yields an identical set.
pub fn discover_page_commands(page: &dyn DomPage) -> CommandSet {
    let mut set = CommandSet::new();

    for node in dedup_in_order(page.query_all(BUTTON_SELECTORS)) {
        let Some(text) = page.text(node) else { continue };
        let text = text.trim().to_lowercase();
        if !speakable(&text) {
            continue;
        }
        set.insert(
            Command::new(
                format!("click {text}"),
                PageAction::ClickNode(node),
                CommandOrigin::Discovered,
                FeedbackText::new(format!("Clicking {text}"), format!("Clicking: {text}")),
            )
            .with_err(stale_feedback()),
        );
    }

    for node in page.query_all("a") {
        let Some(text) = page.text(node) else { continue };
        let text = text.trim().to_lowercase();
        // Raw URLs are not meaningful to speak.
        if !speakable(&text) || text.contains("http") {
            continue;
        }
        set.insert(
            Command::new(
                format!("go to {text}"),
                PageAction::ClickNode(node),
                CommandOrigin::Discovered,
                FeedbackText::new(format!("Going to {text}"), format!("Navigating to: {text}")),
            )
            .with_err(stale_feedback()),
        );
    }

    for node in page.query_all(TEXT_INPUT_SELECTORS) {
        let label = control_label(page, node, "this field");
        set.insert(
            Command::new(
                format!("type in {}", label.to_lowercase()),
                PageAction::FocusNode(node),
                CommandOrigin::Discovered,
                FeedbackText::new(
                    format!("Ready to type in {label}"),
                    format!("Focus on: {label}"),
                ),
            )
            .with_err(stale_feedback()),
        );
    }

    for node in page.query_all(CHOICE_SELECTORS) {
        let label = control_label(page, node, "this option");
        set.insert(
            Command::new(
                format!("select {}", label.to_lowercase()),
                PageAction::CheckNode(node),
                CommandOrigin::Discovered,
                FeedbackText::new(format!("Selected {label}"), format!("Selected: {label}")),
            )
            .with_err(stale_feedback()),
        );
    }

    for node in page.query_all("select") {
        let label = control_label(page, node, "dropdown");
        set.insert(
            Command::new(
                format!("open {}", label.to_lowercase()),
                PageAction::OpenSelectNode(node),
                CommandOrigin::Discovered,
                FeedbackText::new(
                    format!("Opening {label} dropdown"),
                    format!("Opening: {label}"),
                ),
            )
            .with_err(stale_feedback()),
        );
    }

    tracing::debug!("discovered {} page commands", set.len());
    set
}

fn stale_feedback() -> FeedbackText {
    FeedbackText::new(
        "Sorry, that element is no longer on the page",
        "Element not found",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxcart_dom::{Element, MemoryPage};

    fn storefront() -> MemoryPage {
        let page = MemoryPage::new();
        page.insert(Element::new("button").text("Add to cart"));
        page.insert(Element::new("a").attr("href", "/collections").text("Collections"));
        page.insert(
            Element::new("input")
                .attr("type", "search")
                .attr("placeholder", "Search products"),
        );
        page.insert(Element::new("input").attr("type", "checkbox").id("news"));
        page.insert(Element::new("label").attr("for", "news").text("Newsletter"));
        page.insert(Element::new("select").id("size"));
        page.insert(Element::new("label").attr("for", "size").text("Size"));
        page
    }

    #[test]
    fn synthesizes_expected_keys() {
        let set = discover_page_commands(&storefront());
        let keys: Vec<&str> = set.iter().map(|c| c.pattern.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "click add to cart",
                "go to collections",
                "type in search products",
                "select newsletter",
                "open size",
            ]
        );
        assert!(set.iter().all(|c| c.origin == CommandOrigin::Discovered));
    }

    #[test]
    fn discovery_is_idempotent() {
        let page = storefront();
        let first = discover_page_commands(&page);
        let second = discover_page_commands(&page);
        let a: Vec<&Command> = first.iter().collect();
        let b: Vec<&Command> = second.iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn text_length_bounds_are_strict() {
        let page = MemoryPage::new();
        page.insert(Element::new("button").text("x"));
        page.insert(Element::new("button").text("exactly twenty chars"));
        page.insert(Element::new("button").text("ok text"));
        let set = discover_page_commands(&page);
        let keys: Vec<&str> = set.iter().map(|c| c.pattern.as_str()).collect();
        assert_eq!(keys, vec!["click ok text"]);
    }

    #[test]
    fn links_with_urls_as_text_are_skipped() {
        let page = MemoryPage::new();
        page.insert(Element::new("a").text("https://a.example"));
        page.insert(Element::new("a").text("About us"));
        let set = discover_page_commands(&page);
        let keys: Vec<&str> = set.iter().map(|c| c.pattern.as_str()).collect();
        assert_eq!(keys, vec!["go to about us"]);
    }

    #[test]
    fn label_fallback_order_for_inputs() {
        let page = MemoryPage::new();
        page.insert(
            Element::new("input")
                .attr("type", "text")
                .attr("placeholder", "Your name")
                .attr("aria-label", "Name field"),
        );
        page.insert(Element::new("input").attr("type", "text").attr("aria-label", "Email"));
        page.insert(Element::new("input").attr("type", "text"));
        let set = discover_page_commands(&page);
        let keys: Vec<&str> = set.iter().map(|c| c.pattern.as_str()).collect();
        assert_eq!(
            keys,
            vec!["type in your name", "type in email", "type in this field"]
        );
    }

    #[test]
    fn key_collision_keeps_last_scanned_element() {
        let page = MemoryPage::new();
        let _first = page.insert(Element::new("button").text("Checkout"));
        let second = page.insert(Element::new("button").text("checkout"));
        let set = discover_page_commands(&page);
        assert_eq!(set.len(), 1);
        let cmd = set.get("click checkout").unwrap();
        assert_eq!(cmd.action, PageAction::ClickNode(second));
    }

    #[test]
    fn buttons_are_not_duplicated_across_selectors() {
        let page = MemoryPage::new();
        page.insert(Element::new("button").class("btn").text("Buy now"));
        let set = discover_page_commands(&page);
        assert_eq!(set.len(), 1);
    }
}
