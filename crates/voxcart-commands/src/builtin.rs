//! The static storefront vocabulary.
//!
//! Declared order is enumeration order for the resolver, so the more common
//! phrasings come first. Feedback texts may carry one `{}` placeholder, see
//! [`crate::command::FeedbackText`].

use crate::command::{Command, CommandOrigin, FeedbackText, PageAction};
use crate::registry::CommandSet;
use voxcart_dom::ScrollTarget;

fn infallible(pattern: &str, action: PageAction, speak: &str, toast: &str) -> Command {
    Command::new(
        pattern,
        action,
        CommandOrigin::Static,
        FeedbackText::new(speak, toast),
    )
}

fn fallible(
    pattern: &str,
    action: PageAction,
    speak: &str,
    toast: &str,
    err_speak: &str,
    err_toast: &str,
) -> Command {
    infallible(pattern, action, speak, toast).with_err(FeedbackText::new(err_speak, err_toast))
}

/// Builds the static command set, once at engine start.
pub fn base_commands() -> CommandSet {
    let mut set = CommandSet::new();
    let commands = [
        // Navigation
        infallible(
            "go to home",
            PageAction::Navigate("/"),
            "Going to home page",
            "Navigating to: Home Page",
        ),
        infallible(
            "go to cart",
            PageAction::Navigate("/cart"),
            "Opening your cart",
            "Navigating to: Cart",
        ),
        infallible(
            "go to checkout",
            PageAction::Navigate("/checkout"),
            "Taking you to checkout",
            "Navigating to: Checkout",
        ),
        infallible(
            "go back",
            PageAction::HistoryBack,
            "Going back",
            "Navigating: Back",
        ),
        infallible(
            "scroll down",
            PageAction::ScrollBy(500),
            "Scrolling down",
            "Scrolling Down",
        ),
        infallible(
            "scroll up",
            PageAction::ScrollBy(-500),
            "Scrolling up",
            "Scrolling Up",
        ),
        infallible(
            "scroll to top",
            PageAction::Scroll(ScrollTarget::Top),
            "Scrolling to top",
            "Scrolling to Top",
        ),
        infallible(
            "scroll to bottom",
            PageAction::Scroll(ScrollTarget::Bottom),
            "Scrolling to bottom",
            "Scrolling to Bottom",
        ),
        fallible(
            "show menu",
            PageAction::ClickIntent("menu-toggle"),
            "Opening menu",
            "Opening Menu",
            "Menu button not found",
            "Menu not found",
        ),
        // Shopping
        fallible(
            "add to cart",
            PageAction::ClickIntent("add-to-cart"),
            "Added to cart",
            "Added to Cart",
            "Add to cart button not found",
            "Add to Cart button not found",
        ),
        fallible(
            "buy now",
            PageAction::ClickIntent("buy-now"),
            "Proceeding to checkout",
            "Proceeding to Checkout",
            "Buy now button not found",
            "Buy Now button not found",
        ),
        fallible(
            "click first product",
            PageAction::ClickIntent("first-product"),
            "Opening product",
            "Opening First Product",
            "No products found",
            "No products found",
        ),
        fallible(
            "increase quantity",
            PageAction::ClickIntent("quantity-increase"),
            "Increased quantity",
            "Increased Quantity",
            "Increase quantity button not found",
            "Increase button not found",
        ),
        fallible(
            "decrease quantity",
            PageAction::ClickIntent("quantity-decrease"),
            "Decreased quantity",
            "Decreased Quantity",
            "Decrease quantity button not found",
            "Decrease button not found",
        ),
        fallible(
            "filter by price",
            PageAction::ClickIntent("price-filter"),
            "Filtering by price",
            "Filtering by Price",
            "Price filter not found",
            "Price filter not found",
        ),
        fallible(
            "sort by newest",
            PageAction::ClickIntent("sort-newest"),
            "Sorting by newest",
            "Sorting by Newest",
            "Sort option not found",
            "Sort option not found",
        ),
        fallible(
            "sort by price",
            PageAction::ClickIntent("sort-price"),
            "Sorting by price",
            "Sorting by Price",
            "Sort option not found",
            "Sort option not found",
        ),
        fallible(
            "show reviews",
            PageAction::ClickIntent("reviews-tab"),
            "Showing reviews",
            "Showing Reviews",
            "Reviews tab not found",
            "Reviews not found",
        ),
        fallible(
            "speak total",
            PageAction::ReadIntent("cart-total"),
            "Your total is {}",
            "Total: {}",
            "Total not found",
            "Total not found",
        ),
        // Interaction
        fallible(
            "open dropdown",
            PageAction::ClickIntent("dropdown-toggle"),
            "Opening dropdown",
            "Opening Dropdown",
            "Dropdown not found",
            "Dropdown not found",
        ),
        fallible(
            "close popup",
            PageAction::ClickIntent("popup-close"),
            "Closing popup",
            "Closing Popup",
            "Close button not found",
            "Close button not found",
        ),
        fallible(
            "play video",
            PageAction::MediaPlay("video"),
            "Playing video",
            "Playing Video",
            "Video not found",
            "Video not found",
        ),
        fallible(
            "pause video",
            PageAction::MediaPause("video"),
            "Pausing video",
            "Pausing Video",
            "Video not found",
            "Video not found",
        ),
        fallible(
            "next slide",
            PageAction::ClickIntent("slide-next"),
            "Next slide",
            "Next Slide",
            "Next slide button not found",
            "Next button not found",
        ),
        fallible(
            "previous slide",
            PageAction::ClickIntent("slide-prev"),
            "Previous slide",
            "Previous Slide",
            "Previous slide button not found",
            "Previous button not found",
        ),
        fallible(
            "zoom in",
            PageAction::ClickIntent("zoom-in"),
            "Zooming in",
            "Zooming In",
            "Zoom button not found",
            "Zoom button not found",
        ),
        fallible(
            "zoom out",
            PageAction::ClickIntent("zoom-out"),
            "Zooming out",
            "Zooming Out",
            "Zoom out button not found",
            "Zoom out button not found",
        ),
        fallible(
            "submit form",
            PageAction::ClickIntent("form-submit"),
            "Submitting form",
            "Submitting Form",
            "Submit button not found",
            "Submit button not found",
        ),
        // Utility
        fallible(
            "search for *",
            PageAction::SearchSubmit("search-input"),
            "Searching for {}",
            "Searching for: {}",
            "Search box not found",
            "Search box not found",
        ),
        fallible(
            "read description",
            PageAction::ReadIntent("product-description"),
            "{}",
            "Reading Description",
            "Description not found",
            "Description not found",
        ),
        fallible(
            "read price",
            PageAction::ReadIntent("product-price"),
            "The price is {}",
            "Price: {}",
            "Price not found",
            "Price not found",
        ),
        fallible(
            "subscribe",
            PageAction::FocusIntent {
                intent: "newsletter-email",
                require: Some("newsletter-submit"),
            },
            "Enter your email to subscribe",
            "Enter Email to Subscribe",
            "Subscription form not found",
            "Subscription form not found",
        ),
        fallible(
            "contact us",
            PageAction::ClickLinkContaining("contact"),
            "Going to contact page",
            "Navigating to Contact Page",
            "Contact link not found",
            "Contact link not found",
        ),
        fallible(
            "toggle dark mode",
            PageAction::ClickIntent("dark-mode-toggle"),
            "Toggling dark mode",
            "Toggling Dark Mode",
            "Dark mode toggle not found",
            "Dark mode toggle not found",
        ),
        infallible(
            "refresh page",
            PageAction::Reload,
            "Refreshing page",
            "Refreshing Page",
        ),
        infallible(
            "what can i say",
            PageAction::ShowHelp,
            "Here are the available commands",
            "Showing Available Commands",
        ),
        infallible(
            "stop listening",
            PageAction::StopListening,
            "Voice control deactivated",
            "Voice Control Deactivated",
        ),
        fallible(
            "show collections",
            PageAction::ClickLinkContaining("collection"),
            "Showing collections",
            "Showing Collections",
            "Collections link not found",
            "Collections link not found",
        ),
        infallible(
            "help",
            PageAction::ShowHelp,
            "Showing available commands",
            "Showing Help",
        ),
        infallible(
            "show help",
            PageAction::ShowHelp,
            "Showing available commands",
            "Showing Help",
        ),
        infallible(
            "show settings",
            PageAction::ShowSettings,
            "Showing settings",
            "Showing Settings",
        ),
        infallible(
            "settings",
            PageAction::ShowSettings,
            "Showing settings",
            "Showing Settings",
        ),
    ];
    for command in commands {
        set.insert(command);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_order_starts_with_navigation() {
        let set = base_commands();
        let first: Vec<&str> = set.iter().take(4).map(|c| c.pattern.as_str()).collect();
        assert_eq!(
            first,
            vec!["go to home", "go to cart", "go to checkout", "go back"]
        );
    }

    #[test]
    fn keys_are_unique_and_lowercase() {
        let set = base_commands();
        let mut seen = std::collections::HashSet::new();
        for cmd in set.iter() {
            assert_eq!(cmd.pattern, cmd.pattern.to_lowercase());
            assert!(seen.insert(cmd.pattern.clone()), "duplicate {}", cmd.pattern);
        }
    }

    #[test]
    fn only_search_is_a_wildcard() {
        let set = base_commands();
        let wildcards: Vec<&str> = set
            .iter()
            .filter(|c| c.capture)
            .map(|c| c.pattern.as_str())
            .collect();
        assert_eq!(wildcards, vec!["search for *"]);
    }

    #[test]
    fn fallible_commands_carry_error_feedback() {
        let set = base_commands();
        let add = set.get("add to cart").unwrap();
        assert!(add.err.is_some());
        let home = set.get("go to home").unwrap();
        assert!(home.err.is_none());
    }
}
