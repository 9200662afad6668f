#![allow(dead_code)]

use parking_lot::Mutex;
use std::sync::Arc;
use voxcart_dom::{Element, MemoryPage};
use voxcart_speech::SpeechPlayback;

/// Playback that records what was spoken.
#[derive(Default)]
pub struct RecordingPlayback {
    lines: Mutex<Vec<String>>,
}

impl RecordingPlayback {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl SpeechPlayback for RecordingPlayback {
    fn speak(&self, text: &str) {
        self.lines.lock().push(text.to_string());
    }
}

/// A storefront page with the targets the built-in vocabulary expects.
pub fn storefront_page() -> MemoryPage {
    let page = MemoryPage::new();
    page.insert(Element::new("button").attr("aria-label", "Menu").text("Menu"));
    page.insert(Element::new("button").attr("name", "add").text("Add to cart"));
    page.insert(
        Element::new("input")
            .attr("type", "search")
            .attr("name", "q")
            .attr("placeholder", "Search products"),
    );
    page.insert(Element::new("div").class("product-price").text("$49.00"));
    page.insert(Element::new("div").class("cart__total").text("$98.00"));
    page.insert(
        Element::new("div")
            .class("product-description")
            .text("A dimmable bedside lamp."),
    );
    page.insert(Element::new("a").attr("href", "/pages/contact").text("Get in touch"));
    page.insert(
        Element::new("input")
            .attr("type", "email")
            .class("newsletter-input")
            .attr("placeholder", "Email address"),
    );
    page.insert(Element::new("button").class("subscribe-button").text("Subscribe"));
    page
}
