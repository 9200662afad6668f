//! Selector catalog: intent -> ordered DOM lookups.

use std::collections::HashMap;
use voxcart_dom::{DomPage, NodeId};

/// Ordered selector lists per intent, tolerant of storefront markup
/// variation. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct SelectorCatalog {
    intents: HashMap<String, Vec<String>>,
}

impl SelectorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, intent: &str, selectors: &[&str]) {
        self.intents.insert(
            intent.to_string(),
            selectors.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Tries each selector for the intent in order; first live element wins.
    pub fn resolve(&self, page: &dyn DomPage, intent: &str) -> Option<NodeId> {
        let selectors = self.intents.get(intent)?;
        selectors.iter().find_map(|sel| page.query(sel))
    }

    /// Catalog covering every intent the built-in vocabulary uses.
    pub fn storefront() -> Self {
        let mut catalog = Self::new();
        catalog.insert(
            "menu-toggle",
            &[
                "[aria-label=Menu]",
                "[aria-label=menu]",
                ".menu-button",
                ".hamburger",
                ".navbar-toggle",
                "button.menu",
                ".menu-toggle",
            ],
        );
        catalog.insert(
            "add-to-cart",
            &[
                "[name=add]",
                ".add-to-cart",
                "[data-action=add-to-cart]",
                "[data-add-to-cart]",
                ".product-form__cart-submit",
                ".add_to_cart",
                "#AddToCart",
                ".product-form__add-to-cart",
                ".btn--add-to-cart",
            ],
        );
        catalog.insert(
            "buy-now",
            &[
                "[name=checkout]",
                "[data-action=checkout]",
                ".checkout-button",
                ".buy-now",
            ],
        );
        catalog.insert(
            "first-product",
            &[
                "a.product-grid-item",
                "a.product-item",
                "a.product-card",
                ".product-link",
            ],
        );
        catalog.insert(
            "quantity-increase",
            &[
                "[data-action=increase-quantity]",
                "[name=plus]",
                ".quantity-up",
                ".quantity__button--plus",
            ],
        );
        catalog.insert(
            "quantity-decrease",
            &[
                "[data-action=decrease-quantity]",
                "[name=minus]",
                ".quantity-down",
                ".quantity__button--minus",
            ],
        );
        catalog.insert(
            "price-filter",
            &[
                "[data-filter-price]",
                "[data-sort-by=price-ascending]",
                "[data-option-filter=price]",
            ],
        );
        catalog.insert(
            "sort-newest",
            &[
                "[data-sort-by=created-descending]",
                "[data-value=created-descending]",
                "[data-option=newest]",
            ],
        );
        catalog.insert(
            "sort-price",
            &["[data-sort-by=price-ascending]", "[data-value=price-ascending]"],
        );
        catalog.insert(
            "reviews-tab",
            &[
                "[data-tab=reviews]",
                ".product-reviews-tab",
                ".reviews-link",
                "a[href=#reviews]",
            ],
        );
        catalog.insert(
            "cart-total",
            &[
                ".cart_subtotal",
                ".totals_subtotal-value",
                ".cart-subtotal__price",
                ".cart__total",
            ],
        );
        catalog.insert(
            "dropdown-toggle",
            &["[aria-haspopup=true]", ".dropdown-toggle"],
        );
        catalog.insert(
            "popup-close",
            &[
                "[aria-label=Close]",
                ".modal-close",
                ".popup-close",
                ".drawer__close",
            ],
        );
        catalog.insert("video", &["video"]);
        catalog.insert(
            "slide-next",
            &[
                ".slick-next",
                ".carousel-next",
                ".swiper-button-next",
                "[data-slide=next]",
                ".flickity-next",
            ],
        );
        catalog.insert(
            "slide-prev",
            &[
                ".slick-prev",
                ".carousel-prev",
                ".swiper-button-prev",
                "[data-slide=prev]",
                ".flickity-prev",
            ],
        );
        catalog.insert("zoom-in", &[".zoom-in", "[data-zoom=in]", ".product-zoom"]);
        catalog.insert("zoom-out", &[".zoom-out", "[data-zoom=out]"]);
        catalog.insert(
            "form-submit",
            &["button[type=submit]", "input[type=submit]"],
        );
        catalog.insert(
            "search-input",
            &[
                "input[type=search]",
                "[name=q]",
                ".search-input",
                ".search__input",
            ],
        );
        catalog.insert(
            "product-description",
            &[
                ".product-description",
                ".product__description",
                ".description",
                "[itemprop=description]",
            ],
        );
        catalog.insert(
            "product-price",
            &[
                ".product-price",
                ".product__price",
                ".price",
                "[itemprop=price]",
            ],
        );
        catalog.insert(
            "newsletter-email",
            &[".newsletter-input", ".subscribe-email", "input[type=email]"],
        );
        catalog.insert(
            "newsletter-submit",
            &[".subscribe-button", ".newsletter-submit", "[name=subscribe]"],
        );
        catalog.insert(
            "dark-mode-toggle",
            &["[data-theme-toggle]", ".theme-switch", ".dark-mode-toggle"],
        );
        catalog
    }
}
