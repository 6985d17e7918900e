#![forbid(unsafe_code)]

//! Gallery filter and lightbox behaviour on the reference page.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tracing_test::traced_test;
use vista_core::{Selector, Surface, UiError};
use vista_harness::{El, MemorySurface, NodeId, boot, restaurant_page};
use vista_widgets::Component;

fn filter_button(dom: &MemorySurface, filter: &str) -> NodeId {
    dom.find(
        &Selector::class("gallery-category-btn").and(Selector::attr_eq("data-filter", filter)),
    )
}

fn displayed(dom: &MemorySurface, items: &[NodeId]) -> Vec<bool> {
    items
        .iter()
        .map(|item| dom.style(item, "display").as_deref() != Some("none"))
        .collect()
}

// ============================================================================
// Filter
// ============================================================================

#[test]
fn filter_marks_exactly_one_button_active() {
    let page = boot(MemorySurface::new(), restaurant_page());
    let dom = page.surface();
    dom.click(filter_button(dom, "mains"));
    let active: Vec<_> = dom
        .with_class("gallery-category-btn")
        .into_iter()
        .filter(|b| dom.has_class(b, "active"))
        .collect();
    assert_eq!(active, [filter_button(dom, "mains")]);
}

#[test]
fn filter_transitions_are_staged() {
    let page = boot(MemorySurface::new(), restaurant_page());
    let dom = page.surface();
    let items = dom.with_class("gallery-item");

    dom.click(filter_button(dom, "mains"));
    assert_eq!(dom.style(&items[0], "display").as_deref(), Some("block"));
    assert!(!dom.has_class(&items[0], "show"), "show waits for the reflow delay");
    assert!(!dom.has_class(&items[1], "show"));
    assert_eq!(displayed(dom, &items), [true; 5], "hiding waits for the fade");

    dom.advance_ms(10);
    assert!(dom.has_class(&items[0], "show"));
    assert!(dom.has_class(&items[2], "show"));

    dom.advance_ms(290);
    assert_eq!(displayed(dom, &items), [true, false, true, false, false]);
}

#[test]
fn quick_refilter_keeps_newly_admitted_items() {
    let page = boot(MemorySurface::new(), restaurant_page());
    let dom = page.surface();
    let items = dom.with_class("gallery-item");

    dom.click(filter_button(dom, "desserts"));
    dom.advance_ms(100);
    dom.click(filter_button(dom, "all"));
    dom.advance_ms(500);

    assert_eq!(displayed(dom, &items), [true; 5]);
    assert!(items.iter().all(|item| dom.has_class(item, "show")));
}

proptest! {
    #[test]
    fn settled_filter_shows_exactly_its_members(choices in proptest::collection::vec(
        prop_oneof![Just("all"), Just("mains"), Just("desserts")],
        1..6,
    )) {
        let page = boot(MemorySurface::new(), restaurant_page());
        let dom = page.surface();
        let items = dom.with_class("gallery-item");
        for choice in &choices {
            dom.click(filter_button(dom, choice));
            dom.advance_ms(50);
        }
        dom.advance_ms(300);

        let last = *choices.last().expect("non-empty");
        for item in &items {
            let member = last == "all" || dom.has_class(item, last);
            prop_assert_eq!(dom.style(item, "display").as_deref() != Some("none"), member);
            prop_assert_eq!(dom.has_class(item, "show"), member);
        }
    }
}

// ============================================================================
// Lightbox
// ============================================================================

fn open_on(dom: &MemorySurface, item: NodeId) {
    dom.click(item);
}

fn title(dom: &MemorySurface) -> String {
    dom.text(&dom.by_id("lightbox-title"))
}

fn is_open(dom: &MemorySurface) -> bool {
    dom.style(&dom.by_id("lightbox"), "display").as_deref() == Some("flex")
}

#[test]
fn arrows_navigate_and_escape_closes() {
    let page = boot(MemorySurface::new(), restaurant_page());
    let dom = page.surface();
    let items = dom.with_class("gallery-item");

    open_on(dom, items[0]);
    assert_eq!(title(dom), "Osso Buco");
    assert_eq!(
        dom.text(&dom.by_id("lightbox-description")),
        "Braised veal shank"
    );

    dom.key_down("ArrowLeft");
    assert_eq!(title(dom), "Cannoli", "previous wraps to the end");
    dom.key_down("ArrowRight");
    dom.key_down("ArrowRight");
    assert_eq!(title(dom), "Tiramisu");

    dom.key_down("Escape");
    assert!(!is_open(dom));
    assert_eq!(dom.style(&dom.body(), "overflow").as_deref(), Some("auto"));

    dom.key_down("ArrowRight");
    assert_eq!(title(dom), "Tiramisu", "arrows ignored while closed");
}

#[test]
fn prev_button_walks_backwards() {
    let page = boot(MemorySurface::new(), restaurant_page());
    let dom = page.surface();
    let items = dom.with_class("gallery-item");
    open_on(dom, items[2]);
    dom.click(dom.with_class("lightbox-prev")[0]);
    assert_eq!(title(dom), "Tiramisu");
}

#[test]
fn backdrop_click_closes_but_content_click_does_not() {
    let page = boot(MemorySurface::new(), restaurant_page());
    let dom = page.surface();
    let items = dom.with_class("gallery-item");
    open_on(dom, items[1]);

    dom.click(dom.by_id("lightbox-image"));
    assert!(is_open(dom));
    dom.click(dom.by_id("lightbox"));
    assert!(!is_open(dom));
}

#[test]
fn close_button_closes() {
    let page = boot(MemorySurface::new(), restaurant_page());
    let dom = page.surface();
    open_on(dom, dom.with_class("gallery-item")[4]);
    dom.click(dom.with_class("lightbox-close")[0]);
    assert!(!is_open(dom));
    assert_eq!(dom.style(&dom.body(), "overflow").as_deref(), Some("auto"));
}

#[test]
fn snapshot_is_fixed_at_open_time() {
    let page = boot(MemorySurface::new(), restaurant_page());
    let dom = page.surface();
    let items = dom.with_class("gallery-item");
    dom.click(filter_button(dom, "mains"));
    dom.advance_ms(300);
    open_on(dom, items[0]);

    // Changing the filter behind the open lightbox does not re-filter it.
    dom.click(filter_button(dom, "all"));
    dom.key_down("ArrowRight");
    assert_eq!(title(dom), "Risotto alla Milanese");
    dom.key_down("ArrowRight");
    assert_eq!(title(dom), "Osso Buco");
}

#[test]
fn item_fading_out_does_not_open() {
    let page = boot(MemorySurface::new(), restaurant_page());
    let dom = page.surface();
    let items = dom.with_class("gallery-item");
    dom.click(filter_button(dom, "desserts"));
    // Still displayed for the 300 ms fade, but outside the active filter.
    open_on(dom, items[0]);
    assert!(!is_open(dom));
}

#[test]
fn global_escape_and_lightbox_escape_agree() {
    let page = boot(MemorySurface::new(), restaurant_page());
    let dom = page.surface();
    let items = dom.with_class("gallery-item");
    open_on(dom, items[1]);
    let modal = dom.by_id("private-dining");
    dom.set_style(&modal, "display", "flex");

    dom.key_down("Escape");
    assert!(!is_open(dom));
    assert_eq!(dom.style(&modal, "display").as_deref(), Some("none"));

    // Reopening works normally after the double close.
    open_on(dom, items[3]);
    assert!(is_open(dom));
    assert_eq!(title(dom), "Panna Cotta");
}

// ============================================================================
// Malformed markup
// ============================================================================

fn gallery_item(category: &str, inner: Vec<El>) -> El {
    El::new("div").class("gallery-item").class(category).children(inner)
}

#[test]
fn lightbox_missing_children_is_a_gallery_failure_only() {
    let markup = vec![
        El::new("button")
            .class("gallery-category-btn active")
            .attr("data-filter", "all"),
        gallery_item("mains", vec![El::new("img"), El::new("h3"), El::new("p")]),
        El::new("div").id("lightbox").child(El::new("img").id("lightbox-image")),
        El::new("button").class("category-btn").attr("data-category", "dolci"),
        El::new("div").id("dolci").class("menu-section"),
    ];
    let page = boot(MemorySurface::new(), markup);
    let dom = page.surface();

    let failures = page.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, Component::Gallery);
    assert!(matches!(failures[0].1, UiError::MissingElement { .. }));

    // Later components are still wired.
    dom.click(dom.with_class("category-btn")[0]);
    assert!(dom.has_class(&dom.by_id("dolci"), "active"));
    // The filter was wired before the lightbox check failed.
    dom.click(dom.with_class("gallery-category-btn")[0]);
    dom.advance_ms(10);
    assert!(dom.has_class(&dom.with_class("gallery-item")[0], "show"));
}

#[test]
#[traced_test]
fn item_without_caption_is_skipped() {
    let mut markup = restaurant_page();
    markup.push(gallery_item("mains", vec![El::new("img"), El::new("h3").text("Ghost")]));
    let page = boot(MemorySurface::new(), markup);
    let dom = page.surface();
    let broken = *dom.with_class("gallery-item").last().expect("appended item");

    open_on(dom, broken);
    assert!(!is_open(dom));
    assert!(logs_contain("gallery item cannot be shown"));
}
