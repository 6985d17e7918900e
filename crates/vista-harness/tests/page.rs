#![forbid(unsafe_code)]

//! Per-component behaviour on the reference page.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use tracing_test::traced_test;
use vista_core::{ScrollBehavior, Selector, Surface, VisibilityOptions};
use vista_harness::{El, MemorySurface, OpenedWindow, boot, boot_with, restaurant_page};
use vista_runtime::UiConfig;
use vista_widgets::Severity;

fn page() -> vista_widgets::Controller<MemorySurface> {
    boot(MemorySurface::new(), restaurant_page())
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn hamburger_toggles_and_links_close() {
    let page = page();
    let dom = page.surface();
    let (hamburger, menu) = (dom.by_id("hamburger"), dom.with_class("nav-menu")[0]);

    dom.click(hamburger);
    assert!(dom.has_class(&hamburger, "active") && dom.has_class(&menu, "active"));
    dom.click(hamburger);
    assert!(!dom.has_class(&menu, "active"));

    dom.click(hamburger);
    dom.click(dom.with_class("nav-link")[2]);
    assert!(!dom.has_class(&hamburger, "active") && !dom.has_class(&menu, "active"));
}

#[test]
fn header_sticks_strictly_past_threshold() {
    let page = page();
    let dom = page.surface();
    let header = dom.with_class("header")[0];
    dom.scroll_window(100.0);
    assert!(!dom.has_class(&header, "sticky"));
    dom.scroll_window(101.0);
    assert!(dom.has_class(&header, "sticky"));
    dom.scroll_window(20.0);
    assert!(!dom.has_class(&header, "sticky"));
}

#[test]
fn anchor_links_scroll_smoothly_below_header() {
    let page = page();
    let dom = page.surface();
    let about = dom.find(&Selector::tag("a").and(Selector::attr_eq("href", "#about")));
    assert!(dom.click(about), "anchor navigation is suppressed");
    assert_eq!(dom.scroll_requests(), [(520.0, ScrollBehavior::Smooth)]);

    let external = dom.find(&Selector::tag("a").and(Selector::attr_eq("href", "menu.html")));
    assert!(!dom.click(external));
}

#[test]
fn anchor_to_missing_target_is_still_suppressed() {
    let markup = vec![El::new("a").attr("href", "#nowhere").text("Nowhere")];
    let page = boot(MemorySurface::new(), markup);
    let dom = page.surface();
    let nowhere = dom.find(&Selector::tag("a").and(Selector::attr_eq("href", "#nowhere")));
    assert!(dom.click(nowhere));
    assert!(dom.scroll_requests().is_empty());
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn parallax_tracks_scroll() {
    let page = page();
    let dom = page.surface();
    let hero = dom.with_class("hero")[0];
    dom.scroll_window(200.0);
    assert_eq!(dom.style(&hero, "transform").as_deref(), Some("translateY(-100px)"));
    dom.scroll_window(0.0);
    assert_eq!(dom.style(&hero, "transform").as_deref(), Some("translateY(0px)"));
}

#[test]
fn throttled_parallax_drops_bursts() {
    let mut config = UiConfig::default();
    config.animation.parallax_throttle_ms = Some(50);
    let page = boot_with(MemorySurface::new(), restaurant_page(), config);
    let dom = page.surface();
    let hero = dom.with_class("hero")[0];

    dom.scroll_window(100.0);
    dom.scroll_window(200.0);
    assert_eq!(dom.style(&hero, "transform").as_deref(), Some("translateY(-50px)"));
    dom.advance_ms(50);
    dom.scroll_window(300.0);
    assert_eq!(dom.style(&hero, "transform").as_deref(), Some("translateY(-150px)"));
}

#[test]
fn blocks_fade_in_once() {
    let page = page();
    let dom = page.surface();
    let about = dom.by_id("about");
    let card = dom.with_class("feature-card")[0];

    assert_eq!(
        dom.observer_options()[0],
        VisibilityOptions {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".into(),
        }
    );
    assert!(dom.is_observed(card));
    dom.report_visibility(card, false, 0.0);
    assert!(!dom.has_class(&card, "animate-in"));
    assert!(dom.is_observed(card));

    dom.reveal(about);
    assert!(dom.has_class(&about, "animate-in"));
    assert!(!dom.is_observed(about), "one-shot");
    dom.remove_class(&about, "animate-in");
    dom.reveal(about);
    assert!(!dom.has_class(&about, "animate-in"));
}

// ============================================================================
// Menu, reservation, contact
// ============================================================================

#[test]
fn menu_category_selects_one_section() {
    let page = page();
    let dom = page.surface();
    let buttons = dom.with_class("category-btn");
    let (antipasti, dolci) = (dom.by_id("antipasti"), dom.by_id("dolci"));

    dom.click(buttons[1]);
    assert!(dom.has_class(&buttons[1], "active") && !dom.has_class(&buttons[0], "active"));
    assert!(dom.has_class(&dolci, "active") && !dom.has_class(&antipasti, "active"));

    dom.click(buttons[1]);
    assert!(dom.has_class(&dolci, "active"), "reselecting is stable");
}

#[test]
fn reservation_date_cannot_be_in_the_past() {
    let surface = MemorySurface::new();
    surface.clock().set_today("2026-10-17");
    let page = boot(surface, restaurant_page());
    let dom = page.surface();
    assert_eq!(
        dom.attribute(&dom.by_id("reservation-date"), "min").as_deref(),
        Some("2026-10-17")
    );
}

#[test]
fn time_slots_are_single_select_and_mirrored() {
    let page = page();
    let dom = page.surface();
    let slots = dom.with_class("time-slot");
    let time = dom.by_id("reservation-time");

    dom.click(slots[0]);
    assert_eq!(dom.value(&time), "19:00");
    dom.click(slots[1]);
    assert!(dom.has_class(&slots[1], "selected") && !dom.has_class(&slots[0], "selected"));
    assert_eq!(dom.value(&time), "20:30", "falls back to trimmed text");
}

#[test]
fn map_link_opens_new_context() {
    let page = page();
    let dom = page.surface();
    assert!(dom.click(dom.with_class("map-link")[0]));
    assert_eq!(
        dom.opened_windows(),
        [OpenedWindow {
            url: "https://maps.google.com".into(),
            target: "_blank".into(),
            features: None,
        }]
    );
}

// ============================================================================
// Accessibility
// ============================================================================

#[test]
fn skip_link_is_first_and_focusable() {
    let page = page();
    let dom = page.surface();
    let first = dom.children_of(dom.body())[0];
    assert!(dom.has_class(&first, "skip-link"));
    assert_eq!(dom.attribute(&first, "href").as_deref(), Some("#main-content"));
    assert_eq!(dom.text(&first), "Skip to main content");
    assert_eq!(dom.with_class("skip-link").len(), 1);

    dom.focus(first);
    assert!(dom.has_class(&first, "focused"));
    dom.blur(first);
    assert!(!dom.has_class(&first, "focused"));
}

#[test]
fn focus_ring_skips_negative_tabindex() {
    let markup = vec![
        El::new("div").id("skip").attr("tabindex", "-1"),
        El::new("div").id("stop").attr("tabindex", "0"),
    ];
    let page = boot(MemorySurface::new(), markup);
    let dom = page.surface();
    let (skip, stop) = (dom.by_id("skip"), dom.by_id("stop"));
    dom.focus(skip);
    dom.focus(stop);
    assert!(!dom.has_class(&skip, "focused"));
    assert!(dom.has_class(&stop, "focused"));
}

#[test]
fn escape_closes_open_modals_only() {
    let page = page();
    let dom = page.surface();
    let modal = dom.by_id("private-dining");

    dom.key_down("Escape");
    assert_eq!(dom.style(&modal, "display"), None, "closed modals untouched");
    assert_eq!(dom.style(&dom.body(), "overflow"), None);

    dom.set_style(&modal, "display", "flex");
    dom.set_style(&dom.body(), "overflow", "hidden");
    dom.key_down("Enter");
    assert_eq!(dom.style(&modal, "display").as_deref(), Some("flex"));
    dom.key_down("Escape");
    assert_eq!(dom.style(&modal, "display").as_deref(), Some("none"));
    assert_eq!(dom.style(&dom.body(), "overflow").as_deref(), Some("auto"));
}

// ============================================================================
// Lazy images
// ============================================================================

#[test]
fn lazy_image_loads_on_first_view() {
    let page = page();
    let dom = page.surface();
    let img = dom.find(&Selector::tag("img").and(Selector::attr("data-src")));
    assert_eq!(dom.attribute(&img, "src"), None);

    dom.report_visibility(img, false, 0.0);
    assert_eq!(dom.attribute(&img, "src"), None);

    dom.reveal(img);
    assert_eq!(dom.attribute(&img, "src").as_deref(), Some("images/terrace.jpg"));
    assert!(!dom.has_class(&img, "lazy"));
    assert!(!dom.is_observed(img));
}

// ============================================================================
// Consent
// ============================================================================

#[test]
fn decline_is_a_decision_too() {
    let page = page();
    let dom = page.surface();
    dom.click(dom.with_class("decline-cookies")[0]);
    assert_eq!(
        dom.storage_get("cookieConsent").as_deref(),
        Some("declined")
    );
    let banner = dom.by_id("cookie-consent");
    assert_eq!(dom.style(&banner, "display").as_deref(), Some("none"));
}

#[test]
fn empty_stored_value_still_prompts() {
    let page = boot(
        MemorySurface::with_storage([("cookieConsent", "")]),
        restaurant_page(),
    );
    let dom = page.surface();
    let banner = dom.by_id("cookie-consent");
    assert_eq!(dom.style(&banner, "display").as_deref(), Some("block"));
}

#[test]
#[traced_test]
fn storage_failure_still_hides_banner() {
    let surface = MemorySurface::new();
    surface.fail_storage_writes();
    let page = boot(surface, restaurant_page());
    let dom = page.surface();
    dom.click(dom.with_class("accept-cookies")[0]);

    let banner = dom.by_id("cookie-consent");
    assert_eq!(dom.style(&banner, "display").as_deref(), Some("none"));
    assert_eq!(dom.storage_get("cookieConsent"), None);
    assert!(logs_contain("consent decision not persisted"));
}

// ============================================================================
// Newsletter
// ============================================================================

#[test]
fn newsletter_success_and_error_toasts() {
    let page = page();
    let dom = page.surface();
    let form = dom.by_id("newsletter-form");
    let email = dom
        .query_first_within(&form, &Selector::attr_eq("type", "email"))
        .expect("email input");

    assert!(dom.submit(form));
    let toast = dom.with_class("message")[0];
    assert_eq!(dom.text(&toast), "Please enter a valid email address.");
    assert!(dom.has_class(&toast, "message-error"));

    dom.set_value(&email, "ada@example.com");
    dom.submit(form);
    let toasts = dom.with_class("message");
    assert_eq!(toasts.len(), 1, "second toast replaces the first");
    assert_eq!(
        dom.text(&toasts[0]),
        "Thank you for subscribing to our newsletter!"
    );
    assert_eq!(dom.value(&email), "");
}

#[test]
fn newsletter_without_email_field_rejects() {
    let markup = vec![El::new("form").id("newsletter-form")];
    let page = boot(MemorySurface::new(), markup);
    let dom = page.surface();
    dom.submit(dom.by_id("newsletter-form"));
    assert!(dom.has_class(&dom.with_class("message")[0], "message-error"));
}

// ============================================================================
// Utilities exposed by the controller
// ============================================================================

#[test]
fn toasts_replace_and_expire_independently() {
    let page = page();
    let dom = page.surface();
    let first = page.show_message("One", Severity::Info).expect("toast");
    dom.advance_ms(3_000);
    let second = page.show_message("Two", Severity::Error).expect("toast");
    assert!(!dom.is_attached(first));
    assert_eq!(dom.with_class("message"), [second]);

    // The first toast's timer fires at 5000 ms; it must not touch the second.
    dom.advance_ms(2_000);
    assert!(dom.is_attached(second));
    dom.advance_ms(3_000);
    assert!(!dom.is_attached(second));
    assert!(dom.has_class(&first, "message-info"));
}

#[test]
fn share_opens_sized_popup() {
    let page = page();
    let dom = page.surface();
    let url = page.share_on_social("twitter", "https://bellavista.it/", "Bella Vista");
    assert_eq!(
        url.as_deref(),
        Some("https://twitter.com/intent/tweet?url=https%3A%2F%2Fbellavista.it%2F&text=Bella%20Vista")
    );
    assert_eq!(page.share_on_social("myspace", "https://x", "y"), None);
    let opened = dom.opened_windows();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].features.as_deref(), Some("width=600,height=400"));
    assert_eq!(opened[0].target, "_blank");
}

#[test]
fn print_delegates_to_surface() {
    let page = page();
    page.print_page();
    assert_eq!(page.surface().print_count(), 1);
}

// ============================================================================
// Diagnostics and lifecycle
// ============================================================================

#[test]
#[traced_test]
fn top_level_errors_are_logged_and_swallowed() {
    let page = page();
    let dom = page.surface();
    dom.fire_error("ReferenceError: foo is not defined");
    dom.fire_rejection("network down");
    assert!(logs_contain("ReferenceError: foo is not defined"));
    assert!(logs_contain("unhandled promise rejection"));
}

#[test]
#[traced_test]
fn load_time_is_logged() {
    let page = page();
    let dom = page.surface();
    dom.advance_ms(1_250);
    dom.fire_load();
    assert!(logs_contain("page loaded"));
    assert!(logs_contain("elapsed_ms=1250"));
}

#[test]
fn empty_page_wires_without_failures() {
    let page = boot(MemorySurface::new(), Vec::new());
    assert!(page.failures().is_empty());
    // Skip link plus window/document listeners only.
    assert_eq!(page.surface().with_class("skip-link").len(), 1);
}

#[test]
fn dropping_the_controller_releases_the_page() {
    let page = page();
    let weak = Rc::downgrade(page.surface());
    assert!(page.surface().listener_count() > 0);
    drop(page);
    assert!(weak.upgrade().is_none(), "no handler keeps the page alive");
}
