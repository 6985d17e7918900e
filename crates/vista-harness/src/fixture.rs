#![forbid(unsafe_code)]

//! Reference page markup.
//!
//! [`restaurant_page`] mirrors the structure the site templates render: a
//! sticky header with the mobile menu, hero, gallery with three filters and
//! five items, lightbox, menu categories, the contact and reservation forms,
//! a newsletter form, a cookie banner, one lazy image, and a modal.
//!
//! | Gallery item | Classes | Title |
//! |--------------|---------|-------|
//! | 0 | `mains` | Osso Buco |
//! | 1 | `desserts` | Tiramisu |
//! | 2 | `mains` | Risotto alla Milanese |
//! | 3 | `desserts` | Panna Cotta |
//! | 4 | `desserts` | Cannoli |

use std::rc::Rc;

use vista_runtime::UiConfig;
use vista_widgets::Controller;

use crate::dom::{El, MemorySurface};

/// Gallery items as `(categories, image, title, caption)`.
pub const GALLERY: [(&str, &str, &str, &str); 5] = [
    ("mains", "images/osso-buco.jpg", "Osso Buco", "Braised veal shank"),
    ("desserts", "images/tiramisu.jpg", "Tiramisu", "Mascarpone and espresso"),
    ("mains", "images/risotto.jpg", "Risotto alla Milanese", "Saffron risotto"),
    ("desserts", "images/panna-cotta.jpg", "Panna Cotta", "With berry coulis"),
    ("desserts", "images/cannoli.jpg", "Cannoli", "Sicilian ricotta"),
];

fn header() -> El {
    El::new("header").class("header").child(
        El::new("nav").children([
            El::new("div").id("hamburger").class("hamburger"),
            El::new("ul").class("nav-menu").children(
                [("#about", "About"), ("#gallery", "Gallery"), ("menu.html", "Menu")]
                    .map(|(href, label)| {
                        El::new("li").child(
                            El::new("a").class("nav-link").attr("href", href).text(label),
                        )
                    }),
            ),
        ]),
    )
}

fn gallery() -> El {
    let filters = [("all", "All"), ("mains", "Mains"), ("desserts", "Desserts")].map(
        |(filter, label)| {
            let button = El::new("button")
                .class("gallery-category-btn")
                .attr("data-filter", filter)
                .text(label);
            if filter == "all" {
                button.class("active")
            } else {
                button
            }
        },
    );
    let items = GALLERY.map(|(category, src, title, caption)| {
        El::new("div")
            .class("gallery-item")
            .class(category)
            .children([
                El::new("img").attr("src", src).attr("alt", title),
                El::new("div").class("gallery-overlay").children([
                    El::new("h3").text(title),
                    El::new("p").text(caption),
                ]),
            ])
    });
    El::new("section")
        .id("gallery")
        .class("section")
        .offset_top(1400.0)
        .children(filters)
        .child(El::new("div").class("gallery-grid").children(items))
}

fn lightbox() -> El {
    El::new("div").id("lightbox").class("lightbox").children([
        El::new("span").class("lightbox-close").text("×"),
        El::new("button").class("lightbox-prev").text("‹"),
        El::new("img").id("lightbox-image"),
        El::new("h3").id("lightbox-title"),
        El::new("p").id("lightbox-description"),
        El::new("button").class("lightbox-next").text("›"),
    ])
}

fn menu() -> El {
    El::new("section").class("menu").children([
        El::new("button")
            .class("category-btn active")
            .attr("data-category", "antipasti")
            .text("Antipasti"),
        El::new("button")
            .class("category-btn")
            .attr("data-category", "dolci")
            .text("Dolci"),
        El::new("div")
            .id("antipasti")
            .class("menu-section active")
            .child(El::new("div").class("menu-item").text("Bruschetta")),
        El::new("div")
            .id("dolci")
            .class("menu-section")
            .child(El::new("div").class("menu-item").text("Gelato")),
    ])
}

fn field(control: El) -> El {
    El::new("div").class("form-group").child(control)
}

fn contact_form() -> El {
    El::new("form").id("contactForm").children([
        field(El::new("input").attr("name", "name").attr("required", "")),
        field(
            El::new("input")
                .attr("type", "email")
                .attr("name", "email")
                .attr("required", ""),
        ),
        field(El::new("input").attr("type", "tel").attr("name", "phone")),
        field(El::new("textarea").attr("name", "message").attr("required", "")),
        El::new("button").attr("type", "submit").text("Send"),
    ])
}

fn reservation_form() -> El {
    El::new("form").id("reservationForm").children([
        field(
            El::new("input")
                .id("reservation-date")
                .attr("type", "date")
                .attr("required", ""),
        ),
        field(El::new("div").class("time-slots").children([
            El::new("div").class("time-slot").attr("data-time", "19:00").text("7:00 PM"),
            El::new("div").class("time-slot").text(" 20:30 "),
        ])),
        field(
            El::new("input")
                .id("reservation-time")
                .attr("type", "hidden")
                .attr("required", ""),
        ),
        field(
            El::new("input")
                .attr("type", "number")
                .attr("name", "guests")
                .attr("value", "2")
                .attr("required", ""),
        ),
        El::new("button").attr("type", "submit").text("Reserve"),
    ])
}

/// The full reference page, in document order under `body`.
#[must_use]
pub fn restaurant_page() -> Vec<El> {
    vec![
        header(),
        El::new("section").class("hero").child(El::new("h1").text("Bella Vista")),
        El::new("section")
            .id("about")
            .class("section")
            .offset_top(600.0)
            .child(El::new("div").class("feature-card").text("Fresh pasta daily")),
        El::new("main").id("main-content"),
        gallery(),
        lightbox(),
        menu(),
        El::new("section").id("contact").class("section").children([
            contact_form(),
            El::new("a")
                .class("map-link")
                .attr("href", "https://maps.google.com")
                .text("Get directions"),
        ]),
        reservation_form(),
        El::new("form").id("newsletter-form").children([
            El::new("input").attr("type", "email").attr("name", "newsletter"),
            El::new("button").attr("type", "submit").text("Subscribe"),
        ]),
        El::new("img")
            .class("lazy")
            .attr("data-src", "images/terrace.jpg")
            .attr("alt", "Terrace"),
        El::new("div").id("private-dining").class("modal"),
        El::new("div").id("cookie-consent").class("cookie-consent").children([
            El::new("button").class("accept-cookies").text("Accept"),
            El::new("button").class("decline-cookies").text("Decline"),
        ]),
    ]
}

/// Mount `markup` on `surface` and start a controller with default config.
#[must_use]
pub fn boot(surface: MemorySurface, markup: Vec<El>) -> Controller<MemorySurface> {
    boot_with(surface, markup, UiConfig::default())
}

/// Mount `markup` on `surface` and start a controller with `config`.
#[must_use]
pub fn boot_with(
    surface: MemorySurface,
    markup: Vec<El>,
    config: UiConfig,
) -> Controller<MemorySurface> {
    for el in markup {
        surface.mount(el);
    }
    Controller::start(Rc::new(surface), config)
}
