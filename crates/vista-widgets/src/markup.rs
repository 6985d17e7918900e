#![forbid(unsafe_code)]

//! Element ids, classes, and attributes the page markup provides.
//!
//! Components look nodes up only through these names. Optional nodes that are
//! absent turn the owning component into a no-op.

pub mod ids {
    pub const HAMBURGER: &str = "hamburger";
    pub const CONTACT_FORM: &str = "contactForm";
    pub const RESERVATION_FORM: &str = "reservationForm";
    pub const NEWSLETTER_FORM: &str = "newsletter-form";
    pub const LIGHTBOX: &str = "lightbox";
    pub const LIGHTBOX_IMAGE: &str = "lightbox-image";
    pub const LIGHTBOX_TITLE: &str = "lightbox-title";
    pub const LIGHTBOX_DESCRIPTION: &str = "lightbox-description";
    pub const RESERVATION_DATE: &str = "reservation-date";
    pub const RESERVATION_TIME: &str = "reservation-time";
    pub const COOKIE_CONSENT: &str = "cookie-consent";
    pub const MAIN_CONTENT: &str = "main-content";
}

pub mod classes {
    pub const ACTIVE: &str = "active";
    pub const STICKY: &str = "sticky";
    pub const SHOW: &str = "show";
    pub const SELECTED: &str = "selected";
    pub const FOCUSED: &str = "focused";
    pub const ANIMATE_IN: &str = "animate-in";
    pub const LAZY: &str = "lazy";
    pub const ERROR: &str = "error";
    pub const FIELD_ERROR: &str = "field-error";
    pub const MESSAGE: &str = "message";
    pub const SKIP_LINK: &str = "skip-link";

    pub const NAV_MENU: &str = "nav-menu";
    pub const NAV_LINK: &str = "nav-link";
    pub const HEADER: &str = "header";
    pub const HERO: &str = "hero";
    pub const PAGE_HERO: &str = "page-hero";

    pub const GALLERY_FILTER: &str = "gallery-category-btn";
    pub const GALLERY_ITEM: &str = "gallery-item";
    pub const LIGHTBOX_CLOSE: &str = "lightbox-close";
    pub const LIGHTBOX_PREV: &str = "lightbox-prev";
    pub const LIGHTBOX_NEXT: &str = "lightbox-next";
    pub const LIGHTBOX: &str = "lightbox";
    pub const MODAL: &str = "modal";

    pub const MENU_CATEGORY: &str = "category-btn";
    pub const MENU_SECTION: &str = "menu-section";
    pub const TIME_SLOT: &str = "time-slot";
    pub const MAP_LINK: &str = "map-link";
    pub const ACCEPT_COOKIES: &str = "accept-cookies";
    pub const DECLINE_COOKIES: &str = "decline-cookies";
}

pub mod attrs {
    pub const FILTER: &str = "data-filter";
    pub const CATEGORY: &str = "data-category";
    pub const TIME: &str = "data-time";
    pub const LAZY_SRC: &str = "data-src";
}
