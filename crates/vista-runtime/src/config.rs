#![forbid(unsafe_code)]

//! UI configuration: thresholds, delays, external links, and messages.
//!
//! Every field defaults to the value the site shipped with, so
//! `UiConfig::default()` reproduces the stock behaviour. With the
//! `policy-config` feature a page can override any subset from TOML or JSON;
//! keys that are absent keep their defaults.
//!
//! ```toml
//! log_level = "debug"
//!
//! [animation]
//! parallax_throttle_ms = 16
//!
//! [messages]
//! contact_success = "Grazie! We will reply soon."
//! ```

use std::time::Duration;

#[cfg(feature = "policy-config")]
use serde::Deserialize;
#[cfg(feature = "policy-config")]
use vista_core::UiError;

/// Root configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Deserialize), serde(default))]
pub struct UiConfig {
    /// Level directive for the log subscriber (`"info"`, `"debug"`, ...).
    pub log_level: String,
    pub navigation: NavigationConfig,
    pub animation: AnimationConfig,
    pub gallery: GalleryConfig,
    pub toast: ToastConfig,
    pub links: LinkConfig,
    pub consent: ConsentConfig,
    pub messages: Messages,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            navigation: NavigationConfig::default(),
            animation: AnimationConfig::default(),
            gallery: GalleryConfig::default(),
            toast: ToastConfig::default(),
            links: LinkConfig::default(),
            consent: ConsentConfig::default(),
            messages: Messages::default(),
        }
    }
}

#[cfg(feature = "policy-config")]
impl UiConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, UiError> {
        toml::from_str(source).map_err(|e| UiError::Config(e.to_string()))
    }

    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json_str(source: &str) -> Result<Self, UiError> {
        serde_json::from_str(source).map_err(|e| UiError::Config(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Deserialize), serde(default))]
pub struct NavigationConfig {
    /// Scroll offset beyond which the header is sticky.
    pub sticky_threshold: f64,
    /// Height of the fixed header subtracted from anchor targets.
    pub header_offset: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sticky_threshold: 100.0,
            header_offset: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Deserialize), serde(default))]
pub struct AnimationConfig {
    pub fade_threshold: f64,
    pub fade_root_margin: String,
    /// Content block classes that fade in when first visible.
    pub fade_classes: Vec<String>,
    /// Hero translation per unit of page scroll.
    pub parallax_rate: f64,
    /// Minimum spacing between parallax updates; `None` updates on every tick.
    pub parallax_throttle_ms: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fade_threshold: 0.1,
            fade_root_margin: "0px 0px -50px 0px".into(),
            fade_classes: ["section", "feature-card", "info-card", "menu-item", "faq-item"]
                .map(String::from)
                .to_vec(),
            parallax_rate: -0.5,
            parallax_throttle_ms: None,
        }
    }
}

impl AnimationConfig {
    #[must_use]
    pub fn parallax_throttle(&self) -> Option<Duration> {
        self.parallax_throttle_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Deserialize), serde(default))]
pub struct GalleryConfig {
    /// Delay before non-matching items are removed from layout.
    pub hide_delay_ms: u64,
    /// Delay before matching items receive the `show` class.
    pub show_delay_ms: u64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: 300,
            show_delay_ms: 10,
        }
    }
}

impl GalleryConfig {
    #[must_use]
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    #[must_use]
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Deserialize), serde(default))]
pub struct ToastConfig {
    pub duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { duration_ms: 5000 }
    }
}

impl ToastConfig {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Deserialize), serde(default))]
pub struct LinkConfig {
    pub map_url: String,
    pub instagram_url: String,
    pub tripadvisor_url: String,
    /// Window features for share popups.
    pub share_popup_features: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            map_url: "https://maps.google.com".into(),
            instagram_url: "https://www.instagram.com/bellavista_restaurant".into(),
            tripadvisor_url: "https://www.tripadvisor.com".into(),
            share_popup_features: "width=600,height=400".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Deserialize), serde(default))]
pub struct ConsentConfig {
    /// Client-local storage key holding the decision.
    pub storage_key: String,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            storage_key: "cookieConsent".into(),
        }
    }
}

/// User-facing strings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Deserialize), serde(default))]
pub struct Messages {
    pub field_required: String,
    pub invalid_email: String,
    pub contact_success: String,
    pub reservation_success: String,
    pub newsletter_success: String,
    pub newsletter_invalid: String,
    pub skip_link: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            field_required: "This field is required".into(),
            invalid_email: "Please enter a valid email address".into(),
            contact_success:
                "Thank you for your message! We will get back to you within 24 hours.".into(),
            reservation_success:
                "Reservation request submitted! We will confirm your booking shortly.".into(),
            newsletter_success: "Thank you for subscribing to our newsletter!".into(),
            newsletter_invalid: "Please enter a valid email address.".into(),
            skip_link: "Skip to main content".into(),
        }
    }
}
