#![forbid(unsafe_code)]

//! Social share links.
//!
//! Facebook and Twitter get real share intents with the page URL (and title,
//! for Twitter) percent-encoded like `encodeURIComponent`. Instagram and
//! TripAdvisor have no share intent, so their configured profile pages are
//! opened instead. Every share opens in a popup of the configured size.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use vista_core::Surface;
use vista_runtime::config::{LinkConfig, UiConfig};

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Facebook,
    Twitter,
    Instagram,
    TripAdvisor,
}

impl SharePlatform {
    /// Platform by its lowercase name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "facebook" => Some(Self::Facebook),
            "twitter" => Some(Self::Twitter),
            "instagram" => Some(Self::Instagram),
            "tripadvisor" => Some(Self::TripAdvisor),
            _ => None,
        }
    }

    /// Share target for `url` and `title`.
    #[must_use]
    pub fn share_url(self, links: &LinkConfig, url: &str, title: &str) -> String {
        match self {
            Self::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={}", encode(url))
            }
            Self::Twitter => format!(
                "https://twitter.com/intent/tweet?url={}&text={}",
                encode(url),
                encode(title)
            ),
            Self::Instagram => links.instagram_url.clone(),
            Self::TripAdvisor => links.tripadvisor_url.clone(),
        }
    }
}

/// Open a share popup. Unknown platforms open nothing and return `None`.
pub fn share_on_social<S: Surface>(
    surface: &S,
    config: &UiConfig,
    platform: &str,
    url: &str,
    title: &str,
) -> Option<String> {
    let Some(platform) = SharePlatform::parse(platform) else {
        tracing::debug!(platform, "unknown share platform");
        return None;
    };
    let target = platform.share_url(&config.links, url, title);
    surface.open_window(&target, "_blank", Some(&config.links.share_popup_features));
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn facebook_encodes_url() {
        let links = LinkConfig::default();
        assert_eq!(
            SharePlatform::Facebook.share_url(&links, "https://bellavista.it/menu?day=1&lang=it", "x"),
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fbellavista.it%2Fmenu%3Fday%3D1%26lang%3Dit"
        );
    }

    #[test]
    fn twitter_encodes_title() {
        let links = LinkConfig::default();
        assert_eq!(
            SharePlatform::Twitter.share_url(&links, "https://bellavista.it/", "Pasta & Vino (tonight!)"),
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fbellavista.it%2F&text=Pasta%20%26%20Vino%20(tonight!)"
        );
    }

    #[test]
    fn non_ascii_is_utf8_encoded() {
        assert_eq!(encode("caffè"), "caff%C3%A8");
        assert_eq!(encode("a-b_c.d~e*f'g"), "a-b_c.d~e*f'g");
    }

    #[test]
    fn profile_fallbacks_ignore_inputs() {
        let links = LinkConfig::default();
        assert_eq!(
            SharePlatform::Instagram.share_url(&links, "https://x", "y"),
            "https://www.instagram.com/bellavista_restaurant"
        );
        assert_eq!(
            SharePlatform::TripAdvisor.share_url(&links, "https://x", "y"),
            "https://www.tripadvisor.com"
        );
    }

    #[test]
    fn platform_names() {
        assert_eq!(SharePlatform::parse("twitter"), Some(SharePlatform::Twitter));
        assert_eq!(SharePlatform::parse("Twitter"), None);
        assert_eq!(SharePlatform::parse("myspace"), None);
    }
}
