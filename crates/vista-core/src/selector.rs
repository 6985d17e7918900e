#![forbid(unsafe_code)]

//! Backend-neutral element selectors.
//!
//! A [`Selector`] is built in Rust, rendered to CSS for the browser backend
//! ([`Selector::to_css`]), and evaluated directly by in-memory backends
//! ([`Selector::matches`]). Both paths must agree; the tests pin the CSS
//! rendering of every selector the widgets use.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `Or` nested in `And` | Compound of alternatives | Rendered as `:is(...)` |
//! | Quote in attribute value | `"` in `AttrEquals` value | Escaped as `\"` |

/// Element predicate over tag, id, classes, and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Tag(String),
    Class(String),
    Id(String),
    HasAttr(String),
    AttrEquals(String, String),
    AttrPrefix(String, String),
    Not(Box<Selector>),
    /// Every part must hold on the same element.
    And(Vec<Selector>),
    /// Any part may hold.
    Or(Vec<Selector>),
}

/// Read access to the parts of an element a selector can test.
pub trait Matchable {
    fn tag(&self) -> &str;
    fn id(&self) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl Selector {
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }

    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    #[must_use]
    pub fn id(name: impl Into<String>) -> Self {
        Self::Id(name.into())
    }

    #[must_use]
    pub fn attr(name: impl Into<String>) -> Self {
        Self::HasAttr(name.into())
    }

    #[must_use]
    pub fn attr_eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::AttrEquals(name.into(), value.into())
    }

    #[must_use]
    pub fn attr_prefix(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::AttrPrefix(name.into(), prefix.into())
    }

    /// Alternatives: matches when any part matches.
    #[must_use]
    pub fn any(parts: impl IntoIterator<Item = Selector>) -> Self {
        Self::Or(parts.into_iter().collect())
    }

    /// Selector list of plain classes (`.a, .b, .c`).
    #[must_use]
    pub fn any_class(classes: &[&str]) -> Self {
        Self::any(classes.iter().map(|c| Self::class(*c)))
    }

    /// Compound with `other` on the same element.
    #[must_use]
    pub fn and(self, other: Selector) -> Self {
        match self {
            Self::And(mut parts) => {
                parts.push(other);
                Self::And(parts)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Negation.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Evaluate against an element.
    pub fn matches(&self, el: &impl Matchable) -> bool {
        match self {
            Self::Tag(name) => el.tag().eq_ignore_ascii_case(name),
            Self::Class(name) => el.has_class(name),
            Self::Id(name) => el.id() == Some(name.as_str()),
            Self::HasAttr(name) => el.attribute(name).is_some(),
            Self::AttrEquals(name, value) => el.attribute(name) == Some(value.as_str()),
            Self::AttrPrefix(name, prefix) => el
                .attribute(name)
                .is_some_and(|v| v.starts_with(prefix.as_str())),
            Self::Not(inner) => !inner.matches(el),
            Self::And(parts) => parts.iter().all(|p| p.matches(el)),
            Self::Or(parts) => parts.iter().any(|p| p.matches(el)),
        }
    }

    /// Render as a CSS selector string.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Or(parts) => parts
                .iter()
                .map(Selector::to_css)
                .collect::<Vec<_>>()
                .join(", "),
            other => other.compound_css(),
        }
    }

    fn compound_css(&self) -> String {
        match self {
            Self::Tag(name) => name.clone(),
            Self::Class(name) => format!(".{name}"),
            Self::Id(name) => format!("#{name}"),
            Self::HasAttr(name) => format!("[{name}]"),
            Self::AttrEquals(name, value) => format!("[{name}=\"{}\"]", escape(value)),
            Self::AttrPrefix(name, value) => format!("[{name}^=\"{}\"]", escape(value)),
            Self::Not(inner) => format!(":not({})", inner.to_css()),
            Self::Or(_) => format!(":is({})", self.to_css()),
            Self::And(parts) => {
                // Type selectors must lead a compound.
                let (tags, rest): (Vec<&Selector>, Vec<&Selector>) =
                    parts.iter().partition(|p| matches!(p, Self::Tag(_)));
                tags.into_iter()
                    .chain(rest)
                    .map(Selector::compound_css)
                    .collect()
            }
        }
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    struct FakeElement {
        tag: &'static str,
        id: Option<&'static str>,
        classes: Vec<String>,
        attrs: Vec<(&'static str, &'static str)>,
    }

    impl FakeElement {
        fn new(tag: &'static str) -> Self {
            Self {
                tag,
                id: None,
                classes: Vec::new(),
                attrs: Vec::new(),
            }
        }
    }

    impl Matchable for FakeElement {
        fn tag(&self) -> &str {
            self.tag
        }
        fn id(&self) -> Option<&str> {
            self.id
        }
        fn has_class(&self, class: &str) -> bool {
            self.classes.iter().any(|c| c == class)
        }
        fn attribute(&self, name: &str) -> Option<&str> {
            self.attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
        }
    }

    #[test]
    fn css_for_widget_selectors() {
        assert_eq!(
            Selector::tag("a").and(Selector::attr_prefix("href", "#")).to_css(),
            "a[href^=\"#\"]"
        );
        assert_eq!(
            Selector::attr_eq("type", "email").and(Selector::tag("input")).to_css(),
            "input[type=\"email\"]"
        );
        assert_eq!(
            Selector::any_class(&["hero", "page-hero"]).to_css(),
            ".hero, .page-hero"
        );
        assert_eq!(
            Selector::attr("tabindex")
                .and(Selector::attr_eq("tabindex", "-1").negate())
                .to_css(),
            "[tabindex]:not([tabindex=\"-1\"])"
        );
        assert_eq!(
            Selector::class("gallery-category-btn")
                .and(Selector::class("active"))
                .to_css(),
            ".gallery-category-btn.active"
        );
    }

    #[test]
    fn nested_alternatives_use_is() {
        let sel = Selector::tag("img").and(Selector::any_class(&["a", "b"]));
        assert_eq!(sel.to_css(), "img:is(.a, .b)");
    }

    #[test]
    fn attribute_values_are_escaped() {
        assert_eq!(
            Selector::attr_eq("data-x", "say \"hi\"").to_css(),
            "[data-x=\"say \\\"hi\\\"\"]"
        );
    }

    #[test]
    fn matching_follows_structure() {
        let mut link = FakeElement::new("A");
        link.attrs.push(("href", "#menu"));
        let anchor = Selector::tag("a").and(Selector::attr_prefix("href", "#"));
        assert!(anchor.matches(&link));

        link.attrs[0].1 = "/menu.html";
        assert!(!anchor.matches(&link));

        let mut skip = FakeElement::new("div");
        skip.attrs.push(("tabindex", "-1"));
        let tab_stop = Selector::attr("tabindex").and(Selector::attr_eq("tabindex", "-1").negate());
        assert!(!tab_stop.matches(&skip));
        skip.attrs[0].1 = "0";
        assert!(tab_stop.matches(&skip));
    }

    #[test]
    fn id_selector() {
        let mut el = FakeElement::new("section");
        el.id = Some("mains");
        assert!(Selector::id("mains").matches(&el));
        assert!(!Selector::id("desserts").matches(&el));
    }

    proptest! {
        #[test]
        fn class_selector_matches_iff_present(
            classes in proptest::collection::vec("[a-z]{1,6}", 0..5),
            wanted in "[a-z]{1,6}",
        ) {
            let mut el = FakeElement::new("div");
            el.classes = classes.clone();
            prop_assert_eq!(
                Selector::class(wanted.clone()).matches(&el),
                classes.contains(&wanted)
            );
        }
    }
}
