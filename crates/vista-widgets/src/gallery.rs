#![forbid(unsafe_code)]

//! Gallery category filter and lightbox slideshow.
//!
//! The lightbox is a two-state machine, `Closed` and `Open { snapshot, index }`.
//! Opening reads the active filter button, snapshots the gallery items that
//! filter admits, and points at the clicked item inside that snapshot.
//! Previous/next walk the snapshot with wraparound; they never re-filter.
//!
//! # Invariants
//!
//! 1. Exactly one filter button carries `active` after any filter click.
//! 2. While open, `index < snapshot.len()` and the snapshot is non-empty.
//! 3. Opening with an empty snapshot, or on an item outside the snapshot
//!    (e.g. clicked during its fade-out), is a no-op.
//! 4. Arrow keys and Escape are routed to the lightbox only while it is open.
//! 5. Delayed filter transitions re-check the active filter when they fire,
//!    so a quick re-filter never hides an item the newer filter admits.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | No active filter button | Markup default missing | Treated as `all` |
//! | Lightbox child missing | Malformed markup | `install` returns `UiError::MissingElement` |
//! | Item without `img`/`h3`/`p` | Malformed item | Logged, lightbox stays as it was |

use std::cell::RefCell;
use std::rc::Rc;

use vista_core::{EventFlow, EventKind, Selector, Surface, Target, UiError, UiEvent};
use vista_runtime::UiConfig;

use crate::markup::{attrs, classes, ids};
use crate::{after, handler, is_flex};

/// Category filter selected by a filter button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterTag {
    #[default]
    All,
    Category(String),
}

impl FilterTag {
    /// The `data-filter` value that admits every item.
    pub const ALL_SENTINEL: &'static str = "all";

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == Self::ALL_SENTINEL {
            Self::All
        } else {
            Self::Category(raw.to_owned())
        }
    }

    /// Whether an item tagged with `categories` passes this filter.
    pub fn admits<'a>(&self, categories: impl IntoIterator<Item = &'a str>) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => categories.into_iter().any(|c| c == wanted),
        }
    }

    /// Whether `item` passes this filter; categories are the item's classes.
    pub fn admits_node<S: Surface>(&self, surface: &S, item: &S::Node) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => surface.has_class(item, wanted),
        }
    }
}

/// Index after `index` in a sequence of `len`, wrapping; `None` when empty.
#[must_use]
pub fn next_index(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index + 1) % len)
}

/// Index before `index` in a sequence of `len`, wrapping; `None` when empty.
#[must_use]
pub fn prev_index(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index % len + len - 1) % len)
}

/// Lightbox state machine over item handles.
#[derive(Debug, Clone, PartialEq)]
pub enum LightboxState<N> {
    Closed,
    Open { snapshot: Vec<N>, index: usize },
}

impl<N> Default for LightboxState<N> {
    fn default() -> Self {
        Self::Closed
    }
}

impl<N: PartialEq> LightboxState<N> {
    /// Open on `clicked` within `snapshot`. Returns the shown item, or `None`
    /// (state unchanged) when `clicked` is not in a non-empty snapshot.
    pub fn open(&mut self, snapshot: Vec<N>, clicked: &N) -> Option<&N> {
        let index = snapshot.iter().position(|n| n == clicked)?;
        *self = Self::Open { snapshot, index };
        self.current()
    }

    /// Step forward with wraparound.
    pub fn next(&mut self) -> Option<&N> {
        self.step(next_index)
    }

    /// Step backward with wraparound.
    pub fn prev(&mut self) -> Option<&N> {
        self.step(prev_index)
    }

    fn step(&mut self, f: fn(usize, usize) -> Option<usize>) -> Option<&N> {
        if let Self::Open { snapshot, index } = self {
            *index = f(*index, snapshot.len())?;
        }
        self.current()
    }

    /// Close; returns whether it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = Self::Closed;
        was_open
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    #[must_use]
    pub fn current(&self) -> Option<&N> {
        match self {
            Self::Open { snapshot, index } => snapshot.get(*index),
            Self::Closed => None,
        }
    }

    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Open { index, .. } => Some(*index),
            Self::Closed => None,
        }
    }
}

/// Display fields of one gallery item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemContent {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub description: String,
}

/// Read the image, heading, and caption of a gallery item.
pub fn read_item<S: Surface>(surface: &S, item: &S::Node) -> Result<ItemContent, UiError> {
    let img = surface
        .query_first_within(item, &Selector::tag("img"))
        .ok_or_else(|| UiError::missing(".gallery-item img"))?;
    let title = surface
        .query_first_within(item, &Selector::tag("h3"))
        .ok_or_else(|| UiError::missing(".gallery-item h3"))?;
    let description = surface
        .query_first_within(item, &Selector::tag("p"))
        .ok_or_else(|| UiError::missing(".gallery-item p"))?;
    Ok(ItemContent {
        src: surface.attribute(&img, "src").unwrap_or_default(),
        alt: surface.attribute(&img, "alt").unwrap_or_default(),
        title: surface.text(&title),
        description: surface.text(&description),
    })
}

/// Filter named by the button currently marked active.
pub fn active_filter<S: Surface>(surface: &S) -> FilterTag {
    let active = Selector::class(classes::GALLERY_FILTER).and(Selector::class(classes::ACTIVE));
    surface
        .query(&active)
        .and_then(|button| surface.attribute(&button, attrs::FILTER))
        .map(|raw| FilterTag::parse(&raw))
        .unwrap_or_default()
}

/// Wire the filter buttons and the lightbox.
pub fn install<S: Surface + 'static>(surface: &Rc<S>, config: &Rc<UiConfig>) -> Result<(), UiError> {
    let buttons = surface.query_all(&Selector::class(classes::GALLERY_FILTER));
    let items = Rc::new(surface.query_all(&Selector::class(classes::GALLERY_ITEM)));

    if !buttons.is_empty() && !items.is_empty() {
        install_filter(surface, config, &buttons, &items);
    }
    if let Some(parts) = LightboxParts::find(&**surface)? {
        install_lightbox(surface, Rc::new(parts), &items);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

fn install_filter<S: Surface + 'static>(
    surface: &Rc<S>,
    config: &Rc<UiConfig>,
    buttons: &[S::Node],
    items: &Rc<Vec<S::Node>>,
) {
    let buttons = Rc::new(buttons.to_vec());
    for button in buttons.iter() {
        let (this_button, buttons, items, config) = (
            button.clone(),
            Rc::clone(&buttons),
            Rc::clone(items),
            Rc::clone(config),
        );
        surface.listen(
            Target::Node(button.clone()),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, _| {
                let tag = FilterTag::parse(
                    &s.attribute(&this_button, attrs::FILTER).unwrap_or_default(),
                );
                for b in buttons.iter() {
                    s.remove_class(b, classes::ACTIVE);
                }
                s.add_class(&this_button, classes::ACTIVE);
                tracing::debug!(filter = ?tag, "gallery filter selected");
                apply_filter(s, &items, &tag, &config);
                EventFlow::Continue
            }),
        );
    }
}

/// Show admitted items and hide the rest, in two phases for CSS transitions.
pub fn apply_filter<S: Surface + 'static>(
    surface: &Rc<S>,
    items: &[S::Node],
    tag: &FilterTag,
    config: &UiConfig,
) {
    for item in items {
        let item = item.clone();
        if tag.admits_node(&**surface, &item) {
            surface.set_style(&item, "display", "block");
            after(surface, config.gallery.show_delay(), move |s: &S| {
                if active_filter(s).admits_node(s, &item) {
                    s.add_class(&item, classes::SHOW);
                }
            });
        } else {
            surface.remove_class(&item, classes::SHOW);
            after(surface, config.gallery.hide_delay(), move |s: &S| {
                if !active_filter(s).admits_node(s, &item) {
                    s.set_style(&item, "display", "none");
                }
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Lightbox
// ---------------------------------------------------------------------------

struct LightboxParts<N> {
    root: N,
    image: N,
    title: N,
    description: N,
    close: N,
    prev: N,
    next: N,
}

impl<N> LightboxParts<N> {
    /// `Ok(None)` when the page has no lightbox.
    fn find<S: Surface<Node = N>>(surface: &S) -> Result<Option<Self>, UiError> {
        let Some(root) = surface.element_by_id(ids::LIGHTBOX) else {
            return Ok(None);
        };
        let by_id = |id: &str| {
            surface
                .element_by_id(id)
                .ok_or_else(|| UiError::missing(format!("#{id}")))
        };
        let by_class = |class: &str| {
            surface
                .query(&Selector::class(class))
                .ok_or_else(|| UiError::missing(format!(".{class}")))
        };
        Ok(Some(Self {
            image: by_id(ids::LIGHTBOX_IMAGE)?,
            title: by_id(ids::LIGHTBOX_TITLE)?,
            description: by_id(ids::LIGHTBOX_DESCRIPTION)?,
            close: by_class(classes::LIGHTBOX_CLOSE)?,
            prev: by_class(classes::LIGHTBOX_PREV)?,
            next: by_class(classes::LIGHTBOX_NEXT)?,
            root,
        }))
    }
}

type Shared<N> = Rc<RefCell<LightboxState<N>>>;

fn render<S: Surface>(surface: &S, parts: &LightboxParts<S::Node>, item: &S::Node) -> bool {
    match read_item(surface, item) {
        Ok(content) => {
            surface.set_attribute(&parts.image, "src", &content.src);
            surface.set_attribute(&parts.image, "alt", &content.alt);
            surface.set_text(&parts.title, &content.title);
            surface.set_text(&parts.description, &content.description);
            true
        }
        Err(err) => {
            tracing::warn!(%err, "gallery item cannot be shown");
            false
        }
    }
}

fn open<S: Surface>(
    surface: &S,
    parts: &LightboxParts<S::Node>,
    state: &Shared<S::Node>,
    items: &[S::Node],
    clicked: &S::Node,
) {
    let tag = active_filter(surface);
    let snapshot: Vec<S::Node> = items
        .iter()
        .filter(|item| tag.admits_node(surface, item))
        .cloned()
        .collect();
    let len = snapshot.len();
    let shown = state.borrow_mut().open(snapshot, clicked).cloned();
    let Some(item) = shown else {
        tracing::debug!(filter = ?tag, len, "lightbox open ignored");
        return;
    };
    if !render(surface, parts, &item) {
        state.borrow_mut().close();
        return;
    }
    surface.set_style(&parts.root, "display", "flex");
    surface.set_style(&surface.body(), "overflow", "hidden");
    tracing::debug!(index = ?state.borrow().index(), len, "lightbox opened");
}

fn close<S: Surface>(surface: &S, parts: &LightboxParts<S::Node>, state: &Shared<S::Node>) {
    state.borrow_mut().close();
    surface.set_style(&parts.root, "display", "none");
    surface.set_style(&surface.body(), "overflow", "auto");
    tracing::debug!("lightbox closed");
}

fn step<S: Surface>(
    surface: &S,
    parts: &LightboxParts<S::Node>,
    state: &Shared<S::Node>,
    forward: bool,
) {
    let shown = {
        let mut state = state.borrow_mut();
        (if forward { state.next() } else { state.prev() }).cloned()
    };
    if let Some(item) = shown {
        render(surface, parts, &item);
    }
}

fn install_lightbox<S: Surface + 'static>(
    surface: &Rc<S>,
    parts: Rc<LightboxParts<S::Node>>,
    items: &Rc<Vec<S::Node>>,
) {
    let state: Shared<S::Node> = Rc::new(RefCell::new(LightboxState::default()));

    for item in items.iter() {
        let (parts, state, items, clicked) =
            (Rc::clone(&parts), Rc::clone(&state), Rc::clone(items), item.clone());
        surface.listen(
            Target::Node(item.clone()),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, _| {
                open(&**s, &parts, &state, &items, &clicked);
                EventFlow::Continue
            }),
        );
    }

    {
        let (p, st) = (Rc::clone(&parts), Rc::clone(&state));
        surface.listen(
            Target::Node(parts.close.clone()),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, _| {
                close(&**s, &p, &st);
                EventFlow::Continue
            }),
        );
    }

    {
        let (p, st) = (Rc::clone(&parts), Rc::clone(&state));
        surface.listen(
            Target::Node(parts.root.clone()),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, event: &UiEvent<S::Node>| {
                if event.target.as_ref() == Some(&p.root) {
                    close(&**s, &p, &st);
                }
                EventFlow::Continue
            }),
        );
    }

    for (control, forward) in [(parts.prev.clone(), false), (parts.next.clone(), true)] {
        let (p, st) = (Rc::clone(&parts), Rc::clone(&state));
        surface.listen(
            Target::Node(control),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, _| {
                step(&**s, &p, &st, forward);
                EventFlow::Continue
            }),
        );
    }

    let (p, st) = (Rc::clone(&parts), Rc::clone(&state));
    surface.listen(
        Target::Document,
        EventKind::KeyDown,
        handler(surface, move |s: &Rc<S>, event: &UiEvent<S::Node>| {
            if !st.borrow().is_open() {
                return EventFlow::Continue;
            }
            if !is_flex(&**s, &p.root) {
                // Hidden by another handler (global Escape); follow it.
                st.borrow_mut().close();
                return EventFlow::Continue;
            }
            match event.key.as_deref() {
                Some("Escape") => close(&**s, &p, &st),
                Some("ArrowLeft") => step(&**s, &p, &st, false),
                Some("ArrowRight") => step(&**s, &p, &st, true),
                _ => {}
            }
            EventFlow::Continue
        }),
    );
}
