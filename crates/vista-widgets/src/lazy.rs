#![forbid(unsafe_code)]

//! Lazy image loading.
//!
//! `img[data-src]` placeholders get their real `src` the first time they
//! enter the viewport; the `lazy` class is dropped at the same moment.

use std::rc::Rc;

use vista_core::{Selector, Surface, VisibilityOptions};
use vista_runtime::OnceWatcher;

use crate::markup::{attrs, classes};

#[must_use]
pub fn placeholders() -> Selector {
    Selector::tag("img").and(Selector::attr(attrs::LAZY_SRC))
}

/// Copy `data-src` into `src`. Returns whether a source was promoted.
pub fn promote<S: Surface>(surface: &S, image: &S::Node) -> bool {
    let Some(src) = surface.attribute(image, attrs::LAZY_SRC) else {
        return false;
    };
    surface.set_attribute(image, "src", &src);
    surface.remove_class(image, classes::LAZY);
    true
}

pub fn install<S: Surface + 'static>(surface: &Rc<S>) {
    let images = surface.query_all(&placeholders());
    tracing::trace!(count = images.len(), "lazy images");
    let weak = Rc::downgrade(surface);
    OnceWatcher::new(move |image: &S::Node| {
        if let Some(s) = weak.upgrade() {
            promote(&*s, image);
        }
    })
    .attach(&**surface, &images, VisibilityOptions::default());
}
