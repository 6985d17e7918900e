#![forbid(unsafe_code)]

//! Map link interceptor: opens the map service in a new browsing context.

use std::rc::Rc;

use vista_core::{EventFlow, EventKind, Selector, Surface, Target};
use vista_runtime::UiConfig;

use crate::handler;
use crate::markup::classes;

pub fn install<S: Surface + 'static>(surface: &Rc<S>, config: &Rc<UiConfig>) {
    for link in surface.query_all(&Selector::class(classes::MAP_LINK)) {
        let config = Rc::clone(config);
        surface.listen(
            Target::Node(link),
            EventKind::Click,
            handler(surface, move |s: &Rc<S>, _| {
                // No coordinates yet: the service's landing page stands in.
                s.open_window(&config.links.map_url, "_blank", None);
                EventFlow::PreventDefault
            }),
        );
    }
}
