#![forbid(unsafe_code)]

//! Fade-in on first visibility and hero parallax.
//!
//! Fade-in uses one [`OnceWatcher`] for every matching block: the first time a
//! block is at least `fade_threshold` visible it gains `animate-in` for good.
//! Parallax sets each hero's `translateY` to `parallax_rate * scroll_y` on
//! every scroll tick, optionally through a [`Throttle`].

use std::rc::Rc;

use vista_core::{EventFlow, EventKind, Selector, Surface, Target, VisibilityOptions};
use vista_runtime::{OnceWatcher, Throttle, UiConfig};

use crate::{WeakClock, handler};
use crate::markup::classes;

/// Hero translation for a scroll offset.
#[must_use]
pub fn parallax_offset(scroll_y: f64, rate: f64) -> f64 {
    let offset = scroll_y * rate;
    // Normalize -0.0 so the style string reads "0px".
    if offset == 0.0 { 0.0 } else { offset }
}

/// CSS transform for a vertical offset in pixels.
#[must_use]
pub fn translate_y(offset: f64) -> String {
    format!("translateY({offset}px)")
}

/// Wire fade-in and parallax.
pub fn install<S: Surface + 'static>(surface: &Rc<S>, config: &Rc<UiConfig>) {
    install_fade_in(surface, config);
    install_parallax(surface, config);
}

fn install_fade_in<S: Surface + 'static>(surface: &Rc<S>, config: &Rc<UiConfig>) {
    let animation = &config.animation;
    let blocks = Selector::any(animation.fade_classes.iter().map(Selector::class));
    let targets = surface.query_all(&blocks);
    let weak = Rc::downgrade(surface);
    OnceWatcher::new(move |node: &S::Node| {
        if let Some(s) = weak.upgrade() {
            s.add_class(node, classes::ANIMATE_IN);
        }
    })
    .attach(
        &**surface,
        &targets,
        VisibilityOptions {
            threshold: animation.fade_threshold,
            root_margin: animation.fade_root_margin.clone(),
        },
    );
}

fn apply_parallax<S: Surface>(surface: &S, heroes: &[S::Node], rate: f64) {
    let transform = translate_y(parallax_offset(surface.scroll_y(), rate));
    for hero in heroes {
        surface.set_style(hero, "transform", &transform);
    }
}

fn install_parallax<S: Surface + 'static>(surface: &Rc<S>, config: &Rc<UiConfig>) {
    let heroes = surface.query_all(&Selector::any_class(&[classes::HERO, classes::PAGE_HERO]));
    if heroes.is_empty() {
        return;
    }
    let rate = config.animation.parallax_rate;

    let on_scroll = match config.animation.parallax_throttle() {
        None => handler(surface, move |s: &Rc<S>, _| {
            apply_parallax(&**s, &heroes, rate);
            EventFlow::Continue
        }),
        Some(limit) => {
            let weak = Rc::downgrade(surface);
            let throttle = Throttle::new(WeakClock::new(surface), limit, move |()| {
                if let Some(s) = weak.upgrade() {
                    apply_parallax(&*s, &heroes, rate);
                }
            });
            handler(surface, move |_: &Rc<S>, _| {
                throttle.call(());
                EventFlow::Continue
            })
        }
    };
    surface.listen(Target::Window, EventKind::Scroll, on_scroll);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_rate_times_scroll() {
        assert_eq!(parallax_offset(100.0, -0.5), -50.0);
        assert_eq!(parallax_offset(0.0, -0.5), 0.0);
        assert_eq!(parallax_offset(3.0, -0.5), -1.5);
    }

    #[test]
    fn transform_strings() {
        assert_eq!(translate_y(-50.0), "translateY(-50px)");
        assert_eq!(translate_y(parallax_offset(0.0, -0.5)), "translateY(0px)");
        assert_eq!(translate_y(-1.5), "translateY(-1.5px)");
    }
}
