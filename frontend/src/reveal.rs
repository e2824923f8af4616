use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::config::PageConfig;
use crate::dom::{self, ClassList};

/// Something that can stop watching an element for visibility changes.
pub trait Watcher<T> {
    fn unwatch(&self, target: &T);
}

impl Watcher<Element> for IntersectionObserver {
    fn unwatch(&self, target: &Element) {
        self.unobserve(target);
    }
}

/// Reveals every element that came into view and stops watching it, so each
/// element is revealed at most once. Returns how many were revealed.
pub fn reveal_visible<T, W, I>(entries: I, watcher: &W, reveal_class: &str) -> usize
where
    T: ClassList,
    W: Watcher<T>,
    I: IntoIterator<Item = (T, bool)>,
{
    let mut revealed = 0;
    for (target, intersecting) in entries {
        if intersecting {
            target.add_class(reveal_class);
            watcher.unwatch(&target);
            revealed += 1;
        }
    }
    revealed
}

/// Observes every element tagged for reveal that exists right now.
pub fn install(document: &Document, config: &PageConfig) -> Result<(), JsValue> {
    let targets = dom::query_all(document, &config.reveal_selector);
    if targets.is_empty() {
        debug!("Nothing to reveal on this page");
        return Ok(());
    }

    let reveal_class = config.reveal_class.clone();
    let on_change = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        let entries = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
            .map(|entry| (entry.target(), entry.is_intersecting()));
        reveal_visible(entries, &observer, &reveal_class);
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    options.set_root_margin(&config.reveal_root_margin);

    let observer =
        IntersectionObserver::new_with_options(on_change.as_ref().unchecked_ref(), &options)?;
    on_change.forget();

    for target in &targets {
        observer.observe(target);
    }

    debug!("Watching {} elements for reveal", targets.len());
    Ok(())
}
