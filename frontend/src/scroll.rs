use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, MouseEvent, ScrollBehavior, ScrollToOptions, Window};

use crate::config::PageConfig;
use crate::dom::{self, ClassList};

pub fn header_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// The page header and the class it carries once the page has scrolled.
pub struct HeaderMarker<E> {
    header: E,
    threshold: f64,
    scrolled_class: String,
}

impl<E: ClassList> HeaderMarker<E> {
    /// `None` when the page has no header to mark.
    pub fn find(header: Option<E>, config: &PageConfig) -> Option<Self> {
        Some(Self {
            header: header?,
            threshold: config.scrolled_threshold,
            scrolled_class: config.scrolled_class.clone(),
        })
    }

    pub fn update(&self, scroll_y: f64) {
        if header_scrolled(scroll_y, self.threshold) {
            self.header.add_class(&self.scrolled_class);
        } else {
            self.header.remove_class(&self.scrolled_class);
        }
    }
}

/// Marks the header once the page has scrolled past the threshold.
pub fn install_header_effect(
    window: &Window,
    document: &Document,
    config: Rc<PageConfig>,
) -> Result<(), JsValue> {
    let header = dom::query(document, &config.header_selector);
    let Some(marker) = HeaderMarker::find(header, &config) else {
        debug!("No header, skipping scroll effect");
        return Ok(());
    };

    marker.update(window.scroll_y().unwrap_or(0.0));

    let window_clone = window.clone();
    let on_scroll = Closure::wrap(Box::new(move || {
        marker.update(window_clone.scroll_y().unwrap_or(0.0));
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();

    Ok(())
}

/// The id an in-page `href` points at, if any.
pub fn fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Absolute scroll position that puts an element just below the fixed header.
pub fn scroll_target(viewport_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
    viewport_top + scroll_y - header_offset
}

pub trait Viewport {
    fn scroll_y(&self) -> f64;
    fn smooth_scroll_to(&self, top: f64);
}

impl Viewport for Window {
    fn scroll_y(&self) -> f64 {
        Window::scroll_y(self).unwrap_or(0.0)
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.scroll_to_with_scroll_to_options(&options);
    }
}

/// Scrolls to the element an anchor points at. `viewport_top` resolves an
/// id to that element's viewport-relative top. Returns the requested
/// position, or `None` when there is nothing to scroll to.
pub fn smooth_scroll<V, F>(href: &str, viewport: &V, viewport_top: F, header_offset: f64) -> Option<f64>
where
    V: Viewport,
    F: Fn(&str) -> Option<f64>,
{
    let top = viewport_top(fragment(href)?)?;
    let target = scroll_target(top, viewport.scroll_y(), header_offset);
    viewport.smooth_scroll_to(target);
    Some(target)
}

/// Replaces the jump of every in-page anchor with a smooth, header-aware scroll.
pub fn install_smooth_scroll(
    window: &Window,
    document: &Document,
    config: Rc<PageConfig>,
) -> Result<(), JsValue> {
    let anchors = dom::query_all(document, &config.anchor_selector);

    for anchor in &anchors {
        let window = window.clone();
        let document = document.clone();
        let config = config.clone();
        let link = anchor.clone();
        let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
            event.prevent_default();
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let find_top = |id: &str| {
                document
                    .get_element_by_id(id)
                    .map(|target| target.get_bounding_client_rect().top())
            };
            if smooth_scroll(&href, &window, find_top, config.header_offset).is_none() {
                debug!("No scroll target for {}", href);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        anchor.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    debug!("Smooth scrolling wired for {} anchors", anchors.len());
    Ok(())
}
