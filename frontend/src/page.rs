use std::fmt::Debug;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

use crate::chartjs::ChartJs;
use crate::config::PageConfig;
use crate::{banner, charts, nav, reveal, scroll};

/// Sets up every enhancement on the current page. Listeners stay registered
/// for the lifetime of the page.
pub fn start() -> Result<(), JsValue> {
    banner::print();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let config = Rc::new(PageConfig::from_window(&window));

    let chart_lib = ChartJs::detect();
    let drawn = charts::build_all(chart_lib.as_ref(), &config.charts, |id| {
        document.get_element_by_id(id)
    });
    debug!("Drew {} charts", drawn);

    if document.ready_state() == "loading" {
        let (ready_window, ready_document) = (window.clone(), document.clone());
        let on_ready = Closure::once_into_js(move || {
            wire(&ready_window, &ready_document, config);
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        wire(&window, &document, config);
    }

    Ok(())
}

/// Registers the interactive behaviour. Every feature is attempted even if
/// an earlier one fails. The header effect is registered before the
/// highlighter so both run in that order on each scroll.
pub fn wire(window: &Window, document: &Document, config: Rc<PageConfig>) {
    let failed = report_failures([
        ("mobile menu", nav::install_menu(document, &config)),
        (
            "header effect",
            scroll::install_header_effect(window, document, config.clone()),
        ),
        (
            "smooth scrolling",
            scroll::install_smooth_scroll(window, document, config.clone()),
        ),
        ("reveal animations", reveal::install(document, &config)),
        (
            "section highlighter",
            nav::install_highlighter(window, document, config),
        ),
    ]);

    if failed == 0 {
        info!("Page interactions ready");
    } else {
        info!("Page interactions ready, {} unavailable", failed);
    }
}

/// Logs each failed feature and returns how many failed.
fn report_failures<E, I>(results: I) -> usize
where
    E: Debug,
    I: IntoIterator<Item = (&'static str, Result<(), E>)>,
{
    let mut failed = 0;
    for (feature, result) in results {
        if let Err(err) = result {
            warn!("Could not set up {}: {:?}", feature, err);
            failed += 1;
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_failing_feature_leaves_the_rest() {
        let failed = report_failures([
            ("mobile menu", Ok(())),
            ("reveal animations", Err("RangeError: threshold")),
            ("section highlighter", Ok(())),
        ]);
        assert_eq!(failed, 1);
    }

    #[test]
    fn nothing_failed() {
        let results: [(&'static str, Result<(), String>); 2] =
            [("header effect", Ok(())), ("smooth scrolling", Ok(()))];
        assert_eq!(report_failures(results), 0);
    }
}
