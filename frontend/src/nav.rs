use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

use crate::config::PageConfig;
use crate::dom::{self, ClassList, Link};

/// The mobile menu: a toggle button and the link panel it opens.
pub struct MobileMenu<E> {
    toggle: E,
    panel: E,
    active_class: String,
}

impl<E: ClassList> MobileMenu<E> {
    pub fn new(toggle: E, panel: E, active_class: &str) -> Self {
        Self {
            toggle,
            panel,
            active_class: active_class.to_string(),
        }
    }

    /// A menu needs both its button and its panel; `None` if either is missing.
    pub fn find(toggle: Option<E>, panel: Option<E>, active_class: &str) -> Option<Self> {
        Some(Self::new(toggle?, panel?, active_class))
    }

    pub fn button(&self) -> &E {
        &self.toggle
    }

    pub fn toggle(&self) {
        self.toggle.toggle_class(&self.active_class);
        self.panel.toggle_class(&self.active_class);
    }

    /// Closes the menu whatever state it was in.
    pub fn close(&self) {
        self.toggle.remove_class(&self.active_class);
        self.panel.remove_class(&self.active_class);
    }
}

/// Id of the section the reader is currently in: the last section, in
/// document order, whose top is at or above `scroll_y + lookahead`.
pub fn current_section<'a, I>(sections: I, scroll_y: f64, lookahead: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut current = None;
    for (id, top) in sections {
        if scroll_y >= top - lookahead {
            current = Some(id);
        }
    }
    current
}

/// Clears `active_class` from every link, then marks the one pointing at
/// `#current`.
pub fn highlight<L: Link>(links: &[L], current: Option<&str>, active_class: &str) {
    for link in links {
        link.remove_class(active_class);
        let points_here = match (current, link.href()) {
            (Some(id), Some(href)) => href.strip_prefix('#') == Some(id),
            _ => false,
        };
        if points_here {
            link.add_class(active_class);
        }
    }
}

/// Wires the toggle button and closes the menu on any nav link click.
pub fn install_menu(document: &Document, config: &PageConfig) -> Result<(), JsValue> {
    let toggle = dom::query(document, &config.menu_toggle_selector);
    let panel = dom::query(document, &config.nav_panel_selector);
    let Some(menu) = MobileMenu::find(toggle, panel, &config.active_class) else {
        debug!("No mobile menu on this page");
        return Ok(());
    };
    let menu = Rc::new(menu);

    {
        let on_toggle = {
            let menu = menu.clone();
            Closure::wrap(Box::new(move || menu.toggle()) as Box<dyn FnMut()>)
        };
        menu.button()
            .add_event_listener_with_callback("click", on_toggle.as_ref().unchecked_ref())?;
        on_toggle.forget();
    }

    let links = dom::query_all(document, &config.nav_link_selector);
    for link in &links {
        let menu = menu.clone();
        let on_click = Closure::wrap(Box::new(move || menu.close()) as Box<dyn FnMut()>);
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    debug!("Mobile menu wired with {} links", links.len());
    Ok(())
}

fn refresh_active_link(window: &Window, document: &Document, config: &PageConfig) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);

    let sections: Vec<(String, f64)> = dom::query_all(document, &config.section_selector)
        .iter()
        .filter_map(|section| Some((section.id(), dom::offset_top(section)?)))
        .collect();

    let current = current_section(
        sections.iter().map(|(id, top)| (id.as_str(), *top)),
        scroll_y,
        config.section_lookahead,
    );

    let links = dom::query_all(document, &config.nav_link_selector);
    highlight(&links, current, &config.active_class);
}

/// Keeps the nav link for the section in view marked active while scrolling.
pub fn install_highlighter(
    window: &Window,
    document: &Document,
    config: Rc<PageConfig>,
) -> Result<(), JsValue> {
    refresh_active_link(window, document, &config);

    let window_clone = window.clone();
    let document = document.clone();
    let on_scroll = Closure::wrap(Box::new(move || {
        refresh_active_link(&window_clone, &document, &config);
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeElement;

    const SECTIONS: [(&str, f64); 3] = [("a", 0.0), ("b", 500.0), ("c", 1000.0)];

    fn nav_links() -> Vec<FakeElement> {
        vec![
            FakeElement::link("#a"),
            FakeElement::link("#b"),
            FakeElement::link("#c"),
        ]
    }

    fn active_hrefs(links: &[FakeElement]) -> Vec<String> {
        links
            .iter()
            .filter(|l| l.has_class("active"))
            .filter_map(|l| l.href())
            .collect()
    }

    #[test]
    fn toggle_opens_and_closes_both_parts() {
        let (button, panel) = (FakeElement::new(), FakeElement::new());
        let menu = MobileMenu::new(&button, &panel, "active");

        menu.toggle();
        assert!(button.has_class("active") && panel.has_class("active"));

        menu.toggle();
        assert!(!button.has_class("active") && !panel.has_class("active"));
    }

    #[test]
    fn menu_needs_both_button_and_panel() {
        let (button, panel) = (FakeElement::new(), FakeElement::new());
        assert!(MobileMenu::find(Some(&button), None, "active").is_none());
        assert!(MobileMenu::find(None, Some(&panel), "active").is_none());
        assert!(MobileMenu::<&FakeElement>::find(None, None, "active").is_none());

        let menu = MobileMenu::find(Some(&button), Some(&panel), "active").unwrap();
        menu.toggle();
        assert!(menu.button().has_class("active"));
        assert!(panel.has_class("active"));
    }

    #[test]
    fn close_from_any_state_leaves_menu_closed() {
        let states = [(false, false), (true, true), (true, false), (false, true)];
        for (button_open, panel_open) in states {
            let button = FakeElement::new();
            let panel = FakeElement::new();
            if button_open {
                button.add_class("active");
            }
            if panel_open {
                panel.add_class("active");
            }

            let menu = MobileMenu::new(&button, &panel, "active");
            menu.close();
            menu.close();

            assert!(!button.has_class("active"));
            assert!(!panel.has_class("active"));
        }
    }

    #[test]
    fn section_follows_scroll_with_lookahead() {
        assert_eq!(current_section(SECTIONS, 550.0, 100.0), Some("b"));
        assert_eq!(current_section(SECTIONS, 1050.0, 100.0), Some("c"));
        assert_eq!(current_section(SECTIONS, 400.0, 100.0), Some("b"));
        assert_eq!(current_section(SECTIONS, 399.0, 100.0), Some("a"));
    }

    #[test]
    fn no_section_above_the_line_means_none() {
        let sections = [("intro", 300.0), ("stats", 900.0)];
        assert_eq!(current_section(sections, 0.0, 100.0), None);
    }

    #[test]
    fn later_sections_win_ties() {
        let sections = [("first", 200.0), ("second", 200.0)];
        assert_eq!(current_section(sections, 200.0, 100.0), Some("second"));
    }

    #[test]
    fn exactly_one_link_active_while_scrolling() {
        let links = nav_links();
        for scroll_y in [0.0, 120.0, 550.0, 899.0, 900.0, 1050.0, 4000.0] {
            let current = current_section(SECTIONS, scroll_y, 100.0);
            highlight(&links, current, "active");
            assert_eq!(active_hrefs(&links).len(), 1, "at scroll {}", scroll_y);
        }

        highlight(&links, current_section(SECTIONS, 550.0, 100.0), "active");
        assert_eq!(active_hrefs(&links), vec!["#b".to_string()]);
    }

    #[test]
    fn highlight_clears_stale_marks() {
        let links = vec![
            FakeElement::link("#a").with_class("active"),
            FakeElement::link("#b").with_class("active"),
            FakeElement::new(),
        ];
        highlight(&links, None, "active");
        assert!(active_hrefs(&links).is_empty());
        assert!(!links[2].has_class("active"));
    }

    #[test]
    fn external_links_are_never_highlighted() {
        let links = vec![FakeElement::link("/pricing"), FakeElement::link("#c")];
        highlight(&links, Some("pricing"), "active");
        assert!(active_hrefs(&links).is_empty());
    }
}
