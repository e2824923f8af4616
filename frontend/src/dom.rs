use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Class membership on a page element. Every operation is idempotent.
pub trait ClassList {
    fn add_class(&self, name: &str);
    fn remove_class(&self, name: &str);
    fn toggle_class(&self, name: &str);
    fn has_class(&self, name: &str) -> bool;
}

/// An element that may carry an `href`.
pub trait Link: ClassList {
    fn href(&self) -> Option<String>;
}

impl ClassList for Element {
    fn add_class(&self, name: &str) {
        let _ = self.class_list().add_1(name);
    }

    fn remove_class(&self, name: &str) {
        let _ = self.class_list().remove_1(name);
    }

    fn toggle_class(&self, name: &str) {
        let _ = self.class_list().toggle(name);
    }

    fn has_class(&self, name: &str) -> bool {
        self.class_list().contains(name)
    }
}

impl Link for Element {
    fn href(&self) -> Option<String> {
        self.get_attribute("href")
    }
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// All elements matching `selector`, in document order. An invalid selector
/// yields nothing.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Page offset of an element's top edge, for elements that have layout.
pub fn offset_top(element: &Element) -> Option<f64> {
    element
        .dyn_ref::<HtmlElement>()
        .map(|html| f64::from(html.offset_top()))
}

#[cfg(test)]
pub(crate) mod fake {
    use super::{ClassList, Link};
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    #[derive(Debug, Default)]
    pub struct FakeElement {
        classes: RefCell<BTreeSet<String>>,
        href: Option<String>,
    }

    impl FakeElement {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn link(href: &str) -> Self {
            Self {
                href: Some(href.to_string()),
                ..Self::default()
            }
        }

        pub fn with_class(self, name: &str) -> Self {
            self.classes.borrow_mut().insert(name.to_string());
            self
        }
    }

    impl ClassList for FakeElement {
        fn add_class(&self, name: &str) {
            self.classes.borrow_mut().insert(name.to_string());
        }

        fn remove_class(&self, name: &str) {
            self.classes.borrow_mut().remove(name);
        }

        fn toggle_class(&self, name: &str) {
            let mut classes = self.classes.borrow_mut();
            if !classes.remove(name) {
                classes.insert(name.to_string());
            }
        }

        fn has_class(&self, name: &str) -> bool {
            self.classes.borrow().contains(name)
        }
    }

    impl Link for FakeElement {
        fn href(&self) -> Option<String> {
            self.href.clone()
        }
    }

    // So a test can hand the controller a reference and keep inspecting the element.
    impl<T: ClassList> ClassList for &T {
        fn add_class(&self, name: &str) {
            (**self).add_class(name)
        }

        fn remove_class(&self, name: &str) {
            (**self).remove_class(name)
        }

        fn toggle_class(&self, name: &str) {
            (**self).toggle_class(name)
        }

        fn has_class(&self, name: &str) -> bool {
            (**self).has_class(name)
        }
    }

    #[test]
    fn toggle_flips_and_add_is_idempotent() {
        let el = FakeElement::new();
        el.toggle_class("active");
        assert!(el.has_class("active"));
        el.add_class("active");
        el.toggle_class("active");
        assert!(!el.has_class("active"));
        el.remove_class("active");
        assert!(!el.has_class("active"));
    }
}
