use log::{warn, Level};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use web_sys::{js_sys::Reflect, Window};

/// Global the page may define before loading the module to override tunables.
pub const OVERRIDE_GLOBAL: &str = "AGRISENSE_CONFIG";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub scrolled_threshold: f64,
    pub section_lookahead: f64,
    pub header_offset: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,

    pub active_class: String,
    pub scrolled_class: String,
    pub reveal_class: String,

    pub header_selector: String,
    pub menu_toggle_selector: String,
    pub nav_panel_selector: String,
    pub nav_link_selector: String,
    pub anchor_selector: String,
    pub section_selector: String,
    pub reveal_selector: String,

    pub charts: ChartMounts,
}

/// Element ids the three charts attach to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartMounts {
    pub region_loss: String,
    pub causes: String,
    pub trend: String,
}

impl Default for ChartMounts {
    fn default() -> Self {
        Self {
            region_loss: "regionLossChart".to_string(),
            causes: "causesChart".to_string(),
            trend: "marathwadaTrendChart".to_string(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 50.0,
            section_lookahead: 100.0,
            header_offset: 80.0,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),

            active_class: "active".to_string(),
            scrolled_class: "scrolled".to_string(),
            reveal_class: "fade-in".to_string(),

            header_selector: "header".to_string(),
            menu_toggle_selector: ".mobile-menu-toggle".to_string(),
            nav_panel_selector: ".nav-links".to_string(),
            nav_link_selector: ".nav-links a".to_string(),
            anchor_selector: "a[href^=\"#\"]".to_string(),
            section_selector: "section[id]".to_string(),
            reveal_selector: ".fade-in".to_string(),

            charts: ChartMounts::default(),
        }
    }
}

impl PageConfig {
    /// Reads overrides from `window.AGRISENSE_CONFIG`, falling back to the
    /// defaults when it is missing or malformed.
    pub fn from_window(window: &Window) -> Self {
        let raw = match Reflect::get(window, &JsValue::from_str(OVERRIDE_GLOBAL)) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => return Self::default(),
        };

        match serde_wasm_bindgen::from_value::<PageConfig>(raw) {
            Ok(config) => config.validated(),
            Err(err) => {
                warn!("Ignoring malformed {}: {}", OVERRIDE_GLOBAL, err);
                Self::default()
            }
        }
    }

    /// Replaces every out-of-range tunable with its default, so a bad
    /// override never reaches the browser APIs.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        for (name, value, default) in [
            ("scrolled_threshold", &mut self.scrolled_threshold, defaults.scrolled_threshold),
            ("section_lookahead", &mut self.section_lookahead, defaults.section_lookahead),
            ("header_offset", &mut self.header_offset, defaults.header_offset),
        ] {
            if !value.is_finite() {
                warn!("Ignoring {}.{} = {}", OVERRIDE_GLOBAL, name, value);
                *value = default;
            }
        }

        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            warn!(
                "Ignoring {}.reveal_threshold = {}, must be within 0..=1",
                OVERRIDE_GLOBAL, self.reveal_threshold
            );
            self.reveal_threshold = defaults.reveal_threshold;
        }

        if !is_root_margin(&self.reveal_root_margin) {
            warn!(
                "Ignoring {}.reveal_root_margin = {:?}",
                OVERRIDE_GLOBAL, self.reveal_root_margin
            );
            self.reveal_root_margin = defaults.reveal_root_margin;
        }

        self
    }
}

/// One to four `px` or `%` lengths, as an observer root margin accepts.
fn is_root_margin(margin: &str) -> bool {
    let parts: Vec<&str> = margin.split_whitespace().collect();
    if parts.is_empty() || parts.len() > 4 {
        return false;
    }

    parts.iter().all(|part| {
        let number = part
            .strip_suffix("px")
            .or_else(|| part.strip_suffix('%'));
        number.is_some_and(|n| n.parse::<f64>().is_ok_and(f64::is_finite))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_layout() {
        let config = PageConfig::default();
        assert_eq!(config.scrolled_threshold, 50.0);
        assert_eq!(config.section_lookahead, 100.0);
        assert_eq!(config.header_offset, 80.0);
        assert_eq!(config.reveal_root_margin, "0px 0px -50px 0px");
        assert_eq!(config.charts.trend, "marathwadaTrendChart");
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let config: PageConfig = serde_json::from_str(
            r#"{ "header_offset": 64, "charts": { "causes": "lossCauses" } }"#,
        )
        .unwrap();

        assert_eq!(config.header_offset, 64.0);
        assert_eq!(config.charts.causes, "lossCauses");
        assert_eq!(config.charts.region_loss, "regionLossChart");
        assert_eq!(config.scrolled_class, "scrolled");
    }

    #[test]
    fn out_of_range_overrides_fall_back_to_defaults() {
        let config: PageConfig = serde_json::from_str(
            r#"{ "reveal_threshold": 1.5, "reveal_root_margin": "50", "header_offset": 72 }"#,
        )
        .unwrap();
        let config = config.validated();

        assert_eq!(config.reveal_threshold, 0.1);
        assert_eq!(config.reveal_root_margin, "0px 0px -50px 0px");
        assert_eq!(config.header_offset, 72.0);
    }

    #[test]
    fn valid_overrides_survive_validation() {
        let config: PageConfig = serde_json::from_str(
            r#"{ "reveal_threshold": 0.25, "reveal_root_margin": "10% 0px -20px" }"#,
        )
        .unwrap();
        let config = config.validated();

        assert_eq!(config.reveal_threshold, 0.25);
        assert_eq!(config.reveal_root_margin, "10% 0px -20px");
    }

    #[test]
    fn non_finite_offsets_are_replaced() {
        let config = PageConfig {
            scrolled_threshold: f64::NAN,
            header_offset: f64::INFINITY,
            reveal_threshold: -0.5,
            ..PageConfig::default()
        }
        .validated();

        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn root_margin_shapes() {
        assert!(is_root_margin("0px 0px -50px 0px"));
        assert!(is_root_margin("5%"));
        assert!(!is_root_margin(""));
        assert!(!is_root_margin("50"));
        assert!(!is_root_margin("1px 2px 3px 4px 5px"));
        assert!(!is_root_margin("10em"));
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let parsed = serde_json::from_str::<PageConfig>(r#"{ "scrolled_threshold": "high" }"#);
        assert!(parsed.is_err());
    }
}
