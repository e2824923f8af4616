use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{self, Array, Function, Object, Reflect};
use web_sys::Element;

use crate::charts::{ChartConfig, ChartService, TickFormat, TooltipLabel};

/// Global constructor exported by the Chart.js script tag.
const CHART_GLOBAL: &str = "Chart";

/// Chart.js, when the page loaded it.
pub struct ChartJs {
    ctor: Function,
}

impl ChartJs {
    pub fn detect() -> Option<Self> {
        Reflect::get(&js_sys::global(), &JsValue::from_str(CHART_GLOBAL))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .map(|ctor| Self { ctor })
    }
}

impl ChartService for ChartJs {
    type Mount = Element;
    type Error = JsValue;

    fn render(&self, mount: &Element, config: &ChartConfig) -> Result<(), JsValue> {
        // Keep series gaps as `null`; Chart.js draws `undefined` differently.
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let js_config = config.serialize(&serializer)?;

        if let Some(ticks) = &config.options.y_ticks {
            set_path(
                &js_config,
                &["options", "scales", "y", "ticks", "callback"],
                &tick_callback(ticks.clone()),
            )?;
        }
        if let Some(label) = &config.options.tooltip_label {
            set_path(
                &js_config,
                &["options", "plugins", "tooltip", "callbacks", "label"],
                &tooltip_callback(label.clone()),
            )?;
        }

        Reflect::construct(&self.ctor, &Array::of2(mount, &js_config))?;
        Ok(())
    }
}

/// Sets `root.a.b.c = value`, creating the intermediate objects as needed.
fn set_path(root: &JsValue, path: &[&str], value: &JsValue) -> Result<(), JsValue> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };

    let mut node = root.clone();
    for key in parents {
        let key = JsValue::from_str(key);
        let mut child = Reflect::get(&node, &key)?;
        if !child.is_object() {
            child = Object::new().into();
            Reflect::set(&node, &key, &child)?;
        }
        node = child;
    }
    Reflect::set(&node, &JsValue::from_str(last), value)?;
    Ok(())
}

fn tick_callback(format: TickFormat) -> JsValue {
    Closure::wrap(Box::new(move |value: JsValue| {
        let text = value
            .as_f64()
            .map(|number| number.to_string())
            .or_else(|| value.as_string())
            .unwrap_or_default();
        format.format(&text)
    }) as Box<dyn Fn(JsValue) -> String>)
    .into_js_value()
}

fn tooltip_callback(label: TooltipLabel) -> JsValue {
    Closure::wrap(Box::new(move |context: JsValue| {
        let field = |target: &JsValue, key: &str| {
            Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
        };
        let series = field(&field(&context, "dataset"), "label")
            .as_string()
            .unwrap_or_default();
        let y = field(&field(&context, "parsed"), "y").as_f64();
        label.format(&series, y)
    }) as Box<dyn Fn(JsValue) -> String>)
    .into_js_value()
}
