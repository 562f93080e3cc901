//! Browser host: DOM elements, `<img>` preloading, `setTimeout` scheduling
//! and the JavaScript entry points.
//!
//! ```js
//! import init, { animateBackgroundImage, initializeAll, initLogging } from "./animate_background_image.js";
//!
//! await init();
//! initLogging();
//! initializeAll();
//!
//! const anim = animateBackgroundImage(el, { speed: 100, framesCount: 12 });
//! if (anim) anim.stop();
//! ```

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlImageElement};

use crate::config::{parse_positive, Options};
use crate::host::{Document, Element, Scheduler, Task, MARKER_ATTRIBUTE};
use crate::loader::{ImageLoader, LoadState};
use crate::{create, initialize_all, AnimateBackgroundImage, Error};

fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

impl Element for HtmlElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_background_image(&self, value: &str) -> Result<(), Error> {
        self.style()
            .set_property("background-image", value)
            .map_err(|e| Error::Style(js_reason(&e)))
    }
}

impl LoadState for HtmlImageElement {
    fn is_complete(&self) -> bool {
        self.complete()
    }
}

impl Document for web_sys::Document {
    type Element = HtmlElement;

    fn marked_elements(&self) -> Result<Vec<HtmlElement>, Error> {
        let nodes = self
            .query_selector_all(&format!("[{}]", MARKER_ATTRIBUTE))
            .map_err(|e| Error::Query(js_reason(&e)))?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect())
    }
}

/// Preloads frames through detached `<img>` elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlImageLoader;

impl ImageLoader for HtmlImageLoader {
    type Handle = HtmlImageElement;

    fn request(&self, url: &str) -> Result<HtmlImageElement, Error> {
        let image = HtmlImageElement::new().map_err(|e| Error::Image {
            url: url.to_string(),
            reason: js_reason(&e),
        })?;
        image.set_src(url);
        Ok(image)
    }
}

/// Schedules ticks with `window.setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> Result<(), Error> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let callback = Closure::once_into_js(move || task());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
            .map_err(|e| Error::Schedule(js_reason(&e)))?;
        Ok(())
    }
}

/// Get the page document.
pub fn document() -> Result<web_sys::Document, Error> {
    web_sys::window()
        .ok_or(Error::NoWindow)?
        .document()
        .ok_or(Error::NoDocument)
}

fn field(object: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(object, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Numbers are truncated like `parseInt`, strings go through [`parse_positive`].
fn int_field(object: &JsValue, key: &str) -> Option<u32> {
    let value = field(object, key)?;
    if let Some(n) = value.as_f64() {
        let n = n.trunc();
        return (n >= 1.0).then(|| n.min(u32::MAX as f64) as u32);
    }
    value.as_string().and_then(|s| parse_positive(&s))
}

/// Read `{ speed, baseUrl, framesCount }` from a JavaScript object.
///
/// `undefined` and `null` mean no options at all.
pub fn options_from_js(value: &JsValue) -> Option<Options> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(Options {
        speed: int_field(value, "speed"),
        base_url: field(value, "baseUrl").and_then(|v| v.as_string()),
        frames_count: int_field(value, "framesCount"),
    })
}

/// A running animation, as seen from JavaScript.
#[wasm_bindgen(js_name = AnimateBackgroundImage)]
pub struct WebAnimation {
    inner: AnimateBackgroundImage<HtmlElement, HtmlImageElement>,
}

#[wasm_bindgen(js_class = AnimateBackgroundImage)]
impl WebAnimation {
    #[wasm_bindgen(getter)]
    pub fn element(&self) -> HtmlElement {
        self.inner.element().clone()
    }

    #[wasm_bindgen(getter)]
    pub fn speed(&self) -> u32 {
        self.inner.config().speed
    }

    #[wasm_bindgen(getter, js_name = framesUrls)]
    pub fn frames_urls(&self) -> Vec<String> {
        self.inner.frame_urls()
    }

    #[wasm_bindgen(getter, js_name = visibleFrame)]
    pub fn visible_frame(&self) -> usize {
        self.inner.visible_frame()
    }

    /// Stop the animation, leaving the current frame visible.
    pub fn stop(&self) {
        self.inner.stop();
    }
}

/// Animate `element`. Returns the animation, or `false` when `element` is not
/// an HTML element or the configuration is invalid.
#[wasm_bindgen(js_name = animateBackgroundImage)]
pub fn animate_background_image(element: JsValue, options: JsValue) -> JsValue {
    let Ok(element) = element.dyn_into::<HtmlElement>() else {
        return JsValue::FALSE;
    };
    let options = options_from_js(&options);
    match create(element, options.as_ref(), &HtmlImageLoader, TimeoutScheduler) {
        Some(inner) => WebAnimation { inner }.into(),
        None => JsValue::FALSE,
    }
}

/// Animate every element carrying `data-animate-background-image` in the page.
#[wasm_bindgen(js_name = initializeAll)]
pub fn initialize_all_in_page(options: JsValue) -> js_sys::Array {
    let animations = js_sys::Array::new();
    let document = match document() {
        Ok(document) => document,
        Err(e) => {
            log::error!("{e}");
            return animations;
        }
    };

    let options = options_from_js(&options);
    for inner in initialize_all(&document, options.as_ref(), &HtmlImageLoader, TimeoutScheduler) {
        animations.push(&WebAnimation { inner }.into());
    }
    animations
}

/// Route `log` output to the browser console and install the panic hook.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
