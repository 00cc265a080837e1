//! Thin helpers over `web-sys` shared by every page binding.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn query<T: JsCast>(selector: &str) -> Option<T> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

pub fn query_all<T: JsCast>(selector: &str) -> Vec<T> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// Attach `handler` for the lifetime of the page.
pub fn on(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        tracing::error!(event, error = ?e, "failed to attach listener");
    }
    closure.forget();
}

/// Listen on `document`.
pub fn on_document(event: &str, handler: impl FnMut(Event) + 'static) {
    if let Some(document) = document() {
        on(&document, event, handler);
    }
}

pub fn set_class(el: &Element, class: &str, present: bool) {
    let _ = el.class_list().toggle_with_force(class, present);
}

/// Show or hide with the site's `hidden` utility class.
pub fn set_hidden(el: &Element, hidden: bool) {
    set_class(el, "hidden", hidden);
}

pub fn set_style(el: &HtmlElement, props: &[(&str, &str)]) {
    let style = el.style();
    for (name, value) in props {
        if let Err(e) = style.set_property(name, value) {
            tracing::warn!(property = *name, error = ?e, "style rejected");
        }
    }
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_attr(el: &Element, name: &str, value: &str) {
    let _ = el.set_attribute(name, value);
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

/// Current value of a query parameter of the page URL.
pub fn query_param(name: &str) -> Option<String> {
    let href = window()?.location().href().ok()?;
    web_sys::Url::new(&href).ok()?.search_params().get(name)
}

pub fn alert(message: &str) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

/// Run `f` after `ms` milliseconds.
pub fn after(ms: u32, f: impl FnOnce() + 'static) {
    gloo_timers::callback::Timeout::new(ms, f).forget();
}

pub fn js_message(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}
