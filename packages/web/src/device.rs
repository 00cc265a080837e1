use std::rc::Rc;

use ui::device_hint::BODY_CLASS;
use ui::{need, DeviceHint, HintView, Mount};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use crate::dom;

struct DomHint {
    hint: Element,
}

impl HintView for DomHint {
    fn set_open(&self, open: bool) {
        dom::set_class(&self.hint, "open", open);
        if let Some(body) = dom::body() {
            dom::set_class(&body, BODY_CLASS, open);
        }
    }
}

pub fn mount() {
    let Some((hint, continue_button)) = Mount::attempt(|| {
        let hint = need(dom::by_id::<Element>("deviceHint"), "deviceHint")?;
        let button = need(dom::by_id::<HtmlElement>("deviceHintContinue"), "deviceHintContinue")?;
        Ok((DeviceHint::new(DomHint { hint }), button))
    })
    .log("device_hint") else {
        return;
    };

    let Some(window) = dom::window() else {
        return;
    };
    let navigator = window.navigator();
    let user_agent = navigator.user_agent().unwrap_or_default();
    hint.show_for(&user_agent, navigator.max_touch_points());
    if !hint.is_open() {
        return;
    }

    let hint = Rc::new(hint);
    {
        let hint = hint.clone();
        dom::on(&continue_button, "click", move |_| hint.dismiss());
    }
    dom::on_document("keydown", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
            hint.key_down(&key);
        }
    });
}
