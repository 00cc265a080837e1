use std::rc::Rc;

use ui::{need, Mount, OverlayView, SearchOverlay};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::dom;

/// Delay before focusing the field, so the opening transition has started.
const FOCUS_DELAY_MS: u32 = 120;

struct DomOverlay {
    overlay: Element,
    field: Option<HtmlInputElement>,
}

impl OverlayView for DomOverlay {
    fn set_open(&self, open: bool) {
        dom::set_class(&self.overlay, "open", open);
        dom::set_attr(&self.overlay, "aria-hidden", if open { "false" } else { "true" });
    }

    fn focus_field(&self) {
        if let Some(field) = self.field.clone() {
            dom::after(FOCUS_DELAY_MS, move || {
                let _ = field.focus();
            });
        }
    }
}

pub fn mount() {
    let Some(overlay) = Mount::attempt(|| {
        let overlay = need(dom::by_id::<Element>("searchOverlay"), "searchOverlay")?;
        Ok(SearchOverlay::new(DomOverlay {
            overlay,
            field: dom::by_id("searchField"),
        }))
    })
    .log("search_overlay") else {
        return;
    };
    let overlay = Rc::new(overlay);

    if let Some(trigger) = dom::by_id::<HtmlElement>("searchTrigger") {
        let overlay = overlay.clone();
        dom::on(&trigger, "click", move |_| overlay.open());
    }
    if let Some(close) = dom::by_id::<HtmlElement>("searchClose") {
        let overlay = overlay.clone();
        dom::on(&close, "click", move |_| overlay.close());
    }
    {
        let target = overlay.view().overlay.clone();
        let overlay = overlay.clone();
        dom::on(&target, "click", move |event| {
            let on_backdrop = match (event.target(), event.current_target()) {
                (Some(target), Some(current)) => target == current,
                _ => false,
            };
            overlay.overlay_clicked(on_backdrop);
        });
    }
    {
        let overlay = overlay.clone();
        dom::on_document("keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                overlay.key_down(&key);
            }
        });
    }
    if let Some(form) = dom::by_id::<HtmlElement>("searchForm") {
        dom::on(&form, "submit", move |event| {
            event.prevent_default();
            let query = dom::by_id::<HtmlInputElement>("searchField")
                .map(|f| f.value())
                .unwrap_or_default();
            overlay.submit(&query);
        });
    }
}
