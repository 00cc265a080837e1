use ui::admin::{
    self, AdminShortcut, KeyPress, FILTER_FIELDS, PREVIEW_BOX_STYLE, PREVIEW_IMAGE_STYLE,
    PREVIEW_INPUTS, SEARCH_BOX, STICKY_STYLE, STICKY_TOOLBARS,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlFormElement, HtmlImageElement, HtmlInputElement, KeyboardEvent};

use crate::dom;

/// Paths under which the admin helpers are active.
pub const ADMIN_PREFIX: &str = "/admin/";

pub fn is_admin_page() -> bool {
    dom::window()
        .and_then(|w| w.location().pathname().ok())
        .is_some_and(|path| path.starts_with(ADMIN_PREFIX))
}

pub fn mount() {
    auto_submit_filters();
    hotkeys();
    sticky_toolbar();
    hero_previews();
    grow_textareas();
    tracing::debug!("admin helpers mounted");
}

fn auto_submit_filters() {
    for field in dom::query_all::<Element>(FILTER_FIELDS) {
        let target = field.clone();
        dom::on(&field, "change", move |_| {
            let form = target
                .closest("form")
                .ok()
                .flatten()
                .and_then(|f| f.dyn_into::<HtmlFormElement>().ok());
            if let Some(form) = form {
                if let Err(e) = form.submit() {
                    tracing::warn!(error = %dom::js_message(&e), "filter submit failed");
                }
            }
        });
    }
}

fn hotkeys() {
    dom::on_document("keydown", |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let active_tag = dom::document()
            .and_then(|d| d.active_element())
            .map(|el| el.tag_name())
            .unwrap_or_default();
        let key = key_event.key();
        let press = KeyPress {
            key: &key,
            alt: key_event.alt_key(),
            active_tag: &active_tag,
        };
        match admin::shortcut(&press) {
            Some(AdminShortcut::FocusSearch) => {
                if let Some(search) = dom::query::<HtmlInputElement>(SEARCH_BOX) {
                    event.prevent_default();
                    let _ = search.focus();
                    search.select();
                }
            }
            Some(AdminShortcut::Navigate(path)) => {
                if let Some(window) = dom::window() {
                    let _ = window.location().set_href(path);
                }
            }
            None => {}
        }
    });
}

fn sticky_toolbar() {
    let toolbar = STICKY_TOOLBARS
        .iter()
        .find_map(|selector| dom::query::<HtmlElement>(selector));
    if let Some(toolbar) = toolbar {
        dom::set_style(&toolbar, &STICKY_STYLE);
    }
}

fn hero_previews() {
    let Some(document) = dom::document() else {
        return;
    };
    for input in dom::query_all::<HtmlInputElement>(PREVIEW_INPUTS) {
        let (Ok(container), Ok(img)) = (
            document.create_element("div"),
            document.create_element("img"),
        ) else {
            continue;
        };
        let (Ok(container), Ok(img)) = (
            container.dyn_into::<HtmlElement>(),
            img.dyn_into::<HtmlImageElement>(),
        ) else {
            continue;
        };
        dom::set_style(&container, &PREVIEW_BOX_STYLE);
        dom::set_style(&img, &PREVIEW_IMAGE_STYLE);
        let _ = container.append_child(&img);
        if let Some(parent) = input.parent_node() {
            let _ = parent.append_child(&container);
        }

        let source = input.clone();
        dom::on(&input, "change", move |_| {
            let Some(file) = source.files().and_then(|files| files.get(0)) else {
                return;
            };
            match web_sys::Url::create_object_url_with_blob(&file) {
                Ok(url) => img.set_src(&url),
                Err(e) => tracing::warn!(error = %dom::js_message(&e), "preview failed"),
            }
        });
    }
}

fn grow(textarea: &HtmlElement) {
    let style = textarea.style();
    let _ = style.set_property("height", "auto");
    let _ = style.set_property("height", &admin::grown_height(textarea.scroll_height()));
}

fn grow_textareas() {
    for textarea in dom::query_all::<HtmlElement>("textarea") {
        let target = textarea.clone();
        dom::on(&textarea, "input", move |_| grow(&target));
        grow(&textarea);
    }
}
