//! Login / registration modal and the header it refreshes.

use std::rc::Rc;

use api::csrf::Csrf;
use api::{document_cookies, AuthClient, FetchTransport, FormValue};
use store::{LocalStore, SiteConfig};
use ui::{
    need, AuthFlow, AuthTab, AuthView, HeaderAvatar, HeaderUpdate, HeaderView, Mount,
    RegisterStep,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, File, FormData, HtmlElement, HtmlFormElement};

use crate::dom;

const NAV_AVATAR_STYLE: &str = "width:24px;height:24px;border-radius:50%;object-fit:cover";
const BUTTON_AVATAR_STYLE: &str = "width:36px;height:36px;border-radius:50%;object-fit:cover";

struct DomAuth {
    modal: Element,
    error: Option<Element>,
}

impl DomAuth {
    fn forms() -> impl Iterator<Item = HtmlFormElement> {
        ["formLogin", "regStep1", "regStep2", "regStep3"]
            .into_iter()
            .filter_map(dom::by_id::<HtmlFormElement>)
    }

    fn avatar_img(url: &str, style: &str, alt: &str) -> Option<Element> {
        let img = dom::document()?.create_element("img").ok()?;
        dom::set_attr(&img, "src", url);
        dom::set_attr(&img, "alt", alt);
        dom::set_attr(&img, "style", style);
        Some(img)
    }
}

impl HeaderView for DomAuth {
    fn apply_header(&self, update: &HeaderUpdate) {
        if let (Some(greeting), Some(hi)) = (&update.greeting, dom::by_id::<Element>("hi")) {
            dom::set_text(&hi, greeting);
        }
        let open_button = dom::by_id::<Element>("openAuthBtn");
        match &update.avatar {
            HeaderAvatar::Image(url) => {
                if let (Some(nav), Some(img)) = (
                    dom::by_id::<Element>("navAvatar"),
                    Self::avatar_img(url, NAV_AVATAR_STYLE, "avatar"),
                ) {
                    nav.set_text_content(None);
                    let _ = nav.append_child(&img);
                }
                if let (Some(button), Some(img)) =
                    (open_button, Self::avatar_img(url, BUTTON_AVATAR_STYLE, ""))
                {
                    let _ = button.replace_with_with_node_1(&img);
                }
            }
            HeaderAvatar::Label(label) => {
                if let Some(button) = open_button {
                    dom::set_text(&button, label);
                }
            }
        }
    }
}

impl AuthView for DomAuth {
    fn show_modal(&self) {
        dom::set_hidden(&self.modal, false);
    }

    fn hide_modal(&self) {
        dom::set_hidden(&self.modal, true);
    }

    fn reset_forms(&self) {
        for form in Self::forms() {
            form.reset();
        }
    }

    fn select_tab(&self, tab: AuthTab) {
        let name = match tab {
            AuthTab::Login => "login",
            AuthTab::Register => "register",
        };
        for button in dom::query_all::<Element>(".ac-tab") {
            let active = button.get_attribute("data-tab").as_deref() == Some(name);
            dom::set_class(&button, "ac-tab--active", active);
        }
        for pane in dom::query_all::<Element>(".ac-pane") {
            let shown = pane.get_attribute("data-pane").as_deref() == Some(name);
            dom::set_hidden(&pane, !shown);
        }
    }

    fn show_step(&self, step: RegisterStep) {
        for (id, this) in [
            ("regStep1", RegisterStep::Details),
            ("regStep2", RegisterStep::Code),
            ("regStep3", RegisterStep::Avatar),
        ] {
            if let Some(form) = dom::by_id::<Element>(id) {
                dom::set_hidden(&form, this != step);
            }
        }
    }

    fn set_error(&self, message: Option<&str>) {
        let Some(error) = &self.error else {
            return;
        };
        match message {
            Some(message) => {
                dom::set_text(error, message);
                dom::set_hidden(error, false);
            }
            None => {
                dom::set_hidden(error, true);
                error.set_text_content(None);
            }
        }
    }

    fn notify(&self, message: &str) {
        dom::alert(message);
    }
}

type Flow = AuthFlow<FetchTransport, LocalStore, DomAuth>;

fn field(data: &FormData, name: &str) -> String {
    data.get(name).as_string().unwrap_or_default()
}

/// Form fields of a submitted form, or `None` if the form cannot be read.
fn form_data(event: &web_sys::Event) -> Option<FormData> {
    event.prevent_default();
    let form = event.target()?.dyn_into::<HtmlFormElement>().ok()?;
    FormData::new_with_form(&form).ok()
}

async fn read_file(file: &File) -> FormValue {
    let file_name = file.name();
    let content_type = file.type_();
    let bytes = if file_name.is_empty() {
        Vec::new()
    } else {
        match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => js_sys::Uint8Array::new(&buffer).to_vec(),
            Err(e) => {
                tracing::warn!(error = %dom::js_message(&e), "could not read avatar file");
                Vec::new()
            }
        }
    };
    FormValue::File {
        file_name,
        content_type,
        bytes,
    }
}

/// Split the avatar form into the `avatar` file and its text fields.
async fn avatar_fields(data: &FormData) -> (Option<FormValue>, Vec<(String, String)>) {
    let mut avatar = None;
    let mut extra = Vec::new();
    let entries = match js_sys::try_iter(data) {
        Ok(Some(entries)) => entries,
        _ => return (avatar, extra),
    };
    for entry in entries.flatten() {
        let pair = js_sys::Array::from(&entry);
        let Some(name) = pair.get(0).as_string() else {
            continue;
        };
        let value = pair.get(1);
        if let Some(text) = value.as_string() {
            extra.push((name, text));
        } else if let Ok(file) = value.dyn_into::<File>() {
            if name == "avatar" {
                avatar = Some(read_file(&file).await);
            }
        }
    }
    (avatar, extra)
}

fn on_submit(id: &str, flow: &Rc<Flow>, handler: fn(Rc<Flow>, FormData)) {
    let Some(form) = dom::by_id::<HtmlFormElement>(id) else {
        return;
    };
    let flow = flow.clone();
    dom::on(&form, "submit", move |event| {
        if let Some(data) = form_data(&event) {
            handler(flow.clone(), data);
        }
    });
}

pub fn mount(config: &SiteConfig) {
    let Some(flow) = Mount::attempt(|| {
        let modal = need(dom::by_id::<Element>("authModal"), "authModal")?;
        let csrf = Csrf::new(
            &config.auth.csrf_cookie,
            &config.auth.csrf_header,
            Rc::new(document_cookies),
        );
        let client = AuthClient::new(FetchTransport::new(), config.auth.clone(), csrf);
        let view = DomAuth {
            modal,
            error: dom::by_id("authError"),
        };
        Ok(AuthFlow::new(client, LocalStore::new(), view, config.ui.clone()))
    })
    .log("auth_flow") else {
        return;
    };
    let flow = Rc::new(flow);

    if let Some(open) = dom::by_id::<HtmlElement>("openAuthBtn") {
        let flow = flow.clone();
        dom::on(&open, "click", move |_| flow.open());
    }
    for close in dom::query_all::<HtmlElement>("#authModal [data-ac-close]") {
        let flow = flow.clone();
        dom::on(&close, "click", move |_| flow.close());
    }
    for tab in dom::query_all::<HtmlElement>(".ac-tab") {
        let flow = flow.clone();
        let target = tab.get_attribute("data-tab");
        dom::on(&tab, "click", move |_| {
            if let Some(tab) = target.as_deref().and_then(AuthTab::from_data) {
                flow.switch_tab(tab);
            }
        });
    }

    on_submit("formLogin", &flow, |flow, data| {
        spawn_local(async move {
            flow.submit_login(&field(&data, "email"), &field(&data, "password"))
                .await;
        });
    });
    on_submit("regStep1", &flow, |flow, data| {
        spawn_local(async move {
            flow.submit_details(
                &field(&data, "name"),
                &field(&data, "email"),
                &field(&data, "phone"),
                &field(&data, "password"),
            )
            .await;
        });
    });
    on_submit("regStep2", &flow, |flow, data| {
        spawn_local(async move {
            flow.submit_code(&field(&data, "code")).await;
        });
    });
    on_submit("regStep3", &flow, |flow, data| {
        spawn_local(async move {
            let (avatar, extra) = avatar_fields(&data).await;
            flow.submit_avatar(avatar, extra).await;
        });
    });
    if let Some(resend) = dom::by_id::<HtmlElement>("resendCodeBtn") {
        let flow = flow.clone();
        dom::on(&resend, "click", move |_| {
            let flow = flow.clone();
            spawn_local(async move { flow.resend_code().await });
        });
    }

    spawn_local(async move { flow.initialize().await });
}
