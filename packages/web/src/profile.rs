use std::rc::Rc;

use store::{LocalStore, ProfileStore, SiteConfig};
use ui::header::nav_avatar_background;
use ui::{Mount, ProfileModal, ProfileView};
use web_sys::{Element, HtmlElement, HtmlInputElement};

use crate::dom;

const FOCUS_DELAY_MS: u32 = 50;

struct DomProfile {
    modal: Option<Element>,
    name: Option<HtmlInputElement>,
    greeting: Option<Element>,
}

impl ProfileView for DomProfile {
    fn open_modal(&self) {
        let Some(modal) = &self.modal else {
            return;
        };
        dom::set_class(modal, "open", true);
        if let Some(name) = self.name.clone() {
            dom::after(FOCUS_DELAY_MS, move || {
                let _ = name.focus();
            });
        }
    }

    fn close_modal(&self) {
        if let Some(modal) = &self.modal {
            dom::set_class(modal, "open", false);
        }
    }

    fn set_greeting(&self, text: &str) {
        if let Some(greeting) = &self.greeting {
            dom::set_text(greeting, text);
        }
    }

    fn alert(&self, message: &str) {
        dom::alert(message);
    }
}

pub fn mount(config: &SiteConfig) {
    let Some(profile) = Mount::attempt(|| {
        let view = DomProfile {
            modal: dom::by_id("createUserModal"),
            name: dom::by_id("name"),
            greeting: dom::by_id("hi"),
        };
        if view.modal.is_none() && view.greeting.is_none() {
            return Err("createUserModal");
        }
        Ok(ProfileModal::new(LocalStore::new(), view, config.ui.clone()))
    })
    .log("profile_modal") else {
        return;
    };
    let profile = Rc::new(profile);

    for close in dom::query_all::<HtmlElement>("[data-close]") {
        let profile = profile.clone();
        dom::on(&close, "click", move |_| profile.close());
    }
    if let Some(fab) = dom::by_id::<HtmlElement>("editProfileFab") {
        let profile = profile.clone();
        dom::on(&fab, "click", move |_| profile.open());
    }
    if let Some(save) = dom::by_id::<HtmlElement>("saveUserBtn") {
        let profile = profile.clone();
        dom::on(&save, "click", move |_| {
            let Some(name) = dom::by_id::<HtmlInputElement>("name") else {
                return;
            };
            let phone = dom::by_id::<HtmlInputElement>("phone")
                .map(|p| p.value())
                .unwrap_or_default();
            if let Err(e) = profile.save(&name.value(), &phone) {
                tracing::debug!(error = %e, "profile not saved");
            }
        });
    }

    profile.init();
}

/// Paint `#navAvatar` from the stored avatar, else the default picture.
pub fn mount_nav_avatar(config: &SiteConfig) {
    let Some(avatar) = dom::by_id::<HtmlElement>("navAvatar") else {
        return;
    };
    let stored = ProfileStore::new(LocalStore::new()).avatar_url();
    let background = nav_avatar_background(stored.as_deref(), &config.ui);
    dom::set_style(&avatar, &[("background-image", background.as_str())]);
}
