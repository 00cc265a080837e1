//! # Login and registration modal
//!
//! One modal, two tabs. Registration walks three steps and finishes with an
//! automatic login using the credentials captured at step 1.
//!
//! ```text
//! login ─────────────────────────────────────────────┐
//!                                                    ├─> close + session probe
//! details ──> code ──> avatar ──> auto-login ────────┘
//! ```
//!
//! | Handler | Endpoint | Rejection text |
//! |---------|----------|----------------|
//! | [`AuthFlow::submit_login`] | login | server message or "Ошибка входа" |
//! | [`AuthFlow::submit_details`] | request-code | server message or "Не удалось отправить код" |
//! | [`AuthFlow::resend_code`] | request-code | server message or "Не удалось отправить код" |
//! | [`AuthFlow::submit_code`] | verify | server message or "Код неверный или просрочен" |
//! | [`AuthFlow::submit_avatar`] | upload-avatar, then login | "Не удалось загрузить аватар" / "Ошибка авто-входа" |
//!
//! A request that never produced a readable reply shows the network text
//! and leaves the current step as it was.

use std::cell::{Cell, RefCell};

use api::{AuthClient, AuthReply, FormValue, RegistrationDraft, StepOutcome, Transport};
use store::config::UiConfig;
use store::{KeyValueStore, ProfileStore};

use crate::header::{HeaderUpdate, HeaderView};
use crate::messages;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthTab {
    Login,
    Register,
}

impl AuthTab {
    /// Value of the tab button's `data-tab` attribute.
    pub fn from_data(value: &str) -> Option<Self> {
        match value {
            "login" => Some(AuthTab::Login),
            "register" => Some(AuthTab::Register),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterStep {
    Details,
    Code,
    Avatar,
}

pub trait AuthView: HeaderView {
    fn show_modal(&self);
    fn hide_modal(&self);
    fn reset_forms(&self);
    fn select_tab(&self, tab: AuthTab);
    /// Show exactly one registration step.
    fn show_step(&self, step: RegisterStep);
    /// `None` clears and hides the error line.
    fn set_error(&self, message: Option<&str>);
    fn notify(&self, message: &str);
}

pub struct AuthFlow<T, S, V> {
    client: AuthClient<T>,
    profiles: ProfileStore<S>,
    view: V,
    ui: UiConfig,
    draft: RefCell<Option<RegistrationDraft>>,
    step: Cell<RegisterStep>,
}

impl<T, S, V> AuthFlow<T, S, V>
where
    T: Transport,
    S: KeyValueStore,
    V: AuthView,
{
    pub fn new(client: AuthClient<T>, kv: S, view: V, ui: UiConfig) -> Self {
        Self {
            client,
            profiles: ProfileStore::new(kv),
            view,
            ui,
            draft: RefCell::new(None),
            step: Cell::new(RegisterStep::Details),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn step(&self) -> RegisterStep {
        self.step.get()
    }

    /// Drop the locally stored profile left by the create-user modal, then
    /// ask the server who is signed in.
    pub async fn initialize(&self) {
        self.profiles.clear_legacy();
        self.refresh_session().await;
    }

    pub fn open(&self) {
        self.view.reset_forms();
        self.draft.replace(None);
        self.go_to(RegisterStep::Details);
        self.view.set_error(None);
        self.view.show_modal();
    }

    pub fn close(&self) {
        self.view.hide_modal();
    }

    pub fn switch_tab(&self, tab: AuthTab) {
        self.view.select_tab(tab);
        self.view.set_error(None);
    }

    pub async fn submit_login(&self, email: &str, password: &str) {
        self.view.set_error(None);
        let outcome = self.client.login(email.trim(), password).await;
        if self.accept(outcome, messages::LOGIN_FAILED).is_some() {
            self.finish().await;
        }
    }

    pub async fn submit_details(&self, name: &str, email: &str, phone: &str, password: &str) {
        self.view.set_error(None);
        let draft = RegistrationDraft::new(name, email, phone, password);
        if let Err(e) = draft.validate() {
            tracing::debug!(error = %e, "registration details rejected locally");
            self.view.set_error(Some(messages::DRAFT_INVALID));
            return;
        }
        let outcome = self.client.request_code(&draft).await;
        if self.accept(outcome, messages::CODE_NOT_SENT).is_some() {
            self.draft.replace(Some(draft));
            self.go_to(RegisterStep::Code);
            self.view.notify(messages::CODE_SENT);
        }
    }

    pub async fn resend_code(&self) {
        self.view.set_error(None);
        let Some(email) = self.draft_email() else {
            self.view.set_error(Some(messages::STEP_ONE_FIRST));
            return;
        };
        let outcome = self.client.resend_code(&email).await;
        if self.accept(outcome, messages::CODE_NOT_SENT).is_some() {
            self.view.notify(messages::CODE_RESENT);
        }
    }

    pub async fn submit_code(&self, code: &str) {
        self.view.set_error(None);
        let code = code.trim();
        if code.is_empty() {
            self.view.set_error(Some(messages::CODE_REQUIRED));
            return;
        }
        let Some(email) = self.draft_email() else {
            self.view.set_error(Some(messages::STEP_ONE_FIRST));
            return;
        };
        let outcome = self.client.verify(&email, code).await;
        if self.accept(outcome, messages::CODE_REJECTED).is_some() {
            self.go_to(RegisterStep::Avatar);
        }
    }

    /// `avatar` is the chosen file, if any; `extra` are the remaining fields
    /// of the avatar form.
    pub async fn submit_avatar(&self, avatar: Option<FormValue>, extra: Vec<(String, String)>) {
        self.view.set_error(None);
        let Some(avatar) = avatar.filter(is_chosen_file) else {
            self.view.set_error(Some(messages::AVATAR_REQUIRED));
            return;
        };
        let outcome = self.client.upload_avatar(avatar, extra).await;
        if self.accept(outcome, messages::AVATAR_FAILED).is_none() {
            return;
        }

        let Some(draft) = self.draft.borrow().clone() else {
            self.view.set_error(Some(messages::STEP_ONE_FIRST));
            return;
        };
        let outcome = self.client.login(&draft.email, &draft.password).await;
        if self.accept(outcome, messages::AUTO_LOGIN_FAILED).is_some() {
            self.draft.replace(None);
            self.finish().await;
        }
    }

    /// Probe `/auth/me/` and update the header. Failures leave it untouched.
    pub async fn refresh_session(&self) {
        match self.client.me().await {
            Ok(user) => match HeaderUpdate::from_session(&user, &self.ui) {
                Some(update) => self.view.apply_header(&update),
                None => tracing::debug!("anonymous session"),
            },
            Err(e) => tracing::debug!(error = %e, "session probe failed"),
        }
    }

    async fn finish(&self) {
        self.view.hide_modal();
        self.refresh_session().await;
    }

    fn draft_email(&self) -> Option<String> {
        self.draft
            .borrow()
            .as_ref()
            .map(|d| d.email.clone())
            .filter(|e| !e.is_empty())
    }

    fn go_to(&self, step: RegisterStep) {
        self.step.set(step);
        self.view.show_step(step);
    }

    fn accept(&self, outcome: StepOutcome<AuthReply>, fallback: &str) -> Option<AuthReply> {
        match outcome {
            StepOutcome::Accepted(reply) => Some(reply),
            StepOutcome::Rejected(message) => {
                self.view
                    .set_error(Some(message.as_deref().unwrap_or(fallback)));
                None
            }
            StepOutcome::Unreachable => {
                self.view.set_error(Some(messages::NETWORK_UNAVAILABLE));
                None
            }
        }
    }
}

/// An `<input type=file>` with nothing selected still submits an empty
/// entry; that counts as no file.
fn is_chosen_file(value: &FormValue) -> bool {
    match value {
        FormValue::File { file_name, .. } => !file_name.is_empty(),
        FormValue::Text(_) => false,
    }
}
