//! # Session-auth client
//!
//! Wraps the five endpoints of the e-mail registration backend. State lives
//! in the server session (cookie); the client only remembers what the user
//! typed into step 1 of registration, as a [`RegistrationDraft`].
//!
//! ## Registration sequence
//!
//! 1. [`AuthClient::request_code`] — name/e-mail/phone/password, the server
//!    mails a six-digit code.
//! 2. [`AuthClient::verify`] — e-mail + code; on success the server creates
//!    the account and logs the session in.
//! 3. [`AuthClient::upload_avatar`] — multipart upload for the new account.
//! 4. [`AuthClient::login`] with the draft credentials, then
//!    [`AuthClient::me`] to refresh the header.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use store::config::AuthConfig;

use crate::csrf::Csrf;
use crate::error::ApiError;
use crate::http::{FormValue, HttpRequest, Transport};
use crate::step::{submit_step, Acknowledged, StepOutcome};

/// Shortest password accepted before a code is requested.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Reply of every state-changing auth endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthReply {
    #[serde(default)]
    pub successful: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Set by login and verify when the account still has no avatar.
    #[serde(default)]
    pub need_avatar: Option<bool>,
    /// Set by the avatar upload.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Acknowledged for AuthReply {
    fn successful(&self) -> bool {
        self.successful
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Session probe result from `/auth/me/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_email_verified: Option<bool>,
}

impl SessionUser {
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    pub fn avatar_url(&self) -> Option<&str> {
        non_empty(self.avatar_url.as_deref())
    }

    /// Text shown in place of a missing avatar: name, else e-mail, else
    /// `placeholder`.
    pub fn label_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.name()
            .or_else(|| non_empty(self.email.as_deref()))
            .unwrap_or(placeholder)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("name is required")]
    MissingName,
    #[error("e-mail is required")]
    MissingEmail,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
}

/// Registration fields captured at step 1 and reused through auto-login.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl RegistrationDraft {
    /// Trim name, e-mail and phone; the password is kept verbatim.
    pub fn new(name: &str, email: &str, phone: &str, password: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            password: password.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.email.is_empty() {
            return Err(DraftError::MissingEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DraftError::PasswordTooShort);
        }
        Ok(())
    }
}

/// Client for the `/auth/*` endpoints.
pub struct AuthClient<T> {
    transport: T,
    endpoints: AuthConfig,
    csrf: Csrf,
}

impl<T: Transport> AuthClient<T> {
    pub fn new(transport: T, endpoints: AuthConfig, csrf: Csrf) -> Self {
        Self {
            transport,
            endpoints,
            csrf,
        }
    }

    fn post(&self, url: &str) -> HttpRequest {
        HttpRequest::post_form(url).headers(self.csrf.headers())
    }

    pub async fn login(&self, email: &str, password: &str) -> StepOutcome<AuthReply> {
        let request = self
            .post(&self.endpoints.login)
            .text("email", email)
            .text("password", password);
        submit_step(&self.transport, request).await
    }

    /// Step 1. Phone is only sent when non-empty.
    pub async fn request_code(&self, draft: &RegistrationDraft) -> StepOutcome<AuthReply> {
        let mut request = self
            .post(&self.endpoints.request_code)
            .text("name", &draft.name)
            .text("email", &draft.email);
        if !draft.phone.is_empty() {
            request = request.text("phone", &draft.phone);
        }
        request = request.text("password", &draft.password);
        submit_step(&self.transport, request).await
    }

    /// Ask for another code for an e-mail that already went through step 1.
    pub async fn resend_code(&self, email: &str) -> StepOutcome<AuthReply> {
        let request = self.post(&self.endpoints.request_code).text("email", email);
        submit_step(&self.transport, request).await
    }

    /// Step 2.
    pub async fn verify(&self, email: &str, code: &str) -> StepOutcome<AuthReply> {
        let request = self
            .post(&self.endpoints.verify)
            .text("email", email)
            .text("code", code);
        submit_step(&self.transport, request).await
    }

    /// Step 3. `extra` carries any other fields of the avatar form.
    pub async fn upload_avatar(
        &self,
        avatar: FormValue,
        extra: Vec<(String, String)>,
    ) -> StepOutcome<AuthReply> {
        let mut request = self.post(&self.endpoints.upload_avatar);
        for (name, value) in extra {
            request = request.text(name, value);
        }
        request = request.field("avatar", avatar);
        submit_step(&self.transport, request).await
    }

    /// Session probe.
    pub async fn me(&self) -> Result<SessionUser, ApiError> {
        let response = self.transport.send(HttpRequest::get(&self.endpoints.me)).await?;
        response.json()
    }
}
