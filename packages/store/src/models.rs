//! # Client-held data persisted in browser storage
//!
//! | Key | Value | Written by |
//! |-----|-------|-----------|
//! | [`USER_KEY`] (`"aclub_user"`) | JSON [`StoredProfile`] | profile modal on save |
//! | [`AVATAR_KEY`] (`"aclub_avatar"`) | avatar URL string | older builds of the site |
//!
//! Both keys predate the session-backed login and are cleared once the
//! authentication flow initializes (see [`LEGACY_KEYS`]).

use serde::{Deserialize, Serialize};

pub const USER_KEY: &str = "aclub_user";
pub const AVATAR_KEY: &str = "aclub_avatar";

/// Keys removed when the server-backed authentication flow takes over.
pub const LEGACY_KEYS: [&str; 2] = [USER_KEY, AVATAR_KEY];

/// Name/phone pair captured by the "create user" modal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    /// Avatar URL some older pages wrote next to the profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl StoredProfile {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            avatar: None,
        }
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
