//! Header greeting and avatar, hydrated from the session probe.

use api::SessionUser;
use store::config::UiConfig;

use crate::messages::PROFILE_PLACEHOLDER;

#[derive(Clone, Debug, PartialEq)]
pub enum HeaderAvatar {
    /// Replace the nav avatar and the sign-in button with this image.
    Image(String),
    /// No avatar: the sign-in button shows this text instead.
    Label(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderUpdate {
    /// New greeting, only when the session knows a name.
    pub greeting: Option<String>,
    pub avatar: HeaderAvatar,
}

impl HeaderUpdate {
    /// `None` for anonymous sessions, which leave the header untouched.
    pub fn from_session(user: &SessionUser, ui: &UiConfig) -> Option<Self> {
        if !user.authenticated {
            return None;
        }
        let greeting = user.name().map(|name| ui.greeting_for(name));
        let avatar = match user.avatar_url() {
            Some(url) => HeaderAvatar::Image(url.to_string()),
            None => HeaderAvatar::Label(user.label_or(PROFILE_PLACEHOLDER).to_string()),
        };
        Some(Self { greeting, avatar })
    }
}

pub trait HeaderView {
    fn apply_header(&self, update: &HeaderUpdate);
}

/// CSS `background-image` value for `#navAvatar`.
pub fn nav_avatar_background(stored: Option<&str>, ui: &UiConfig) -> String {
    let url = stored.filter(|u| !u.is_empty()).unwrap_or(&ui.default_avatar);
    format!("url(\"{url}\")")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: Option<&str>, email: Option<&str>, avatar: Option<&str>) -> SessionUser {
        SessionUser {
            authenticated: true,
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            avatar_url: avatar.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_anonymous_session_changes_nothing() {
        assert_eq!(
            HeaderUpdate::from_session(&SessionUser::default(), &UiConfig::default()),
            None
        );
    }

    #[test]
    fn test_avatar_image_and_greeting() {
        let update = HeaderUpdate::from_session(
            &user(Some("Alex"), Some("a@b.c"), Some("https://x/a.png")),
            &UiConfig::default(),
        )
        .unwrap();
        assert_eq!(update.greeting.as_deref(), Some("Hi, Alex 👋"));
        assert_eq!(update.avatar, HeaderAvatar::Image("https://x/a.png".into()));
    }

    #[test]
    fn test_label_falls_back_to_email_then_placeholder() {
        let ui = UiConfig::default();
        let by_email = HeaderUpdate::from_session(&user(None, Some("a@b.c"), None), &ui).unwrap();
        assert_eq!(by_email.greeting, None);
        assert_eq!(by_email.avatar, HeaderAvatar::Label("a@b.c".into()));

        let bare = HeaderUpdate::from_session(&user(None, None, Some("")), &ui).unwrap();
        assert_eq!(bare.avatar, HeaderAvatar::Label(PROFILE_PLACEHOLDER.into()));
    }

    #[test]
    fn test_nav_avatar_background() {
        let ui = UiConfig::default();
        assert_eq!(
            nav_avatar_background(Some("/m/me.png"), &ui),
            r#"url("/m/me.png")"#
        );
        assert_eq!(
            nav_avatar_background(None, &ui),
            r#"url("../media/avatar-default.jpg")"#
        );
    }
}
