//! Create-user modal: the lightweight local profile shown before any
//! server account exists.

use store::config::UiConfig;
use store::{KeyValueStore, ProfileError, ProfileSlot, ProfileStore, StoredProfile};

use crate::messages;

pub trait ProfileView {
    /// Show the modal and focus the name input.
    fn open_modal(&self);
    fn close_modal(&self);
    fn set_greeting(&self, text: &str);
    fn alert(&self, message: &str);
}

pub struct ProfileModal<S, V> {
    profiles: ProfileStore<S>,
    view: V,
    ui: UiConfig,
}

impl<S: KeyValueStore, V: ProfileView> ProfileModal<S, V> {
    pub fn new(kv: S, view: V, ui: UiConfig) -> Self {
        Self {
            profiles: ProfileStore::new(kv),
            view,
            ui,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Greet a returning visitor or ask a new one for their name.
    pub fn init(&self) {
        match self.profiles.slot() {
            ProfileSlot::Saved(profile) if !profile.name.is_empty() => {
                self.view.set_greeting(&self.ui.greeting_for(&profile.name));
            }
            ProfileSlot::Saved(_) | ProfileSlot::Malformed => {}
            ProfileSlot::Empty => self.view.open_modal(),
        }
    }

    pub fn open(&self) {
        self.view.open_modal();
    }

    pub fn close(&self) {
        self.view.close_modal();
    }

    pub fn save(&self, name: &str, phone: &str) -> Result<StoredProfile, ProfileError> {
        match self.profiles.save(name, phone) {
            Ok(profile) => {
                self.view.set_greeting(&self.ui.greeting_for(&profile.name));
                self.view.close_modal();
                Ok(profile)
            }
            Err(e) => {
                self.view.alert(messages::NAME_REQUIRED);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use store::{MemoryStore, USER_KEY};

    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Open,
        Close,
        Greeting(String),
        Alert(String),
    }

    #[derive(Default)]
    struct RecordingView {
        calls: RefCell<Vec<Call>>,
    }

    impl ProfileView for RecordingView {
        fn open_modal(&self) {
            self.calls.borrow_mut().push(Call::Open);
        }

        fn close_modal(&self) {
            self.calls.borrow_mut().push(Call::Close);
        }

        fn set_greeting(&self, text: &str) {
            self.calls.borrow_mut().push(Call::Greeting(text.to_string()));
        }

        fn alert(&self, message: &str) {
            self.calls.borrow_mut().push(Call::Alert(message.to_string()));
        }
    }

    fn modal(kv: &MemoryStore) -> ProfileModal<MemoryStore, RecordingView> {
        ProfileModal::new(kv.clone(), RecordingView::default(), UiConfig::default())
    }

    #[test]
    fn test_first_visit_opens_modal() {
        let kv = MemoryStore::new();
        let modal = modal(&kv);
        modal.init();
        assert_eq!(*modal.view().calls.borrow(), vec![Call::Open]);
    }

    #[test]
    fn test_returning_visitor_is_greeted() {
        let kv = MemoryStore::new();
        kv.set(USER_KEY, r#"{"name":"Alex","phone":"123"}"#);
        let modal = modal(&kv);
        modal.init();
        assert_eq!(
            *modal.view().calls.borrow(),
            vec![Call::Greeting("Hi, Alex 👋".into())]
        );
    }

    #[test]
    fn test_malformed_profile_does_nothing() {
        let kv = MemoryStore::new();
        kv.set(USER_KEY, "{not json");
        let modal = modal(&kv);
        modal.init();
        assert!(modal.view().calls.borrow().is_empty());
    }

    #[test]
    fn test_empty_name_keeps_modal_open() {
        let kv = MemoryStore::new();
        let modal = modal(&kv);
        assert_eq!(modal.save("   ", "123"), Err(ProfileError::EmptyName));
        assert_eq!(
            *modal.view().calls.borrow(),
            vec![Call::Alert("Укажите имя.".into())]
        );
        assert!(kv.is_empty());
    }

    #[test]
    fn test_save_greets_and_closes() {
        let kv = MemoryStore::new();
        let modal = modal(&kv);
        let saved = modal.save(" Alex ", "123").unwrap();
        assert_eq!(saved, StoredProfile::new("Alex", "123"));

        let raw = kv.get(USER_KEY).unwrap();
        assert_eq!(StoredProfile::from_json(&raw).unwrap(), saved);
        let calls = modal.view().calls.borrow();
        assert!(matches!(&calls[0], Call::Greeting(g) if g.contains("Alex")));
        assert_eq!(calls[1], Call::Close);
    }
}
