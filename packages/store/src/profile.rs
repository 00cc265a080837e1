//! Typed access to the stored profile on top of any [`KeyValueStore`].

use thiserror::Error;

use crate::kv::KeyValueStore;
use crate::models::{StoredProfile, AVATAR_KEY, LEGACY_KEYS, USER_KEY};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("name must not be empty")]
    EmptyName,
}

/// What the storage currently holds under [`USER_KEY`].
#[derive(Clone, Debug, PartialEq)]
pub enum ProfileSlot {
    Empty,
    Saved(StoredProfile),
    /// Present but not a readable profile.
    Malformed,
}

#[derive(Clone, Debug)]
pub struct ProfileStore<S> {
    kv: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn slot(&self) -> ProfileSlot {
        match self.kv.get(USER_KEY) {
            None => ProfileSlot::Empty,
            Some(raw) => match StoredProfile::from_json(&raw) {
                Ok(profile) => ProfileSlot::Saved(profile),
                Err(e) => {
                    tracing::debug!(error = %e, "ignoring unreadable stored profile");
                    ProfileSlot::Malformed
                }
            },
        }
    }

    pub fn load(&self) -> Option<StoredProfile> {
        match self.slot() {
            ProfileSlot::Saved(profile) => Some(profile),
            _ => None,
        }
    }

    /// Trim and persist a name/phone pair. An empty trimmed name is rejected
    /// without touching storage.
    pub fn save(&self, name: &str, phone: &str) -> Result<StoredProfile, ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }
        let profile = StoredProfile::new(name, phone.trim());
        match profile.to_json() {
            Ok(json) => self.kv.set(USER_KEY, &json),
            Err(e) => tracing::warn!(error = %e, "failed to encode profile"),
        }
        Ok(profile)
    }

    /// Avatar URL from the dedicated key, else from the stored profile.
    pub fn avatar_url(&self) -> Option<String> {
        self.kv
            .get(AVATAR_KEY)
            .filter(|url| !url.is_empty())
            .or_else(|| self.load().and_then(|p| p.avatar))
    }

    pub fn clear_legacy(&self) {
        for key in LEGACY_KEYS {
            self.kv.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::KeyValueStore;
    use crate::memory::MemoryStore;

    #[test]
    fn test_save_persists_exact_pair() {
        let kv = MemoryStore::new();
        let profiles = ProfileStore::new(&kv);

        let saved = profiles.save("  Alex ", " 123 ").unwrap();
        assert_eq!(saved, StoredProfile::new("Alex", "123"));
        assert_eq!(
            kv.get(USER_KEY).as_deref(),
            Some(r#"{"name":"Alex","phone":"123"}"#)
        );
        assert_eq!(profiles.load(), Some(saved));
    }

    #[test]
    fn test_empty_name_is_rejected_without_write() {
        let kv = MemoryStore::new();
        let profiles = ProfileStore::new(&kv);

        assert_eq!(profiles.save("   ", "555"), Err(ProfileError::EmptyName));
        assert!(kv.is_empty());
    }

    #[test]
    fn test_malformed_profile_reads_as_malformed() {
        let kv = MemoryStore::new();
        kv.set(USER_KEY, "{not json");
        let profiles = ProfileStore::new(&kv);

        assert_eq!(profiles.slot(), ProfileSlot::Malformed);
        assert!(profiles.load().is_none());
    }

    #[test]
    fn test_avatar_url_prefers_dedicated_key() {
        let kv = MemoryStore::new();
        kv.set(USER_KEY, r#"{"name":"A","avatar":"/from-profile.png"}"#);
        let profiles = ProfileStore::new(&kv);
        assert_eq!(profiles.avatar_url().as_deref(), Some("/from-profile.png"));

        kv.set(AVATAR_KEY, "/dedicated.png");
        assert_eq!(profiles.avatar_url().as_deref(), Some("/dedicated.png"));
    }

    #[test]
    fn test_clear_legacy_removes_both_keys() {
        let kv = MemoryStore::new();
        kv.set(USER_KEY, "{}");
        kv.set(AVATAR_KEY, "/a.png");
        kv.set("unrelated", "1");

        ProfileStore::new(&kv).clear_legacy();

        assert!(kv.get(USER_KEY).is_none());
        assert!(kv.get(AVATAR_KEY).is_none());
        assert_eq!(kv.get("unrelated").as_deref(), Some("1"));
    }
}
