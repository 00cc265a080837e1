pub mod config;
pub mod kv;
pub mod models;
pub mod profile;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use config::SiteConfig;
pub use kv::KeyValueStore;
pub use models::{StoredProfile, AVATAR_KEY, LEGACY_KEYS, USER_KEY};
pub use profile::{ProfileError, ProfileSlot, ProfileStore};
