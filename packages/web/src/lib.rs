//! # Web entry — binds the `ui` controllers to server-rendered pages
//!
//! The same module runs on every page of the site and on the admin panel.
//! Each binding looks up its elements and mounts only where they exist.
//!
//! | Module | Page elements |
//! |--------|---------------|
//! | `badge` | `#locationBadge`, `#weatherText`, `.weather .icon` |
//! | `search` | `#searchOverlay`, `#searchTrigger`, `#searchField`, `#searchClose`, `#searchForm` |
//! | `profile` | `#createUserModal`, `#hi`, `#editProfileFab`, `#saveUserBtn`, `#navAvatar` |
//! | `auth` | `#authModal`, `#openAuthBtn`, `#authError`, `.ac-tab`, `#formLogin`, `#regStep1..3` |
//! | `trip` | `#tripHero`, `#favFab`, `.trip-card`, `.trip-fav`, `#bgCircleVideo` |
//! | `device` | `#deviceHint`, `#deviceHintContinue` |
//! | `admin` | changelist filters, search box, toolbars, `hero_image` inputs, textareas |
//!
//! Mount order matters: the create-user modal and the nav avatar read the
//! stored profile before the auth flow clears it.

#[cfg(target_arch = "wasm32")]
mod admin;
#[cfg(target_arch = "wasm32")]
mod auth;
#[cfg(target_arch = "wasm32")]
mod badge;
#[cfg(target_arch = "wasm32")]
mod config;
#[cfg(target_arch = "wasm32")]
mod device;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod profile;
#[cfg(target_arch = "wasm32")]
mod search;
#[cfg(target_arch = "wasm32")]
mod trip;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    logging::init();
    let config = config::load();

    if admin::is_admin_page() {
        admin::mount();
        return;
    }

    profile::mount(&config);
    profile::mount_nav_avatar(&config);
    badge::mount(&config);
    search::mount();
    trip::mount_trip_page(&config);
    trip::mount_trip_cards();
    trip::respect_reduced_motion();
    device::mount();
    auth::mount(&config);
    tracing::info!("aclub client started");
}
