//! Browser controllers for the public site and the admin overlay.
//!
//! Each controller owns its state and talks to the page only through a
//! small view trait, so the logic runs and is tested natively while the
//! `web` crate supplies DOM-backed views. Controllers are built once per
//! page and only when their elements exist; see [`Mount`].

pub mod admin;
pub mod auth_flow;
pub mod device_hint;
pub mod geo_badge;
pub mod header;
pub mod messages;
pub mod profile_modal;
pub mod search_overlay;
pub mod trip;
pub mod weather_widget;

mod mount;
pub use mount::{need, Mount};

pub use admin::{AdminShortcut, KeyPress};
pub use auth_flow::{AuthFlow, AuthTab, AuthView, RegisterStep};
pub use device_hint::{DeviceHint, HintView};
pub use geo_badge::{
    BadgeState, BadgeView, GeoBadge, GeoEnvironment, GeoNext, PermissionState, PositionError,
    PositionOptions, RequestToken,
};
pub use header::{HeaderAvatar, HeaderUpdate, HeaderView};
pub use profile_modal::{ProfileModal, ProfileView};
pub use search_overlay::{OverlayView, SearchOverlay};
pub use trip::TripSources;
pub use weather_widget::{WeatherDisplay, WeatherView};
