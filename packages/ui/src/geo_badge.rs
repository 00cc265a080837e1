//! # Location badge and local weather
//!
//! Drives the header badge from "Loading location…" to a place name with a
//! flag, or to one of the terminal texts when location is not available.
//! The browser calls (permission query, `getCurrentPosition`) stay in the
//! `web` crate; this controller decides what to ask for next via [`GeoNext`]
//! and renders whatever comes back.
//!
//! ## States
//!
//! | State | Badge text | Weather |
//! |-------|-----------|---------|
//! | `Loading` | Loading location… | unchanged |
//! | `Located` | City, Country + flag | fetched |
//! | `Blocked` | Location blocked | fallback |
//! | `Unavailable` | Location unavailable | fallback |
//! | `Unknown` | Unknown location | fallback |
//! | `Unsupported` | Geolocation not supported | fallback |
//! | `Insecure` | Enable HTTPS for location | fallback |
//!
//! ## Stale results
//!
//! Every position request gets a fresh [`RequestToken`]. A permission change
//! can start a new request while an older one is still in flight; results
//! and errors carrying an older token are dropped.

use std::cell::Cell;

use api::{FlagImage, GeocodeClient, Place, Transport, WeatherClient};
use store::config::{FlagConfig, SiteConfig};

use crate::messages;
use crate::weather_widget::{self, WeatherView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeState {
    Idle,
    Loading,
    Located,
    Blocked,
    Unavailable,
    Unknown,
    Unsupported,
    Insecure,
}

/// Why `getCurrentPosition` failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
}

impl PositionError {
    /// Map a `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => PositionError::PermissionDenied,
            2 => PositionError::PositionUnavailable,
            _ => PositionError::Timeout,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Prompt,
    Denied,
}

/// What the page offers, sampled once at mount.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoEnvironment {
    pub secure_context: bool,
    pub hostname: String,
    pub has_geolocation: bool,
    pub has_permissions: bool,
}

impl GeoEnvironment {
    /// Secure contexts plus plain-HTTP local development hosts.
    pub fn allows_location(&self) -> bool {
        self.secure_context || matches!(self.hostname.as_str(), "localhost" | "127.0.0.1")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// What the page should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeoNext {
    Stop,
    QueryPermission,
    RequestPosition(RequestToken),
}

/// Options for `getCurrentPosition`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
}

pub trait BadgeView {
    fn set_badge_text(&self, text: &str);
    fn show_place(&self, label: &str, flag: Option<&FlagImage>);
}

pub struct GeoBadge<T, V> {
    view: V,
    weather: WeatherClient<T>,
    geocode: GeocodeClient<T>,
    flags: FlagConfig,
    options: PositionOptions,
    state: Cell<BadgeState>,
    has_geolocation: Cell<bool>,
    latest: Cell<u64>,
}

impl<T, V> GeoBadge<T, V>
where
    T: Transport + Clone,
    V: BadgeView + WeatherView,
{
    pub fn new(transport: T, view: V, config: &SiteConfig) -> Self {
        Self {
            view,
            weather: WeatherClient::new(transport.clone(), config.weather.clone()),
            geocode: GeocodeClient::new(transport, config.geo.clone()),
            flags: config.flags.clone(),
            options: PositionOptions {
                high_accuracy: config.geo.high_accuracy,
                timeout_ms: config.geo.timeout_ms,
                maximum_age_ms: config.geo.maximum_age_ms,
            },
            state: Cell::new(BadgeState::Idle),
            has_geolocation: Cell::new(false),
            latest: Cell::new(0),
        }
    }

    pub fn state(&self) -> BadgeState {
        self.state.get()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn position_options(&self) -> PositionOptions {
        self.options
    }

    pub fn start(&self, env: &GeoEnvironment) -> GeoNext {
        self.has_geolocation.set(env.has_geolocation);
        self.enter(BadgeState::Loading);
        if !env.allows_location() {
            self.enter(BadgeState::Insecure);
            return GeoNext::Stop;
        }
        if env.has_permissions {
            GeoNext::QueryPermission
        } else {
            self.request_position()
        }
    }

    /// Result of `navigator.permissions.query`; `None` when the query failed.
    pub fn permission_resolved(&self, state: Option<PermissionState>) -> GeoNext {
        match state {
            Some(PermissionState::Denied) => {
                self.enter(BadgeState::Blocked);
                GeoNext::Stop
            }
            _ => self.request_position(),
        }
    }

    pub fn permission_changed(&self, state: PermissionState) -> GeoNext {
        if state == PermissionState::Denied {
            // Invalidate anything still in flight.
            self.latest.set(self.latest.get() + 1);
            self.enter(BadgeState::Blocked);
            return GeoNext::Stop;
        }
        self.enter(BadgeState::Loading);
        self.request_position()
    }

    pub fn request_position(&self) -> GeoNext {
        if !self.has_geolocation.get() {
            self.enter(BadgeState::Unsupported);
            return GeoNext::Stop;
        }
        let token = self.latest.get() + 1;
        self.latest.set(token);
        GeoNext::RequestPosition(RequestToken(token))
    }

    fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest.get()
    }

    pub fn position_failed(&self, token: RequestToken, error: PositionError) {
        if !self.is_current(token) {
            tracing::debug!(?token, "dropping stale position error");
            return;
        }
        self.enter(match error {
            PositionError::PermissionDenied => BadgeState::Blocked,
            PositionError::PositionUnavailable => BadgeState::Unavailable,
            PositionError::Timeout => BadgeState::Unknown,
        });
    }

    /// Look up weather and place concurrently; each result is applied as
    /// soon as it arrives, with its own fallback.
    pub async fn position_acquired(&self, token: RequestToken, lat: f64, lon: f64) {
        if !self.is_current(token) {
            return;
        }
        let weather = async {
            let reading = self.weather.current_or_fallback(lat, lon).await;
            if self.is_current(token) {
                weather_widget::render(&self.view, &reading);
            } else {
                tracing::debug!(?token, "dropping stale weather");
            }
        };
        let place = async {
            let place = match self.geocode.reverse(lat, lon).await {
                Ok(place) => Some(place),
                Err(e) => {
                    tracing::warn!(error = %e, "reverse geocoding failed");
                    None
                }
            };
            if self.is_current(token) {
                self.show_place(place.as_ref());
            } else {
                tracing::debug!(?token, "dropping stale place");
            }
        };
        futures::join!(weather, place);
    }

    fn show_place(&self, place: Option<&Place>) {
        self.state.set(BadgeState::Located);
        match place {
            Some(place) => {
                let flag = place.flag(&self.flags);
                self.view.show_place(&place.label(), flag.as_ref());
            }
            None => self.view.set_badge_text(api::geocode::UNKNOWN_PLACE),
        }
    }

    fn fallback_weather(&self) {
        weather_widget::render(&self.view, &self.weather.fallback());
    }

    fn enter(&self, state: BadgeState) {
        self.state.set(state);
        let text = match state {
            BadgeState::Idle | BadgeState::Located => return,
            BadgeState::Loading => {
                self.view.set_badge_text(messages::LOADING_LOCATION);
                return;
            }
            BadgeState::Blocked => messages::LOCATION_BLOCKED,
            BadgeState::Unavailable => messages::LOCATION_UNAVAILABLE,
            BadgeState::Unknown => messages::LOCATION_UNKNOWN,
            BadgeState::Unsupported => messages::GEOLOCATION_UNSUPPORTED,
            BadgeState::Insecure => messages::INSECURE_CONTEXT,
        };
        self.view.set_badge_text(text);
        self.fallback_weather();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use api::{Glyph, ScriptedTransport};

    use super::*;
    use crate::weather_widget::WeatherDisplay;

    #[derive(Default)]
    struct RecordingView {
        texts: RefCell<Vec<String>>,
        places: RefCell<Vec<(String, Option<FlagImage>)>>,
        weather: RefCell<Vec<WeatherDisplay>>,
    }

    impl BadgeView for RecordingView {
        fn set_badge_text(&self, text: &str) {
            self.texts.borrow_mut().push(text.to_string());
        }

        fn show_place(&self, label: &str, flag: Option<&FlagImage>) {
            self.places
                .borrow_mut()
                .push((label.to_string(), flag.cloned()));
        }
    }

    impl WeatherView for RecordingView {
        fn show_weather(&self, display: &WeatherDisplay) {
            self.weather.borrow_mut().push(display.clone());
        }
    }

    fn env() -> GeoEnvironment {
        GeoEnvironment {
            secure_context: true,
            hostname: "aclub.travel".into(),
            has_geolocation: true,
            has_permissions: true,
        }
    }

    fn badge(transport: &ScriptedTransport) -> GeoBadge<ScriptedTransport, RecordingView> {
        GeoBadge::new(transport.clone(), RecordingView::default(), &SiteConfig::default())
    }

    fn last_text(badge: &GeoBadge<ScriptedTransport, RecordingView>) -> String {
        badge.view().texts.borrow().last().cloned().unwrap_or_default()
    }

    fn assert_fallback_weather(badge: &GeoBadge<ScriptedTransport, RecordingView>) {
        let weather = badge.view().weather.borrow();
        let shown = weather.last().unwrap();
        assert_eq!(shown.temperature, "15°C");
        assert_eq!(shown.glyph, Glyph::SunBehindCloud);
    }

    #[test]
    fn test_denied_permission_blocks_without_network() {
        let transport = ScriptedTransport::new();
        let badge = badge(&transport);

        assert_eq!(badge.start(&env()), GeoNext::QueryPermission);
        assert_eq!(last_text(&badge), messages::LOADING_LOCATION);

        assert_eq!(badge.permission_resolved(Some(PermissionState::Denied)), GeoNext::Stop);
        assert_eq!(badge.state(), BadgeState::Blocked);
        assert_eq!(last_text(&badge), "Location blocked");
        assert_fallback_weather(&badge);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_insecure_context_stops_before_permission() {
        let transport = ScriptedTransport::new();
        let badge = badge(&transport);
        let plain_http = GeoEnvironment {
            secure_context: false,
            ..env()
        };

        assert_eq!(badge.start(&plain_http), GeoNext::Stop);
        assert_eq!(badge.state(), BadgeState::Insecure);
        assert_eq!(last_text(&badge), "Enable HTTPS for location");
        assert_fallback_weather(&badge);
    }

    #[test]
    fn test_localhost_counts_as_secure() {
        let local = GeoEnvironment {
            secure_context: false,
            hostname: "127.0.0.1".into(),
            ..env()
        };
        assert!(local.allows_location());
    }

    #[test]
    fn test_missing_geolocation_is_unsupported() {
        let transport = ScriptedTransport::new();
        let badge = badge(&transport);
        let no_geo = GeoEnvironment {
            has_geolocation: false,
            has_permissions: false,
            ..env()
        };

        assert_eq!(badge.start(&no_geo), GeoNext::Stop);
        assert_eq!(last_text(&badge), "Geolocation not supported");
        assert_fallback_weather(&badge);
    }

    #[test]
    fn test_position_errors() {
        let transport = ScriptedTransport::new();
        let badge = badge(&transport);
        badge.start(&env());

        for (code, text) in [
            (1, "Location blocked"),
            (2, "Location unavailable"),
            (3, "Unknown location"),
        ] {
            let GeoNext::RequestPosition(token) = badge.permission_resolved(None) else {
                panic!("expected a position request");
            };
            badge.position_failed(token, PositionError::from_code(code));
            assert_eq!(last_text(&badge), text);
            assert_fallback_weather(&badge);
        }
    }

    #[tokio::test]
    async fn test_located_renders_place_and_weather() {
        let transport = ScriptedTransport::new();
        transport
            .respond_json(
                "https://api.open-meteo.com/",
                r#"{"current": {"temperature_2m": 7.6, "weather_code": 3, "is_day": 1}}"#,
            )
            .respond_json(
                "https://nominatim.openstreetmap.org/",
                r#"{"address": {"city": "London", "country": "United Kingdom", "country_code": "uk"}}"#,
            );
        let badge = badge(&transport);
        badge.start(&env());
        let GeoNext::RequestPosition(token) = badge.permission_resolved(Some(PermissionState::Granted))
        else {
            panic!("expected a position request");
        };

        badge.position_acquired(token, 51.5, -0.12).await;

        assert_eq!(badge.state(), BadgeState::Located);
        let places = badge.view().places.borrow();
        let (label, flag) = &places[0];
        assert_eq!(label, "London, United Kingdom");
        assert_eq!(flag.as_ref().unwrap().src, "https://flagcdn.com/24x18/gb.png");
        let weather = badge.view().weather.borrow();
        assert_eq!(weather[0].temperature, "8°C");
        assert_eq!(weather[0].glyph, Glyph::Cloud);
    }

    #[tokio::test]
    async fn test_lookups_fail_independently() {
        let transport = ScriptedTransport::new();
        transport
            .fail("https://api.open-meteo.com/")
            .respond_json(
                "https://nominatim.openstreetmap.org/",
                r#"{"address": {"town": "Bodø", "country": "Norway", "country_code": "no"}}"#,
            );
        let badge = badge(&transport);
        let GeoNext::RequestPosition(token) = badge.start(&GeoEnvironment {
            has_permissions: false,
            ..env()
        }) else {
            panic!("expected a position request");
        };

        badge.position_acquired(token, 67.28, 14.4).await;

        assert_eq!(badge.view().places.borrow()[0].0, "Bodø, Norway");
        assert_fallback_weather(&badge);
    }

    #[tokio::test]
    async fn test_geocode_failure_shows_generic_label() {
        let transport = ScriptedTransport::new();
        transport
            .respond_json("https://api.open-meteo.com/", r#"{"current": {}}"#)
            .fail("https://nominatim.openstreetmap.org/");
        let badge = badge(&transport);
        badge.start(&env());
        let GeoNext::RequestPosition(token) = badge.permission_resolved(None) else {
            panic!("expected a position request");
        };

        badge.position_acquired(token, 0.5, 0.5).await;
        assert_eq!(last_text(&badge), "Your location");
    }

    #[tokio::test]
    async fn test_stale_results_are_dropped() {
        let transport = ScriptedTransport::new();
        let badge = badge(&transport);
        badge.start(&env());

        let GeoNext::RequestPosition(first) = badge.permission_resolved(None) else {
            panic!("expected a position request");
        };
        let GeoNext::RequestPosition(second) = badge.permission_changed(PermissionState::Granted)
        else {
            panic!("expected a position request");
        };
        assert!(second > first);

        badge.position_acquired(first, 1.0, 1.0).await;
        badge.position_failed(first, PositionError::PositionUnavailable);

        assert!(transport.requests().is_empty());
        assert!(badge.view().places.borrow().is_empty());
        assert!(badge.view().weather.borrow().is_empty());
        assert_eq!(badge.state(), BadgeState::Loading);
    }

    #[test]
    fn test_permission_revoked_mid_flight() {
        let transport = ScriptedTransport::new();
        let badge = badge(&transport);
        badge.start(&env());
        let GeoNext::RequestPosition(token) = badge.permission_resolved(None) else {
            panic!("expected a position request");
        };

        assert_eq!(badge.permission_changed(PermissionState::Denied), GeoNext::Stop);
        badge.position_failed(token, PositionError::Timeout);

        assert_eq!(last_text(&badge), "Location blocked");
        assert_eq!(badge.state(), BadgeState::Blocked);
    }
}
