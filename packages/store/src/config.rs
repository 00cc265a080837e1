//! # Site configuration — `aclub.toml`
//!
//! Endpoints, provider URLs and fallbacks used by the browser controllers.
//! The web entry reads it from an optional inline block:
//!
//! ```html
//! <script id="aclubConfig" type="application/toml">
//! [ui]
//! greeting = "Салом, {name} 👋"
//! </script>
//! ```
//!
//! ## Structure
//!
//! ```toml
//! [auth]
//! login = "/auth/login/"
//! request_code = "/auth/request-code/"
//! verify = "/auth/verify/"
//! upload_avatar = "/auth/upload-avatar/"
//! me = "/auth/me/"
//! csrf_cookie = "csrftoken"
//! csrf_header = "X-CSRFToken"
//!
//! [weather]
//! base_url = "https://api.open-meteo.com/v1/forecast"
//! fallback_temperature = 15.0
//! fallback_code = 2
//! fallback_is_day = true
//!
//! [geo]
//! high_accuracy = true
//! timeout_ms = 8000
//! maximum_age_ms = 60000
//! geocode_url = "https://nominatim.openstreetmap.org/reverse"
//! language = "en"
//!
//! [flags]
//! base_url = "https://flagcdn.com"
//!
//! [trip]
//! latitude = 67.2804
//! longitude = 14.4049
//!
//! [ui]
//! greeting = "Hi, {name} 👋"
//! default_avatar = "../media/avatar-default.jpg"
//! ```
//!
//! Every section and field is defaulted, so a missing or empty document is
//! equivalent to [`SiteConfig::default`].

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub geo: GeoConfig,
    #[serde(default)]
    pub flags: FlagConfig,
    #[serde(default)]
    pub trip: TripConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Session-auth endpoints and CSRF wiring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub login: String,
    pub request_code: String,
    pub verify: String,
    pub upload_avatar: String,
    pub me: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login: "/auth/login/".to_string(),
            request_code: "/auth/request-code/".to_string(),
            verify: "/auth/verify/".to_string(),
            upload_avatar: "/auth/upload-avatar/".to_string(),
            me: "/auth/me/".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
        }
    }
}

/// Weather provider and the reading shown when it cannot be reached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub fallback_temperature: f64,
    pub fallback_code: i64,
    pub fallback_is_day: bool,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            fallback_temperature: 15.0,
            fallback_code: 2,
            fallback_is_day: true,
        }
    }
}

/// Browser geolocation options and the reverse geocoder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    /// Age of a cached position the browser may return instead of a fresh fix.
    pub maximum_age_ms: u32,
    pub geocode_url: String,
    pub language: String,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: 8_000,
            maximum_age_ms: 60_000,
            geocode_url: "https://nominatim.openstreetmap.org/reverse".to_string(),
            language: "en".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagConfig {
    pub base_url: String,
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            base_url: "https://flagcdn.com".to_string(),
        }
    }
}

/// Coordinates used by the trip page when neither the URL nor the hero
/// element supplies any.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            latitude: 67.2804,
            longitude: 14.4049,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Greeting template; `{name}` is replaced with the user's name.
    pub greeting: String,
    pub default_avatar: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            greeting: "Hi, {name} 👋".to_string(),
            default_avatar: "../media/avatar-default.jpg".to_string(),
        }
    }
}

impl UiConfig {
    pub fn greeting_for(&self, name: &str) -> String {
        self.greeting.replace("{name}", name)
    }
}

impl SiteConfig {
    /// The element id of the inline config block.
    pub fn element_id() -> &'static str {
        "aclubConfig"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(SiteConfig::from_toml("").unwrap(), SiteConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = SiteConfig::from_toml(
            r#"
            [geo]
            timeout_ms = 3000

            [ui]
            greeting = "Салом, {name} 👋"
            "#,
        )
        .unwrap();

        assert_eq!(config.geo.timeout_ms, 3000);
        assert_eq!(config.geo.maximum_age_ms, 60_000);
        assert!(config.geo.high_accuracy);
        assert_eq!(config.auth.login, "/auth/login/");
        assert_eq!(config.ui.greeting_for("Alex"), "Салом, Alex 👋");
        assert_eq!(config.ui.default_avatar, "../media/avatar-default.jpg");
    }

    #[test]
    fn test_default_greeting() {
        assert_eq!(UiConfig::default().greeting_for("Alex"), "Hi, Alex 👋");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = SiteConfig::default();
        config.trip.latitude = 59.9;
        let text = config.to_toml().unwrap();
        assert_eq!(SiteConfig::from_toml(&text).unwrap(), config);
    }
}
