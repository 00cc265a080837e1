//! # Reverse geocoding and country flags
//!
//! [`GeocodeClient::reverse`] asks Nominatim for the place at a coordinate
//! and reduces the reply to a [`Place`]: the most specific settlement name
//! (`city`, `town`, `village`, then `county`), the country, and a
//! normalized two-letter country code. [`Place::flag`] turns the code into
//! flagcdn image URLs.
//!
//! Nominatim reports the United Kingdom as `uk`; flagcdn only serves `gb`,
//! so [`normalize_country_code`] rewrites it.

use serde::Deserialize;

use store::config::{FlagConfig, GeoConfig};

use crate::error::ApiError;
use crate::http::{HttpRequest, Transport};

/// Badge text when no better label is known.
pub const UNKNOWN_PLACE: &str = "Your location";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Place {
    pub city: Option<String>,
    pub country: String,
    /// Lower-case ISO 3166-1 alpha-2, already normalized.
    pub country_code: Option<String>,
}

/// Flag image attributes for a country.
#[derive(Clone, Debug, PartialEq)]
pub struct FlagImage {
    pub src: String,
    /// `srcset` value for high-density displays.
    pub srcset: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
    pub title: String,
}

/// Trim, lower-case and map `uk` to `gb`. Empty input yields `None`.
pub fn normalize_country_code(code: &str) -> Option<String> {
    let code = code.trim().to_lowercase();
    match code.as_str() {
        "" => None,
        "uk" => Some("gb".to_string()),
        _ => Some(code),
    }
}

/// Regional-indicator emoji for a two-letter code, e.g. `"no"` → 🇳🇴.
pub fn flag_emoji(code: &str) -> Option<String> {
    let code = code.trim().to_uppercase();
    if code.chars().count() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    code.chars()
        .map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

impl Place {
    /// `"City, Country"`, whichever parts exist, or [`UNKNOWN_PLACE`].
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [self.city.as_deref(), Some(self.country.as_str())]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            UNKNOWN_PLACE.to_string()
        } else {
            parts.join(", ")
        }
    }

    pub fn flag(&self, config: &FlagConfig) -> Option<FlagImage> {
        let code = self.country_code.as_deref()?;
        let base = config.base_url.trim_end_matches('/');
        Some(FlagImage {
            src: format!("{base}/24x18/{code}.png"),
            srcset: format!("{base}/48x36/{code}.png 2x"),
            width: 24,
            height: 18,
            alt: format!("{} flag", self.country),
            title: flag_emoji(code).unwrap_or_else(|| self.country.to_uppercase()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    county: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
}

impl From<Address> for Place {
    fn from(a: Address) -> Self {
        let city = [a.city, a.town, a.village, a.county]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty());
        Place {
            city,
            country: a.country.unwrap_or_default(),
            country_code: a.country_code.as_deref().and_then(normalize_country_code),
        }
    }
}

pub struct GeocodeClient<T> {
    transport: T,
    config: GeoConfig,
}

impl<T: Transport> GeocodeClient<T> {
    pub fn new(transport: T, config: GeoConfig) -> Self {
        Self { transport, config }
    }

    pub fn reverse_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}?format=jsonv2&lat={lat}&lon={lon}&accept-language={}",
            self.config.geocode_url, self.config.language
        )
    }

    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<Place, ApiError> {
        let response = self
            .transport
            .send(HttpRequest::get(self.reverse_url(lat, lon)))
            .await?;
        let reply: ReverseResponse = response.json()?;
        Ok(reply.address.map(Place::from).unwrap_or_default())
    }
}
