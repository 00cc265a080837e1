//! Trip detail page and trip card helpers.

use store::config::TripConfig;

/// Pill height bounds, in pixels.
pub const PILL_MIN: i32 = 86;
pub const PILL_MAX: i32 = 160;

/// Where the hero image and coordinates can come from, highest priority
/// first: the page URL, then the hero element's data attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TripSources {
    pub query_bg: Option<String>,
    pub query_lat: Option<String>,
    pub query_lon: Option<String>,
    pub data_bg: Option<String>,
    pub data_lat: Option<String>,
    pub data_lon: Option<String>,
}

impl TripSources {
    /// `url("...")` for the `--hero-img` custom property.
    pub fn hero_image(&self) -> Option<String> {
        [self.query_bg.as_deref(), self.data_bg.as_deref()]
            .into_iter()
            .flatten()
            .find(|bg| !bg.is_empty())
            .map(|bg| format!("url(\"{bg}\")"))
    }

    pub fn coordinates(&self, defaults: &TripConfig) -> (f64, f64) {
        let lat = first_coordinate(&[self.query_lat.as_deref(), self.data_lat.as_deref()]);
        let lon = first_coordinate(&[self.query_lon.as_deref(), self.data_lon.as_deref()]);
        (
            lat.unwrap_or(defaults.latitude),
            lon.unwrap_or(defaults.longitude),
        )
    }
}

/// First candidate that parses to a usable coordinate. Zero and
/// unparsable values are skipped.
fn first_coordinate(candidates: &[Option<&str>]) -> Option<f64> {
    candidates
        .iter()
        .flatten()
        .filter_map(|raw| raw.trim().parse::<f64>().ok())
        .find(|v| v.is_finite() && *v != 0.0)
}

/// Pill height for a card `card_height` pixels tall, as a CSS length.
pub fn pill_height(card_height: f64) -> String {
    let h = card_height.max(0.0).round() as i32;
    format!("{}px", (h - 8).clamp(PILL_MIN, PILL_MAX))
}
