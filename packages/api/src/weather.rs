//! # Current weather — Open-Meteo client and glyph table
//!
//! [`WeatherClient::current`] fetches `temperature_2m`, `weather_code` and
//! `is_day` for a coordinate. Missing fields are filled from the fallback
//! reading individually, so a partial reply still renders.
//!
//! ## WMO code → glyph
//!
//! | Codes | Glyph |
//! |-------|-------|
//! | 0 | ☀️ by day, 🌙 by night |
//! | 1, 2 | 🌤️ |
//! | 3 | ☁️ |
//! | 45, 48 | 🌫️ |
//! | 51–57 | 🌦️ |
//! | 61–67, 80–82 | 🌧️ |
//! | 71–77, 85, 86 | ❄️ |
//! | 95–99 | ⛈️ |
//! | anything else | 🌤️ |

use serde::Deserialize;

use store::config::WeatherConfig;

use crate::error::ApiError;
use crate::http::{HttpRequest, Transport};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    Sun,
    Moon,
    SunBehindCloud,
    Cloud,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunder,
}

impl Glyph {
    pub const ALL: [Glyph; 9] = [
        Glyph::Sun,
        Glyph::Moon,
        Glyph::SunBehindCloud,
        Glyph::Cloud,
        Glyph::Fog,
        Glyph::Drizzle,
        Glyph::Rain,
        Glyph::Snow,
        Glyph::Thunder,
    ];

    /// Map a WMO weather interpretation code. Unknown codes read as
    /// partly cloudy.
    pub fn for_code(code: i64, is_day: bool) -> Self {
        match code {
            0 if is_day => Glyph::Sun,
            0 => Glyph::Moon,
            1 | 2 => Glyph::SunBehindCloud,
            3 => Glyph::Cloud,
            45 | 48 => Glyph::Fog,
            51..=57 => Glyph::Drizzle,
            61..=67 | 80..=82 => Glyph::Rain,
            71..=77 | 85 | 86 => Glyph::Snow,
            95..=99 => Glyph::Thunder,
            _ => Glyph::SunBehindCloud,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Glyph::Sun => "☀️",
            Glyph::Moon => "🌙",
            Glyph::SunBehindCloud => "🌤️",
            Glyph::Cloud => "☁️",
            Glyph::Fog => "🌫️",
            Glyph::Drizzle => "🌦️",
            Glyph::Rain => "🌧️",
            Glyph::Snow => "❄️",
            Glyph::Thunder => "⛈️",
        }
    }
}

impl std::fmt::Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeatherReading {
    pub temperature: f64,
    pub weather_code: i64,
    pub is_day: bool,
}

impl Default for WeatherReading {
    fn default() -> Self {
        Self {
            temperature: 15.0,
            weather_code: 2,
            is_day: true,
        }
    }
}

impl WeatherReading {
    pub fn fallback(config: &WeatherConfig) -> Self {
        Self {
            temperature: config.fallback_temperature,
            weather_code: config.fallback_code,
            is_day: config.fallback_is_day,
        }
    }

    pub fn glyph(&self) -> Glyph {
        Glyph::for_code(self.weather_code, self.is_day)
    }

    /// Whole degrees, rounding halves up: `"15°C"`, `"-2°C"`.
    pub fn temperature_text(&self) -> String {
        let t = if self.temperature.is_finite() {
            self.temperature
        } else {
            15.0
        };
        format!("{}°C", (t + 0.5).floor() as i64)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: Option<CurrentConditions>,
}

#[derive(Debug, Default, Deserialize)]
struct CurrentConditions {
    #[serde(default)]
    temperature_2m: Option<f64>,
    #[serde(default)]
    weather_code: Option<f64>,
    #[serde(default)]
    is_day: Option<f64>,
}

impl ForecastResponse {
    fn into_reading(self, fallback: WeatherReading) -> WeatherReading {
        let current = self.current.unwrap_or_default();
        WeatherReading {
            temperature: current.temperature_2m.unwrap_or(fallback.temperature),
            weather_code: current
                .weather_code
                .map(|c| c as i64)
                .unwrap_or(fallback.weather_code),
            is_day: current.is_day.map(|d| d == 1.0).unwrap_or(fallback.is_day),
        }
    }
}

pub struct WeatherClient<T> {
    transport: T,
    config: WeatherConfig,
}

impl<T: Transport> WeatherClient<T> {
    pub fn new(transport: T, config: WeatherConfig) -> Self {
        Self { transport, config }
    }

    pub fn fallback(&self) -> WeatherReading {
        WeatherReading::fallback(&self.config)
    }

    pub fn forecast_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}?latitude={lat}&longitude={lon}&current=temperature_2m,weather_code,is_day",
            self.config.base_url
        )
    }

    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReading, ApiError> {
        let response = self
            .transport
            .send(HttpRequest::get(self.forecast_url(lat, lon)))
            .await?;
        let forecast: ForecastResponse = response.json()?;
        Ok(forecast.into_reading(self.fallback()))
    }

    /// [`current`](Self::current), degrading to the fallback reading.
    pub async fn current_or_fallback(&self, lat: f64, lon: f64) -> WeatherReading {
        match self.current(lat, lon).await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!(error = %e, "weather lookup failed, using fallback");
                self.fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::ScriptedTransport;

    #[test]
    fn test_every_code_maps_to_a_defined_glyph() {
        for code in 0..=99 {
            for is_day in [true, false] {
                assert!(Glyph::ALL.contains(&Glyph::for_code(code, is_day)));
            }
        }
    }

    #[test]
    fn test_clear_sky_depends_on_daylight() {
        assert_eq!(Glyph::for_code(0, true), Glyph::Sun);
        assert_eq!(Glyph::for_code(0, false), Glyph::Moon);
        assert_eq!(Glyph::Sun.as_str(), "☀️");
        assert_eq!(Glyph::Moon.as_str(), "🌙");
    }

    #[test]
    fn test_ranges_and_default() {
        assert_eq!(Glyph::for_code(2, false), Glyph::SunBehindCloud);
        assert_eq!(Glyph::for_code(48, true), Glyph::Fog);
        assert_eq!(Glyph::for_code(57, true), Glyph::Drizzle);
        assert_eq!(Glyph::for_code(81, true), Glyph::Rain);
        assert_eq!(Glyph::for_code(86, true), Glyph::Snow);
        assert_eq!(Glyph::for_code(99, true), Glyph::Thunder);
        for unmapped in [4, 44, 50, 58, 60, 68, 70, 78, 84, 87, 94, 100, -1] {
            assert_eq!(Glyph::for_code(unmapped, true), Glyph::SunBehindCloud, "{unmapped}");
        }
    }

    #[test]
    fn test_temperature_text_rounds_half_up() {
        let text = |t| {
            WeatherReading {
                temperature: t,
                ..Default::default()
            }
            .temperature_text()
        };
        assert_eq!(text(15.0), "15°C");
        assert_eq!(text(14.5), "15°C");
        assert_eq!(text(-2.5), "-2°C");
        assert_eq!(text(-0.4), "0°C");
        assert_eq!(text(f64::NAN), "15°C");
    }

    #[test]
    fn test_default_reading() {
        let reading = WeatherReading::fallback(&WeatherConfig::default());
        assert_eq!(reading, WeatherReading::default());
        assert_eq!(reading.temperature_text(), "15°C");
        assert_eq!(reading.glyph(), Glyph::SunBehindCloud);
    }

    #[tokio::test]
    async fn test_current_parses_and_fills_gaps() {
        let transport = ScriptedTransport::new();
        transport
            .respond_json(
                "https://api.open-meteo.com/",
                r#"{"current": {"temperature_2m": -3.4, "weather_code": 73, "is_day": 0}}"#,
            )
            .respond_json("https://api.open-meteo.com/", r#"{"current": {"weather_code": 61}}"#);
        let client = WeatherClient::new(transport.clone(), WeatherConfig::default());

        let reading = client.current(59.93, 30.3).await.unwrap();
        assert_eq!(reading.temperature_text(), "-3°C");
        assert_eq!(reading.glyph(), Glyph::Snow);
        assert!(!reading.is_day);

        let partial = client.current(59.93, 30.3).await.unwrap();
        assert_eq!(partial.temperature, 15.0);
        assert_eq!(partial.glyph(), Glyph::Rain);

        assert_eq!(
            transport.requests()[0].url,
            "https://api.open-meteo.com/v1/forecast?latitude=59.93&longitude=30.3&current=temperature_2m,weather_code,is_day"
        );
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let transport = ScriptedTransport::new();
        transport.fail("https://api.open-meteo.com/");
        let client = WeatherClient::new(transport, WeatherConfig::default());

        assert_eq!(client.current_or_fallback(1.0, 2.0).await, WeatherReading::default());
    }
}
