use api::{Glyph, WeatherReading};

/// What the weather widget shows for one reading.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherDisplay {
    pub temperature: String,
    pub glyph: Glyph,
}

impl WeatherDisplay {
    pub fn aria_label(&self) -> String {
        format!("Weather {}", self.glyph)
    }
}

impl From<&WeatherReading> for WeatherDisplay {
    fn from(reading: &WeatherReading) -> Self {
        Self {
            temperature: reading.temperature_text(),
            glyph: reading.glyph(),
        }
    }
}

pub trait WeatherView {
    fn show_weather(&self, display: &WeatherDisplay);
}

pub fn render(view: &impl WeatherView, reading: &WeatherReading) {
    view.show_weather(&WeatherDisplay::from(reading));
}
