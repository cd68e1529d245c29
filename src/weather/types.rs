use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCode {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Wind,
    Fog,
    Haze,
    Sleet,
    Hail,
    Thunder,
    Thunderstorm,
}

impl WeatherCode {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly_cloudy",
            Self::Cloudy => "cloudy",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Wind => "wind",
            Self::Fog => "fog",
            Self::Haze => "haze",
            Self::Sleet => "sleet",
            Self::Hail => "hail",
            Self::Thunder => "thunder",
            Self::Thunderstorm => "thunderstorm",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Wind => "Wind",
            Self::Fog => "Fog",
            Self::Haze => "Haze",
            Self::Sleet => "Sleet",
            Self::Hail => "Hail",
            Self::Thunder => "Thunder",
            Self::Thunderstorm => "Thunderstorm",
        }
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for WeatherCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "clear" => Ok(Self::Clear),
            "partly_cloudy" => Ok(Self::PartlyCloudy),
            "cloudy" => Ok(Self::Cloudy),
            "rain" => Ok(Self::Rain),
            "snow" => Ok(Self::Snow),
            "wind" => Ok(Self::Wind),
            "fog" => Ok(Self::Fog),
            "haze" => Ok(Self::Haze),
            "sleet" => Ok(Self::Sleet),
            "hail" => Ok(Self::Hail),
            "thunder" => Ok(Self::Thunder),
            "thunderstorm" => Ok(Self::Thunderstorm),
            _ => Err(format!("Unknown weather code: '{}'", s)),
        }
    }
}

/// A place the user follows, with the latest weather once refreshed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub province: Option<String>,
    pub province_code: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub source: String,
    pub weather: Option<Weather>,
}

impl Location {
    pub fn display_name(&self) -> String {
        match (&self.city, &self.country) {
            (Some(city), Some(country)) => format!("{}, {}", city, country),
            (Some(city), None) => city.clone(),
            _ => self.id.clone(),
        }
    }

    /// `lat;lon` with four decimals, as expected by grid-point APIs.
    pub fn coordinates(&self) -> String {
        format!("{:.4};{:.4}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Weather {
    pub base: Base,
    pub current: Option<Current>,
    pub daily: Vec<Daily>,
    pub hourly: Vec<Hourly>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Base {
    pub refresh_time: Option<DateTime<Utc>>,
}

/// Current conditions. Temperatures in °C, speeds in m/s, distances in m,
/// pressure in mb.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Current {
    pub weather_text: Option<String>,
    pub weather_code: Option<WeatherCode>,
    pub temperature: Option<Temperature>,
    pub wind: Option<Wind>,
    pub uv: Option<UV>,
    pub air_quality: Option<AirQuality>,
    pub relative_humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub pressure: Option<f64>,
    pub cloud_cover: Option<i32>,
    pub visibility: Option<f64>,
    pub ceiling: Option<f64>,
    pub daily_forecast: Option<String>,
    pub hourly_forecast: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Temperature {
    pub temperature: Option<f64>,
    pub real_feel_temperature: Option<f64>,
    pub real_feel_shade_temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub wind_chill_temperature: Option<f64>,
    pub wet_bulb_temperature: Option<f64>,
}

impl Temperature {
    pub fn from_celsius(value: f64) -> Self {
        Self {
            temperature: Some(value),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wind {
    pub degree: Option<f64>,
    pub speed: Option<f64>,
    pub gusts: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UV {
    pub index: Option<f64>,
}

/// Pollutant concentrations in µg/m³, except CO in mg/m³.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirQuality {
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub so2: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub co: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Daily {
    pub date: DateTime<Utc>,
    pub air_quality: Option<AirQuality>,
    pub uv: Option<UV>,
    /// Hours of sunshine.
    pub sunshine_duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hourly {
    pub date: DateTime<Utc>,
    pub weather_text: Option<String>,
    pub weather_code: Option<WeatherCode>,
    pub temperature: Option<Temperature>,
    /// Millimeters over the hour.
    pub precipitation: Option<f64>,
    pub wind: Option<Wind>,
    pub pressure: Option<f64>,
}
