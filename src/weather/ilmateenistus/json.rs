//! Meteogram document of the Estonian Environment Agency.
//!
//! The service is an XML feed converted to JSON, so every value sits in an
//! `@attributes` object and numbers arrive as strings.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct IlmateenistusForecastResult {
    pub forecast: Option<IlmateenistusForecast>,
}

#[derive(Debug, Deserialize)]
pub struct IlmateenistusForecast {
    pub tabular: Option<IlmateenistusTabular>,
}

#[derive(Debug, Deserialize)]
pub struct IlmateenistusTabular {
    #[serde(default)]
    pub time: Vec<IlmateenistusTime>,
}

#[derive(Debug, Deserialize)]
pub struct IlmateenistusTime {
    #[serde(rename = "@attributes")]
    pub attributes: IlmateenistusPeriod,
    pub phenomen: Option<Attributes<IlmateenistusPhenomenon>>,
    pub precipitation: Option<Attributes<IlmateenistusValue>>,
    #[serde(rename = "windDirection")]
    pub wind_direction: Option<Attributes<IlmateenistusWindDirection>>,
    #[serde(rename = "windSpeed")]
    pub wind_speed: Option<Attributes<IlmateenistusWindSpeed>>,
    pub temperature: Option<Attributes<IlmateenistusValue>>,
    pub pressure: Option<Attributes<IlmateenistusValue>>,
}

#[derive(Debug, Deserialize)]
pub struct Attributes<T> {
    #[serde(rename = "@attributes")]
    pub attributes: T,
}

#[derive(Debug, Deserialize)]
pub struct IlmateenistusPeriod {
    pub from: String,
}

#[derive(Debug, Deserialize)]
pub struct IlmateenistusPhenomenon {
    #[serde(rename = "className")]
    pub class_name: Option<String>,
    pub en: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IlmateenistusValue {
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IlmateenistusWindDirection {
    pub deg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IlmateenistusWindSpeed {
    pub mps: Option<String>,
}

/// Parses a string-encoded number, treating blanks and garbage as absent.
pub fn number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.replace(',', ".").parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
