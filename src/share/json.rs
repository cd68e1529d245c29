//! Wire format of the weather share payload. Keys are camelCase and absent
//! values are omitted rather than written as `null`.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareData {
    pub app_version: String,
    pub locations: Vec<ShareLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLocation {
    pub id: String,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<ShareWeather>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareWeather {
    /// Epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<ShareCurrent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_forecast: Option<Vec<ShareDaily>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_forecast: Option<Vec<ShareHourly>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareCurrent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<ShareTemperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<ShareWind>,
    #[serde(rename = "uV", skip_serializing_if = "Option::is_none")]
    pub uv: Option<ShareUV>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_quality: Option<ShareAirQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_humidity: Option<SharePercent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dew_point: Option<ShareDoubleUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<ShareDoubleUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<SharePercent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<ShareDoubleUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<ShareDoubleUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_forecast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_forecast: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareDaily {
    /// Epoch milliseconds.
    pub date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_quality: Option<ShareAirQuality>,
    #[serde(rename = "uV", skip_serializing_if = "Option::is_none")]
    pub uv: Option<ShareUV>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunshine_duration: Option<ShareDoubleUnit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareHourly {
    /// Epoch milliseconds.
    pub date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<ShareTemperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<ShareDoubleUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<ShareWind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<ShareDoubleUnit>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareTemperature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<ShareDoubleUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_feel_temperature: Option<ShareDoubleUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_feel_shader_temperature: Option<ShareDoubleUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apparent_temperature: Option<ShareDoubleUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_chill_temperature: Option<ShareDoubleUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wet_bulb_temperature: Option<ShareDoubleUnit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareWind {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<ShareDoubleUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gusts: Option<ShareDoubleUnit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareUV {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareAirQuality {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_color: Option<i32>,
    pub pollutants: Vec<SharePollutant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharePollutant {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub concentration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharePercent {
    pub value: f64,
    pub formatted: String,
}

/// A measurement in its native unit alongside the user's preferred unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareDoubleUnit {
    pub original_value: f64,
    pub original_unit: String,
    pub preferred_unit_value: f64,
    pub preferred_unit_unit: String,
    pub preferred_unit_formatted: String,
    pub preferred_unit_formatted_short: String,
}
