use crate::config::SourceConfig;
use crate::error::WeatherError;
use crate::sources::{ConfigurableSource, Preference, Source};
use crate::weather::normalizer::WeatherNormalizer;
use crate::weather::provider::{WeatherProvider, build_http_client, endpoint, get_json};
use crate::weather::types::{
    AirQuality, Base, Current, Daily, Location, Temperature, UV, Weather, Wind,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/";
pub const OPEN_METEO_AIR_QUALITY_BASE_URL: &str = "https://air-quality-api.open-meteo.com/";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,dew_point_2m,weather_code,cloud_cover,pressure_msl,wind_speed_10m,wind_direction_10m,wind_gusts_10m,visibility,uv_index";
const DAILY_FIELDS: &str = "uv_index_max,sunshine_duration";
const AIR_QUALITY_FIELDS: &str =
    "pm2_5,pm10,sulphur_dioxide,nitrogen_dioxide,ozone,carbon_monoxide";

pub struct OpenMeteoProvider {
    client: reqwest::Client,
    base_url: String,
    air_quality_url: String,
    air_quality: bool,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: Option<CurrentWeather>,
    daily: Option<DailyWeather>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CurrentWeather {
    time: Option<i64>,
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    apparent_temperature: Option<f64>,
    dew_point_2m: Option<f64>,
    weather_code: Option<i32>,
    cloud_cover: Option<f64>,
    pressure_msl: Option<f64>,
    wind_speed_10m: Option<f64>,
    wind_direction_10m: Option<f64>,
    wind_gusts_10m: Option<f64>,
    visibility: Option<f64>,
    uv_index: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DailyWeather {
    time: Vec<i64>,
    uv_index_max: Vec<Option<f64>>,
    /// Seconds.
    sunshine_duration: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    current: Option<CurrentAirQuality>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CurrentAirQuality {
    pm2_5: Option<f64>,
    pm10: Option<f64>,
    sulphur_dioxide: Option<f64>,
    nitrogen_dioxide: Option<f64>,
    ozone: Option<f64>,
    /// µg/m³, unlike the mg/m³ of the domain model.
    carbon_monoxide: Option<f64>,
}

impl OpenMeteoProvider {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            client: build_http_client(),
            base_url: config
                .get("instance")
                .unwrap_or(OPEN_METEO_BASE_URL)
                .to_string(),
            air_quality_url: config
                .get("air_quality_instance")
                .unwrap_or(OPEN_METEO_AIR_QUALITY_BASE_URL)
                .to_string(),
            air_quality: config.get_bool("air_quality", true),
        }
    }

    fn forecast_request(&self, location: &Location) -> reqwest::RequestBuilder {
        self.client
            .get(endpoint(&self.base_url, "v1/forecast"))
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("wind_speed_unit", "ms".to_string()),
                ("timeformat", "unixtime".to_string()),
                ("timezone", "GMT".to_string()),
                ("forecast_days", "7".to_string()),
            ])
    }

    fn air_quality_request(&self, location: &Location) -> reqwest::RequestBuilder {
        self.client
            .get(endpoint(&self.air_quality_url, "v1/air-quality"))
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", AIR_QUALITY_FIELDS.to_string()),
                ("timeformat", "unixtime".to_string()),
            ])
    }

    fn convert_current(current: CurrentWeather, air_quality: Option<AirQuality>) -> Current {
        let weather_code = current.weather_code.and_then(WeatherNormalizer::wmo_code);

        let temperature = current.temperature_2m.map(|value| Temperature {
            temperature: Some(value),
            apparent_temperature: current.apparent_temperature,
            ..Temperature::default()
        });

        let wind = if current.wind_speed_10m.is_some() || current.wind_direction_10m.is_some() {
            Some(Wind {
                degree: current.wind_direction_10m,
                speed: current.wind_speed_10m,
                gusts: current.wind_gusts_10m,
            })
        } else {
            None
        };

        Current {
            weather_text: weather_code.map(|code| code.text().to_string()),
            weather_code,
            temperature,
            wind,
            uv: current.uv_index.map(|index| UV { index: Some(index) }),
            air_quality,
            relative_humidity: current.relative_humidity_2m,
            dew_point: current.dew_point_2m,
            pressure: current.pressure_msl,
            cloud_cover: current.cloud_cover.map(|c| c.round() as i32),
            visibility: current.visibility,
            ..Current::default()
        }
    }

    fn convert_daily(daily: DailyWeather) -> Vec<Daily> {
        daily
            .time
            .iter()
            .enumerate()
            .filter_map(|(i, ts)| {
                let date = DateTime::<Utc>::from_timestamp(*ts, 0)?;
                Some(Daily {
                    date,
                    air_quality: None,
                    uv: daily
                        .uv_index_max
                        .get(i)
                        .copied()
                        .flatten()
                        .map(|index| UV { index: Some(index) }),
                    sunshine_duration: daily
                        .sunshine_duration
                        .get(i)
                        .copied()
                        .flatten()
                        .map(|seconds| seconds / 3600.0),
                })
            })
            .collect()
    }

    fn convert_air_quality(current: CurrentAirQuality) -> Option<AirQuality> {
        let air_quality = AirQuality {
            pm25: current.pm2_5,
            pm10: current.pm10,
            so2: current.sulphur_dioxide,
            no2: current.nitrogen_dioxide,
            o3: current.ozone,
            co: current.carbon_monoxide.map(|ug| ug / 1000.0),
        };
        (!air_quality.is_empty()).then_some(air_quality)
    }

    fn convert(response: OpenMeteoResponse, air_quality: Option<AirQuality>) -> Weather {
        let refresh_time = response
            .current
            .as_ref()
            .and_then(|c| c.time)
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .or_else(|| Some(Utc::now()));

        Weather {
            base: Base { refresh_time },
            current: response
                .current
                .map(|current| Self::convert_current(current, air_quality)),
            daily: response.daily.map(Self::convert_daily).unwrap_or_default(),
            hourly: Vec::new(),
        }
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}

impl Source for OpenMeteoProvider {
    fn id(&self) -> &'static str {
        "open_meteo"
    }

    fn name(&self) -> &'static str {
        "Open-Meteo"
    }
}

impl ConfigurableSource for OpenMeteoProvider {
    fn preferences(&self, config: &SourceConfig) -> Vec<Preference> {
        vec![
            Preference::instance(config, OPEN_METEO_BASE_URL),
            Preference::EditText {
                key: "air_quality_instance",
                title: "Air quality instance",
                summary: None,
                value: config.get("air_quality_instance").map(|v| v.to_string()),
                default: Some(OPEN_METEO_AIR_QUALITY_BASE_URL),
            },
            Preference::Switch {
                key: "air_quality",
                title: "Fetch air quality",
                value: config.get_bool("air_quality", true),
            },
        ]
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn weather(&self, location: &Location) -> Result<Weather, WeatherError> {
        let response: OpenMeteoResponse = get_json(self.forecast_request(location)).await?;

        if !self.air_quality {
            return Ok(Self::convert(response, None));
        }

        // Air quality is a separate service; losing it must not lose the forecast.
        let air_quality = match get_json::<AirQualityResponse>(self.air_quality_request(location))
            .await
        {
            Ok(aq) => aq.current.and_then(Self::convert_air_quality),
            Err(e) => {
                tracing::warn!(location = %location.id, error = %e, "air quality unavailable");
                None
            }
        };

        Ok(Self::convert(response, air_quality))
    }

    fn as_configurable(&self) -> Option<&dyn ConfigurableSource> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::types::WeatherCode;
    use serde_json::json;

    fn location() -> Location {
        Location {
            id: "berlin".to_string(),
            latitude: 52.52,
            longitude: 13.41,
            ..Location::default()
        }
    }

    #[test]
    fn test_forecast_request_parameters() {
        let provider = OpenMeteoProvider::default();
        let request = provider.forecast_request(&location()).build().unwrap();
        let url = request.url();

        assert_eq!(url.host_str(), Some("api.open-meteo.com"));
        assert_eq!(url.path(), "/v1/forecast");
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(query.contains(&("latitude".to_string(), "52.52".to_string())));
        assert!(query.contains(&("wind_speed_unit".to_string(), "ms".to_string())));
        assert!(query.contains(&("timeformat".to_string(), "unixtime".to_string())));
    }

    #[test]
    fn test_instance_preference_overrides_base_url() {
        let mut config = SourceConfig::default();
        config.insert("instance", "https://meteo.example.org/");
        let provider = OpenMeteoProvider::new(&config);
        let request = provider.forecast_request(&location()).build().unwrap();
        assert_eq!(request.url().host_str(), Some("meteo.example.org"));

        let prefs = provider.preferences(&config);
        assert_eq!(
            prefs[0].effective_value().as_deref(),
            Some("https://meteo.example.org/")
        );
        assert_eq!(
            prefs[1].effective_value().as_deref(),
            Some(OPEN_METEO_AIR_QUALITY_BASE_URL)
        );
        assert_eq!(prefs[2].key(), "air_quality");
        assert_eq!(prefs[2].effective_value().as_deref(), Some("true"));
    }

    #[test]
    fn test_convert_full_response() {
        let response: OpenMeteoResponse = serde_json::from_value(json!({
            "current": {
                "time": 1_700_000_000,
                "temperature_2m": 4.2,
                "relative_humidity_2m": 81.0,
                "apparent_temperature": 1.1,
                "dew_point_2m": 1.3,
                "weather_code": 61,
                "cloud_cover": 87.4,
                "pressure_msl": 1008.6,
                "wind_speed_10m": 5.3,
                "wind_direction_10m": 240.0,
                "wind_gusts_10m": 11.2,
                "visibility": 24140.0,
                "uv_index": 0.4
            },
            "daily": {
                "time": [1_699_920_000, 1_700_006_400],
                "uv_index_max": [1.2, null],
                "sunshine_duration": [7200.0, 0.0]
            }
        }))
        .unwrap();

        let weather = OpenMeteoProvider::convert(response, None);
        let current = weather.current.unwrap();

        assert_eq!(
            weather.base.refresh_time.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
        assert_eq!(current.weather_code, Some(WeatherCode::Rain));
        assert_eq!(current.weather_text.as_deref(), Some("Rain"));
        let temperature = current.temperature.unwrap();
        assert_eq!(temperature.temperature, Some(4.2));
        assert_eq!(temperature.apparent_temperature, Some(1.1));
        assert_eq!(current.cloud_cover, Some(87));
        assert_eq!(current.wind.unwrap().gusts, Some(11.2));
        assert!(current.air_quality.is_none());

        assert_eq!(weather.daily.len(), 2);
        assert_eq!(weather.daily[0].sunshine_duration, Some(2.0));
        assert!(weather.daily[1].uv.is_none());
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let response: OpenMeteoResponse = serde_json::from_value(json!({
            "current": { "time": 1_700_000_000 }
        }))
        .unwrap();

        let current = OpenMeteoProvider::convert(response, None).current.unwrap();
        assert!(current.temperature.is_none());
        assert!(current.wind.is_none());
        assert!(current.weather_code.is_none());
        assert!(current.visibility.is_none());
    }

    #[test]
    fn test_air_quality_converts_carbon_monoxide_to_mg() {
        let aq = OpenMeteoProvider::convert_air_quality(CurrentAirQuality {
            pm2_5: Some(8.0),
            carbon_monoxide: Some(250.0),
            ..CurrentAirQuality::default()
        })
        .unwrap();
        assert_eq!(aq.pm25, Some(8.0));
        assert_eq!(aq.co, Some(0.25));

        assert!(OpenMeteoProvider::convert_air_quality(CurrentAirQuality::default()).is_none());
    }
}
