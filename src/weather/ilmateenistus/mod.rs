mod api;
mod json;

use api::IlmateenistusApi;

use crate::config::SourceConfig;
use crate::error::WeatherError;
use crate::sources::{ConfigurableSource, Preference, Source};
use crate::weather::normalizer::WeatherNormalizer;
use crate::weather::provider::{WeatherProvider, build_http_client};
use crate::weather::types::{Base, Current, Hourly, Location, Temperature, Weather, Wind};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Europe::Tallinn;
use json::{IlmateenistusForecastResult, IlmateenistusTime, number};

pub const ILMATEENISTUS_BASE_URL: &str = "https://www.ilmateenistus.ee/";

// Coverage of the meteogram grid.
const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = 57.3..=59.9;
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = 21.5..=28.3;

pub struct IlmateenistusService {
    api: IlmateenistusApi,
}

impl IlmateenistusService {
    pub fn new(config: &SourceConfig) -> Self {
        let base_url = config.get("instance").unwrap_or(ILMATEENISTUS_BASE_URL);
        Self {
            api: IlmateenistusApi::new(build_http_client(), base_url),
        }
    }

    fn convert(result: IlmateenistusForecastResult) -> Result<Weather, WeatherError> {
        let times = result
            .forecast
            .and_then(|f| f.tabular)
            .map(|t| t.time)
            .unwrap_or_default();

        let hourly: Vec<Hourly> = times.iter().filter_map(Self::convert_hour).collect();
        if hourly.is_empty() {
            return Err(WeatherError::Parse(
                "Ilmateenistus meteogram contained no forecast entries".to_string(),
            ));
        }

        // The meteogram starts at the current hour.
        let current = hourly.first().map(|first| Current {
            weather_text: first.weather_text.clone(),
            weather_code: first.weather_code,
            temperature: first.temperature.clone(),
            wind: first.wind.clone(),
            pressure: first.pressure,
            ..Current::default()
        });

        Ok(Weather {
            base: Base {
                refresh_time: Some(Utc::now()),
            },
            current,
            daily: Vec::new(),
            hourly,
        })
    }

    fn convert_hour(time: &IlmateenistusTime) -> Option<Hourly> {
        let date = parse_time(&time.attributes.from)?;

        let phenomenon = time.phenomen.as_ref().map(|p| &p.attributes);
        let weather_code = phenomenon
            .and_then(|p| p.class_name.as_deref())
            .and_then(WeatherNormalizer::phenomenon);
        let weather_text = phenomenon
            .and_then(|p| p.en.clone())
            .or_else(|| weather_code.map(|code| code.text().to_string()));

        let speed = number(
            time.wind_speed
                .as_ref()
                .and_then(|w| w.attributes.mps.as_deref()),
        );
        let degree = number(
            time.wind_direction
                .as_ref()
                .and_then(|w| w.attributes.deg.as_deref()),
        );
        let wind = (speed.is_some() || degree.is_some()).then_some(Wind {
            degree,
            speed,
            gusts: None,
        });

        Some(Hourly {
            date,
            weather_text,
            weather_code,
            temperature: number(
                time.temperature
                    .as_ref()
                    .and_then(|t| t.attributes.value.as_deref()),
            )
            .map(Temperature::from_celsius),
            precipitation: number(
                time.precipitation
                    .as_ref()
                    .and_then(|p| p.attributes.value.as_deref()),
            ),
            wind,
            // hPa and mb are the same scale
            pressure: number(
                time.pressure
                    .as_ref()
                    .and_then(|p| p.attributes.value.as_deref()),
            ),
        })
    }
}

/// Accepts RFC 3339 timestamps; offset-less timestamps are Estonian local time.
fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())?;

    // The repeated hour when DST ends resolves to its first occurrence.
    Tallinn
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

impl Default for IlmateenistusService {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}

impl Source for IlmateenistusService {
    fn id(&self) -> &'static str {
        "ilmateenistus"
    }

    fn name(&self) -> &'static str {
        "Ilmateenistus"
    }
}

impl ConfigurableSource for IlmateenistusService {
    fn preferences(&self, config: &SourceConfig) -> Vec<Preference> {
        vec![Preference::instance(config, ILMATEENISTUS_BASE_URL)]
    }
}

#[async_trait]
impl WeatherProvider for IlmateenistusService {
    async fn weather(&self, location: &Location) -> Result<Weather, WeatherError> {
        if !self.is_supported(location) {
            return Err(WeatherError::UnsupportedLocation {
                source_name: self.name(),
                location: location.display_name(),
            });
        }

        let result = self.api.get_hourly(&location.coordinates()).await?;
        Self::convert(result)
    }

    fn is_supported(&self, location: &Location) -> bool {
        match location.country_code.as_deref() {
            Some(code) => code.eq_ignore_ascii_case("EE"),
            None => {
                LATITUDE_RANGE.contains(&location.latitude)
                    && LONGITUDE_RANGE.contains(&location.longitude)
            }
        }
    }

    fn as_configurable(&self) -> Option<&dyn ConfigurableSource> {
        Some(self)
    }
}
