use crate::error::WeatherError;
use crate::share::json::{
    ShareAirQuality, ShareCurrent, ShareDaily, ShareData, ShareDoubleUnit, ShareHourly,
    ShareLocation, SharePercent, SharePollutant, ShareTemperature, ShareUV, ShareWeather, ShareWind,
};
use crate::sources::{BroadcastSource, Extras, Source};
use crate::units::{DurationUnit, MeasurementUnit, UnitSettings};
use crate::weather::air_quality::PollutantIndex;
use crate::weather::types::{
    AirQuality, Current, Daily, Hourly, Location, Temperature, UV, Wind,
};

pub const SHARE_EXTRA_KEY: &str = "WeatherJson";

const SHARE_ACTION: &str = "org.breezyweather.ACTION_GENERIC_WEATHER";

/// Serializes refreshed locations into the weather share payload, converting
/// every measurement to the user's preferred units.
pub struct ShareService {
    units: UnitSettings,
    app_version: String,
}

impl ShareService {
    pub fn new(units: UnitSettings) -> Self {
        Self {
            units,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Locations without current conditions are left out.
    pub fn share_data(&self, locations: &[Location]) -> ShareData {
        ShareData {
            app_version: self.app_version.clone(),
            locations: locations
                .iter()
                .filter(|location| {
                    location
                        .weather
                        .as_ref()
                        .is_some_and(|weather| weather.current.is_some())
                })
                .map(|location| self.location(location))
                .collect(),
        }
    }

    fn location(&self, location: &Location) -> ShareLocation {
        ShareLocation {
            // The user-chosen id; coordinates must not leak through it.
            id: location.id.clone(),
            timezone: location.timezone.clone(),
            country: location.country.clone(),
            country_code: location.country_code.clone(),
            province: location.province.clone(),
            province_code: location.province_code.clone(),
            city: location.city.clone(),
            district: location.district.clone(),
            weather: location.weather.as_ref().map(|weather| ShareWeather {
                refresh_time: weather.base.refresh_time.map(|t| t.timestamp_millis()),
                current: weather.current.as_ref().map(|current| self.current(current)),
                daily_forecast: self.daily(&weather.daily),
                hourly_forecast: self.hourly(&weather.hourly),
            }),
        }
    }

    fn current(&self, current: &Current) -> ShareCurrent {
        ShareCurrent {
            weather_text: current.weather_text.clone(),
            weather_code: current.weather_code.map(|code| code.id().to_string()),
            temperature: current
                .temperature
                .as_ref()
                .map(|temperature| self.temperature(temperature)),
            wind: current.wind.as_ref().map(|wind| self.wind(wind)),
            uv: current.uv.as_ref().map(uv),
            air_quality: current.air_quality.as_ref().map(air_quality),
            relative_humidity: percent(current.relative_humidity),
            dew_point: self.temperature_unit(current.dew_point),
            pressure: double_unit(current.pressure, "mb", self.units.pressure),
            cloud_cover: percent(current.cloud_cover.map(f64::from)),
            visibility: double_unit(current.visibility, "m", self.units.distance),
            ceiling: double_unit(current.ceiling, "m", self.units.distance),
            daily_forecast: current.daily_forecast.clone(),
            hourly_forecast: current.hourly_forecast.clone(),
        }
    }

    fn daily(&self, daily: &[Daily]) -> Option<Vec<ShareDaily>> {
        if daily.is_empty() {
            return None;
        }

        Some(
            daily
                .iter()
                .map(|day| ShareDaily {
                    date: day.date.timestamp_millis(),
                    air_quality: day.air_quality.as_ref().map(air_quality),
                    uv: day.uv.as_ref().map(uv),
                    sunshine_duration: double_unit(day.sunshine_duration, "h", DurationUnit::H),
                })
                .collect(),
        )
    }

    fn hourly(&self, hourly: &[Hourly]) -> Option<Vec<ShareHourly>> {
        if hourly.is_empty() {
            return None;
        }

        Some(
            hourly
                .iter()
                .map(|hour| ShareHourly {
                    date: hour.date.timestamp_millis(),
                    weather_text: hour.weather_text.clone(),
                    weather_code: hour.weather_code.map(|code| code.id().to_string()),
                    temperature: hour
                        .temperature
                        .as_ref()
                        .map(|temperature| self.temperature(temperature)),
                    precipitation: double_unit(
                        hour.precipitation,
                        "mm",
                        self.units.precipitation,
                    ),
                    wind: hour.wind.as_ref().map(|wind| self.wind(wind)),
                    pressure: double_unit(hour.pressure, "mb", self.units.pressure),
                })
                .collect(),
        )
    }

    fn temperature(&self, temperature: &Temperature) -> ShareTemperature {
        ShareTemperature {
            temperature: self.temperature_unit(temperature.temperature),
            real_feel_temperature: self.temperature_unit(temperature.real_feel_temperature),
            real_feel_shader_temperature: self
                .temperature_unit(temperature.real_feel_shade_temperature),
            apparent_temperature: self.temperature_unit(temperature.apparent_temperature),
            wind_chill_temperature: self.temperature_unit(temperature.wind_chill_temperature),
            wet_bulb_temperature: self.temperature_unit(temperature.wet_bulb_temperature),
        }
    }

    fn temperature_unit(&self, celsius: Option<f64>) -> Option<ShareDoubleUnit> {
        double_unit(celsius, "c", self.units.temperature)
    }

    fn wind(&self, wind: &Wind) -> ShareWind {
        ShareWind {
            degree: wind.degree,
            speed: double_unit(wind.speed, "mps", self.units.speed),
            gusts: double_unit(wind.gusts, "mps", self.units.speed),
        }
    }
}

fn double_unit<U: MeasurementUnit>(
    value: Option<f64>,
    original_unit: &str,
    unit: U,
) -> Option<ShareDoubleUnit> {
    value.map(|value| ShareDoubleUnit {
        original_value: value,
        original_unit: original_unit.to_string(),
        preferred_unit_value: unit.convert(value),
        preferred_unit_unit: unit.id().to_string(),
        preferred_unit_formatted: unit.value_text(value),
        preferred_unit_formatted_short: unit.short_value_text(value),
    })
}

fn percent(value: Option<f64>) -> Option<SharePercent> {
    value.map(|value| SharePercent {
        value,
        formatted: format!("{:.0}%", value),
    })
}

fn uv(uv: &UV) -> ShareUV {
    ShareUV { index: uv.index }
}

fn air_quality(air_quality: &AirQuality) -> ShareAirQuality {
    ShareAirQuality {
        index: air_quality.index(),
        index_color: air_quality.color(None),
        pollutants: PollutantIndex::ALL
            .iter()
            .filter_map(|pollutant| {
                let concentration = air_quality.concentration(*pollutant)?;
                Some(SharePollutant {
                    id: pollutant.id().to_string(),
                    name: air_quality
                        .level_name(Some(*pollutant))
                        .map(|name| name.to_string()),
                    concentration,
                    index: air_quality.pollutant_index(*pollutant),
                    color: air_quality.color(Some(*pollutant)),
                })
            })
            .collect(),
    }
}

impl Source for ShareService {
    fn id(&self) -> &'static str {
        "breezydatashare"
    }

    fn name(&self) -> &'static str {
        "Breezy Weather"
    }
}

impl BroadcastSource for ShareService {
    fn intent_action(&self) -> &'static str {
        SHARE_ACTION
    }

    fn extras(&self, locations: &[Location]) -> Result<Extras, WeatherError> {
        let data = self.share_data(locations);
        tracing::debug!(
            exported = data.locations.len(),
            skipped = locations.len() - data.locations.len(),
            "built weather share payload"
        );

        let mut extras = Extras::new();
        extras.insert(SHARE_EXTRA_KEY.to_string(), serde_json::to_string(&data)?);
        Ok(extras)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{
        DistanceUnit, PrecipitationUnit, PressureUnit, SpeedUnit, TemperatureUnit,
    };
    use crate::weather::types::{Base, Weather, WeatherCode};
    use chrono::{DateTime, Utc};
    use serde_json::{Value, json};

    fn refresh_time() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn location(id: &str, current: Option<Current>) -> Location {
        Location {
            id: id.to_string(),
            latitude: 59.437,
            longitude: 24.7536,
            timezone: "Europe/Tallinn".to_string(),
            country: Some("Estonia".to_string()),
            country_code: Some("EE".to_string()),
            city: Some("Tallinn".to_string()),
            source: "ilmateenistus".to_string(),
            weather: Some(Weather {
                base: Base {
                    refresh_time: Some(refresh_time()),
                },
                current,
                daily: Vec::new(),
                hourly: Vec::new(),
            }),
            ..Location::default()
        }
    }

    fn full_current() -> Current {
        Current {
            weather_text: Some("Light rain".to_string()),
            weather_code: Some(WeatherCode::Rain),
            temperature: Some(Temperature {
                temperature: Some(20.0),
                apparent_temperature: Some(18.0),
                ..Temperature::default()
            }),
            wind: Some(Wind {
                degree: Some(210.0),
                speed: Some(10.0),
                gusts: None,
            }),
            uv: Some(UV { index: Some(3.0) }),
            air_quality: Some(AirQuality {
                pm25: Some(22.5),
                o3: Some(50.0),
                ..AirQuality::default()
            }),
            relative_humidity: Some(73.4),
            dew_point: Some(-5.0),
            pressure: Some(1013.25),
            cloud_cover: Some(88),
            visibility: Some(12_500.0),
            ..Current::default()
        }
    }

    fn imperial_service() -> ShareService {
        ShareService::new(UnitSettings {
            temperature: TemperatureUnit::F,
            distance: DistanceUnit::Km,
            speed: SpeedUnit::Kph,
            pressure: PressureUnit::Inhg,
            ..UnitSettings::default()
        })
    }

    fn payload(service: &ShareService, locations: &[Location]) -> Value {
        let extras = service.extras(locations).unwrap();
        serde_json::from_str(&extras[SHARE_EXTRA_KEY]).unwrap()
    }

    #[test]
    fn test_locations_without_current_are_skipped() {
        let mut no_weather = location("no-weather", None);
        no_weather.weather = None;
        let locations = vec![
            location("with-current", Some(full_current())),
            location("no-current", None),
            no_weather,
        ];

        let data = imperial_service().share_data(&locations);
        assert_eq!(data.locations.len(), 1);
        assert_eq!(data.locations[0].id, "with-current");
        assert_eq!(data.app_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_temperature_keeps_celsius_original() {
        let data = imperial_service().share_data(&[location("home", Some(full_current()))]);
        let current = data.locations[0]
            .weather
            .as_ref()
            .and_then(|w| w.current.as_ref())
            .unwrap();
        let temperature = current
            .temperature
            .as_ref()
            .and_then(|t| t.temperature.as_ref())
            .unwrap();

        assert_eq!(temperature.original_value, 20.0);
        assert_eq!(temperature.original_unit, "c");
        assert_eq!(temperature.preferred_unit_value, TemperatureUnit::F.convert(20.0));
        assert_eq!(temperature.preferred_unit_unit, "f");
        assert_eq!(temperature.preferred_unit_formatted, "68°F");
        assert_eq!(temperature.preferred_unit_formatted_short, "68°");

        let dew_point = current.dew_point.as_ref().unwrap();
        assert_eq!(dew_point.original_unit, "c");
        assert_eq!(dew_point.preferred_unit_value, 23.0);
    }

    #[test]
    fn test_wire_format() {
        let json = payload(&imperial_service(), &[location("home", Some(full_current()))]);
        let location = &json["locations"][0];

        assert_eq!(location["id"], "home");
        assert_eq!(location["timezone"], "Europe/Tallinn");
        assert_eq!(location["countryCode"], "EE");
        // absent administrative fields are omitted, not null
        assert!(location.get("province").is_none());
        assert!(location.get("district").is_none());

        let weather = &location["weather"];
        assert_eq!(weather["refreshTime"], json!(1_700_000_000_000i64));
        assert!(weather.get("dailyForecast").is_none());

        let current = &weather["current"];
        assert_eq!(current["weatherText"], "Light rain");
        assert_eq!(current["weatherCode"], "rain");
        assert_eq!(current["uV"]["index"], 3.0);
        assert_eq!(current["relativeHumidity"], json!({ "value": 73.4, "formatted": "73%" }));
        assert_eq!(current["cloudCover"], json!({ "value": 88.0, "formatted": "88%" }));

        let speed = &current["wind"]["speed"];
        assert_eq!(speed["originalUnit"], "mps");
        assert_eq!(speed["preferredUnitUnit"], "kph");
        assert_eq!(speed["preferredUnitValue"], 36.0);
        assert_eq!(speed["preferredUnitFormatted"], "36.0 km/h");
        assert!(current["wind"].get("gusts").is_none());

        let pressure = &current["pressure"];
        assert_eq!(pressure["originalUnit"], "mb");
        assert_eq!(pressure["preferredUnitUnit"], "inhg");
        assert_eq!(pressure["preferredUnitFormatted"], "29.92 inHg");

        let visibility = &current["visibility"];
        assert_eq!(visibility["originalUnit"], "m");
        assert_eq!(visibility["preferredUnitValue"], 12.5);
        assert!(current.get("ceiling").is_none());

        assert!(current["temperature"].get("realFeelShaderTemperature").is_none());
        assert_eq!(current["temperature"]["apparentTemperature"]["originalValue"], 18.0);
    }

    #[test]
    fn test_air_quality_pollutants_in_fixed_order() {
        let json = payload(&imperial_service(), &[location("home", Some(full_current()))]);
        let air_quality = &json["locations"][0]["weather"]["current"]["airQuality"];

        // pm25 at 22.5 µg/m³ is AQI 75, o3 at 50 µg/m³ is AQI 20
        assert_eq!(air_quality["index"], 75);
        assert_eq!(air_quality["indexColor"], json!(0xFFFF712Bu32 as i32));

        let pollutants = air_quality["pollutants"].as_array().unwrap();
        let ids: Vec<&str> = pollutants.iter().filter_map(|p| p["id"].as_str()).collect();
        assert_eq!(ids, ["pm25", "o3"]);
        assert_eq!(pollutants[0]["concentration"], 22.5);
        assert_eq!(pollutants[0]["name"], "Poor");
        assert_eq!(pollutants[1]["index"], 20);
        assert_eq!(pollutants[1]["name"], "Fair");
    }

    #[test]
    fn test_empty_current_yields_empty_object() {
        let json = payload(&imperial_service(), &[location("home", Some(Current::default()))]);
        assert_eq!(json["locations"][0]["weather"]["current"], json!({}));
    }

    #[test]
    fn test_daily_forecast_is_exported() {
        let mut loc = location("home", Some(Current::default()));
        if let Some(weather) = loc.weather.as_mut() {
            weather.daily = vec![Daily {
                date: refresh_time(),
                air_quality: None,
                uv: Some(UV { index: Some(5.0) }),
                sunshine_duration: Some(6.5),
            }];
        }

        let json = payload(&imperial_service(), &[loc]);
        let day = &json["locations"][0]["weather"]["dailyForecast"][0];
        assert_eq!(day["date"], json!(1_700_000_000_000i64));
        assert_eq!(day["uV"]["index"], 5.0);
        assert_eq!(day["sunshineDuration"]["originalUnit"], "h");
        assert_eq!(day["sunshineDuration"]["preferredUnitUnit"], "h");
        assert_eq!(day["sunshineDuration"]["preferredUnitFormatted"], "6.5 h");
        assert!(day.get("airQuality").is_none());
    }

    #[test]
    fn test_hourly_forecast_is_exported() {
        let mut loc = location("home", Some(Current::default()));
        if let Some(weather) = loc.weather.as_mut() {
            weather.hourly = vec![Hourly {
                date: refresh_time(),
                weather_text: Some("Sleet".to_string()),
                weather_code: Some(WeatherCode::Sleet),
                temperature: Some(Temperature::from_celsius(0.5)),
                precipitation: Some(2.54),
                wind: Some(Wind {
                    degree: Some(90.0),
                    speed: Some(5.0),
                    gusts: None,
                }),
                pressure: None,
            }];
        }

        let service = ShareService::new(UnitSettings {
            precipitation: PrecipitationUnit::In,
            ..UnitSettings::default()
        });
        let json = payload(&service, &[loc]);
        let hour = &json["locations"][0]["weather"]["hourlyForecast"][0];
        assert_eq!(hour["date"], json!(1_700_000_000_000i64));
        assert_eq!(hour["weatherCode"], "sleet");
        assert_eq!(hour["temperature"]["temperature"]["originalValue"], 0.5);
        assert_eq!(hour["precipitation"]["originalUnit"], "mm");
        assert_eq!(hour["precipitation"]["preferredUnitUnit"], "in");
        assert_eq!(hour["wind"]["speed"]["preferredUnitValue"], 18.0);
        assert!(hour.get("pressure").is_none());
    }

    #[test]
    fn test_broadcast_identity() {
        let service = ShareService::new(UnitSettings::default());
        assert_eq!(service.id(), "breezydatashare");
        assert_eq!(service.intent_action(), "org.breezyweather.ACTION_GENERIC_WEATHER");

        let extras = service.extras(&[]).unwrap();
        let json: Value = serde_json::from_str(&extras[SHARE_EXTRA_KEY]).unwrap();
        assert_eq!(json["locations"], json!([]));
    }
}
