use crate::weather::types::WeatherCode;

pub struct WeatherNormalizer;

impl WeatherNormalizer {
    /// Maps a WMO 4677 present-weather code to a [`WeatherCode`].
    pub fn wmo_code(code: i32) -> Option<WeatherCode> {
        match code {
            0 => Some(WeatherCode::Clear),
            1 | 2 => Some(WeatherCode::PartlyCloudy),
            3 => Some(WeatherCode::Cloudy),
            45 | 48 => Some(WeatherCode::Fog),
            51 | 53 | 55 | 61 | 63 | 65 | 80 | 81 | 82 => Some(WeatherCode::Rain),
            56 | 57 | 66 | 67 => Some(WeatherCode::Sleet),
            71 | 73 | 75 | 77 | 85 | 86 => Some(WeatherCode::Snow),
            95 => Some(WeatherCode::Thunderstorm),
            96 | 99 => Some(WeatherCode::Hail),
            _ => None,
        }
    }

    /// Maps an Ilmateenistus phenomenon class name.
    pub fn phenomenon(class_name: &str) -> Option<WeatherCode> {
        match class_name.trim().to_lowercase().as_str() {
            "clear" => Some(WeatherCode::Clear),
            "few_clouds" | "variable_clouds" | "cloudy_with_clear_spells" => {
                Some(WeatherCode::PartlyCloudy)
            }
            "cloudy" | "overcast" => Some(WeatherCode::Cloudy),
            "light_shower" | "moderate_shower" | "heavy_shower" | "light_rain"
            | "moderate_rain" | "heavy_rain" => Some(WeatherCode::Rain),
            "glaze" | "light_sleet" | "moderate_sleet" => Some(WeatherCode::Sleet),
            "light_snow_shower" | "moderate_snow_shower" | "heavy_snow_shower"
            | "light_snowfall" | "moderate_snowfall" | "heavy_snowfall" | "blowing_snow"
            | "drifting_snow" | "snowstorm" => Some(WeatherCode::Snow),
            "hail" => Some(WeatherCode::Hail),
            "mist" | "fog" => Some(WeatherCode::Fog),
            "haze" => Some(WeatherCode::Haze),
            "thunder" => Some(WeatherCode::Thunder),
            "thunderstorm" => Some(WeatherCode::Thunderstorm),
            _ => None,
        }
    }
}
