//! Preferred display units.
//!
//! Providers are normalized into fixed native units (°C, m/s, m, mb, mm, h).
//! Every unit here converts *from* that native unit and knows how to format
//! the converted value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub trait MeasurementUnit: Copy {
    fn id(&self) -> &'static str;

    /// Converts a value expressed in the native unit of the quantity.
    fn convert(&self, native: f64) -> f64;

    fn value_text(&self, native: f64) -> String;

    fn short_value_text(&self, native: f64) -> String {
        self.value_text(native)
    }
}

fn format_value(value: f64, decimals: usize, suffix: &str) -> String {
    format!("{:.*}{}", decimals, value, suffix)
}

macro_rules! unit_from_str {
    ($unit:ty, $kind:literal, [$($variant:ident),+ $(,)?]) => {
        impl $unit {
            pub const ALL: &'static [$unit] = &[$(<$unit>::$variant),+];
        }

        impl FromStr for $unit {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|unit| unit.id() == lower)
                    .ok_or_else(|| {
                        let valid: Vec<&str> = Self::ALL.iter().map(|u| u.id()).collect();
                        format!(
                            "Unknown {} unit '{}'. Valid options: {}",
                            $kind,
                            s,
                            valid.join(", ")
                        )
                    })
            }
        }

        impl fmt::Display for $unit {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    C,
    F,
    K,
}

impl MeasurementUnit for TemperatureUnit {
    fn id(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::F => "f",
            Self::K => "k",
        }
    }

    fn convert(&self, celsius: f64) -> f64 {
        match self {
            Self::C => celsius,
            Self::F => celsius * 9.0 / 5.0 + 32.0,
            Self::K => celsius + 273.15,
        }
    }

    fn value_text(&self, celsius: f64) -> String {
        let suffix = match self {
            Self::C => "°C",
            Self::F => "°F",
            Self::K => "K",
        };
        format_value(self.convert(celsius), 0, suffix)
    }

    fn short_value_text(&self, celsius: f64) -> String {
        let suffix = match self {
            Self::C | Self::F => "°",
            Self::K => "K",
        };
        format_value(self.convert(celsius), 0, suffix)
    }
}

unit_from_str!(TemperatureUnit, "temperature", [C, F, K]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    M,
    Km,
    Mi,
    Nmi,
    Ft,
}

impl MeasurementUnit for DistanceUnit {
    fn id(&self) -> &'static str {
        match self {
            Self::M => "m",
            Self::Km => "km",
            Self::Mi => "mi",
            Self::Nmi => "nmi",
            Self::Ft => "ft",
        }
    }

    fn convert(&self, meters: f64) -> f64 {
        match self {
            Self::M => meters,
            Self::Km => meters / 1000.0,
            Self::Mi => meters / 1609.344,
            Self::Nmi => meters / 1852.0,
            Self::Ft => meters * 3.28084,
        }
    }

    fn value_text(&self, meters: f64) -> String {
        let value = self.convert(meters);
        match self {
            Self::M => format_value(value, 0, " m"),
            Self::Km => format_value(value, 1, " km"),
            Self::Mi => format_value(value, 1, " mi"),
            Self::Nmi => format_value(value, 1, " nmi"),
            Self::Ft => format_value(value, 0, " ft"),
        }
    }
}

unit_from_str!(DistanceUnit, "distance", [M, Km, Mi, Nmi, Ft]);

// Lower bounds in m/s of Beaufort forces 1 through 12.
const BEAUFORT_THRESHOLDS: [f64; 12] = [
    0.3, 1.6, 3.4, 5.5, 8.0, 10.8, 13.9, 17.2, 20.8, 24.5, 28.5, 32.7,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    Kph,
    Mps,
    Kn,
    Mph,
    Ftps,
    Bf,
}

impl SpeedUnit {
    pub fn beaufort(meters_per_second: f64) -> u8 {
        BEAUFORT_THRESHOLDS
            .iter()
            .take_while(|threshold| meters_per_second >= **threshold)
            .count() as u8
    }
}

impl MeasurementUnit for SpeedUnit {
    fn id(&self) -> &'static str {
        match self {
            Self::Kph => "kph",
            Self::Mps => "mps",
            Self::Kn => "kn",
            Self::Mph => "mph",
            Self::Ftps => "ftps",
            Self::Bf => "bf",
        }
    }

    fn convert(&self, mps: f64) -> f64 {
        match self {
            Self::Kph => mps * 3.6,
            Self::Mps => mps,
            Self::Kn => mps * 1.943_844,
            Self::Mph => mps * 2.236_936,
            Self::Ftps => mps * 3.280_84,
            Self::Bf => f64::from(Self::beaufort(mps)),
        }
    }

    fn value_text(&self, mps: f64) -> String {
        let value = self.convert(mps);
        match self {
            Self::Kph => format_value(value, 1, " km/h"),
            Self::Mps => format_value(value, 1, " m/s"),
            Self::Kn => format_value(value, 1, " kn"),
            Self::Mph => format_value(value, 1, " mph"),
            Self::Ftps => format_value(value, 1, " ft/s"),
            Self::Bf => format_value(value, 0, " Bft"),
        }
    }
}

unit_from_str!(SpeedUnit, "speed", [Kph, Mps, Kn, Mph, Ftps, Bf]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureUnit {
    Mb,
    Kpa,
    Hpa,
    Atm,
    Mmhg,
    Inhg,
    Kgfpsqcm,
}

impl MeasurementUnit for PressureUnit {
    fn id(&self) -> &'static str {
        match self {
            Self::Mb => "mb",
            Self::Kpa => "kpa",
            Self::Hpa => "hpa",
            Self::Atm => "atm",
            Self::Mmhg => "mmhg",
            Self::Inhg => "inhg",
            Self::Kgfpsqcm => "kgfpsqcm",
        }
    }

    fn convert(&self, millibars: f64) -> f64 {
        match self {
            Self::Mb | Self::Hpa => millibars,
            Self::Kpa => millibars / 10.0,
            Self::Atm => millibars / 1013.25,
            Self::Mmhg => millibars * 0.750_062,
            Self::Inhg => millibars * 0.029_530,
            Self::Kgfpsqcm => millibars * 0.001_019_716,
        }
    }

    fn value_text(&self, millibars: f64) -> String {
        let value = self.convert(millibars);
        match self {
            Self::Mb => format_value(value, 1, " mb"),
            Self::Kpa => format_value(value, 2, " kPa"),
            Self::Hpa => format_value(value, 1, " hPa"),
            Self::Atm => format_value(value, 3, " atm"),
            Self::Mmhg => format_value(value, 1, " mmHg"),
            Self::Inhg => format_value(value, 2, " inHg"),
            Self::Kgfpsqcm => format_value(value, 3, " kgf/cm²"),
        }
    }
}

unit_from_str!(
    PressureUnit,
    "pressure",
    [Mb, Kpa, Hpa, Atm, Mmhg, Inhg, Kgfpsqcm]
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationUnit {
    Mm,
    Cm,
    In,
    Lpsqm,
}

impl MeasurementUnit for PrecipitationUnit {
    fn id(&self) -> &'static str {
        match self {
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::In => "in",
            Self::Lpsqm => "lpsqm",
        }
    }

    fn convert(&self, millimeters: f64) -> f64 {
        match self {
            // 1 mm of rain is 1 L/m²
            Self::Mm | Self::Lpsqm => millimeters,
            Self::Cm => millimeters / 10.0,
            Self::In => millimeters / 25.4,
        }
    }

    fn value_text(&self, millimeters: f64) -> String {
        let value = self.convert(millimeters);
        match self {
            Self::Mm => format_value(value, 1, " mm"),
            Self::Cm => format_value(value, 2, " cm"),
            Self::In => format_value(value, 2, " in"),
            Self::Lpsqm => format_value(value, 1, " L/m²"),
        }
    }
}

unit_from_str!(PrecipitationUnit, "precipitation", [Mm, Cm, In, Lpsqm]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    H,
}

impl MeasurementUnit for DurationUnit {
    fn id(&self) -> &'static str {
        "h"
    }

    fn convert(&self, hours: f64) -> f64 {
        hours
    }

    fn value_text(&self, hours: f64) -> String {
        format_value(hours, 1, " h")
    }
}

unit_from_str!(DurationUnit, "duration", [H]);

/// The units a user wants measurements displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSettings {
    pub temperature: TemperatureUnit,
    pub distance: DistanceUnit,
    pub speed: SpeedUnit,
    pub pressure: PressureUnit,
    pub precipitation: PrecipitationUnit,
}

impl UnitSettings {
    pub fn metric() -> Self {
        Self {
            temperature: TemperatureUnit::C,
            distance: DistanceUnit::Km,
            speed: SpeedUnit::Kph,
            pressure: PressureUnit::Hpa,
            precipitation: PrecipitationUnit::Mm,
        }
    }

    pub fn imperial() -> Self {
        Self {
            temperature: TemperatureUnit::F,
            distance: DistanceUnit::Mi,
            speed: SpeedUnit::Mph,
            pressure: PressureUnit::Inhg,
            precipitation: PrecipitationUnit::In,
        }
    }
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self::metric()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_temperature_conversion() {
        assert_close(TemperatureUnit::C.convert(21.5), 21.5);
        assert_close(TemperatureUnit::F.convert(100.0), 212.0);
        assert_close(TemperatureUnit::F.convert(-40.0), -40.0);
        assert_close(TemperatureUnit::K.convert(0.0), 273.15);
    }

    #[test]
    fn test_temperature_text() {
        assert_eq!(TemperatureUnit::C.value_text(12.4), "12°C");
        assert_eq!(TemperatureUnit::C.short_value_text(12.4), "12°");
        assert_eq!(TemperatureUnit::F.value_text(20.0), "68°F");
        assert_eq!(TemperatureUnit::K.short_value_text(0.0), "273K");
    }

    #[test]
    fn test_distance_conversion() {
        assert_close(DistanceUnit::Km.convert(12_500.0), 12.5);
        assert_close(DistanceUnit::Mi.convert(1609.344), 1.0);
        assert_close(DistanceUnit::Nmi.convert(3704.0), 2.0);
        assert_eq!(DistanceUnit::Km.value_text(12_500.0), "12.5 km");
        assert_eq!(DistanceUnit::M.value_text(850.4), "850 m");
    }

    #[test]
    fn test_speed_conversion() {
        assert_close(SpeedUnit::Kph.convert(10.0), 36.0);
        assert_close(SpeedUnit::Mps.convert(4.2), 4.2);
        assert_eq!(SpeedUnit::Kph.value_text(10.0), "36.0 km/h");
    }

    #[test]
    fn test_beaufort_scale() {
        assert_eq!(SpeedUnit::beaufort(0.0), 0);
        assert_eq!(SpeedUnit::beaufort(0.3), 1);
        assert_eq!(SpeedUnit::beaufort(5.0), 3);
        assert_eq!(SpeedUnit::beaufort(5.5), 4);
        assert_eq!(SpeedUnit::beaufort(40.0), 12);
        assert_eq!(SpeedUnit::Bf.value_text(9.0), "5 Bft");
    }

    #[test]
    fn test_pressure_conversion() {
        assert_close(PressureUnit::Hpa.convert(1013.25), 1013.25);
        assert_close(PressureUnit::Kpa.convert(1013.0), 101.3);
        assert_close(PressureUnit::Atm.convert(1013.25), 1.0);
        assert_eq!(PressureUnit::Mb.value_text(1012.0), "1012.0 mb");
        assert_eq!(PressureUnit::Inhg.value_text(1013.25), "29.92 inHg");
    }

    #[test]
    fn test_precipitation_conversion() {
        assert_close(PrecipitationUnit::In.convert(25.4), 1.0);
        assert_close(PrecipitationUnit::Cm.convert(12.0), 1.2);
        assert_eq!(PrecipitationUnit::Lpsqm.value_text(3.0), "3.0 L/m²");
    }

    #[test]
    fn test_parse_units_by_id() {
        assert_eq!("F".parse::<TemperatureUnit>(), Ok(TemperatureUnit::F));
        assert_eq!("nmi".parse::<DistanceUnit>(), Ok(DistanceUnit::Nmi));
        assert_eq!("kgfpsqcm".parse::<PressureUnit>(), Ok(PressureUnit::Kgfpsqcm));
        let err = "furlong".parse::<DistanceUnit>().unwrap_err();
        assert!(err.contains("Valid options: m, km, mi, nmi, ft"));

        assert_eq!("H".parse::<DurationUnit>(), Ok(DurationUnit::H));
        assert_eq!(DurationUnit::H.to_string(), "h");
        assert!("min".parse::<DurationUnit>().is_err());
    }

    #[test]
    fn test_serde_ids_match_unit_ids() {
        for unit in PressureUnit::ALL {
            let json = serde_json::to_string(unit).unwrap();
            assert_eq!(json, format!("\"{}\"", unit.id()));
        }
        for unit in SpeedUnit::ALL {
            let json = serde_json::to_string(unit).unwrap();
            assert_eq!(json, format!("\"{}\"", unit.id()));
        }
    }

    #[test]
    fn test_presets() {
        let imperial = UnitSettings::imperial();
        assert_eq!(imperial.temperature, TemperatureUnit::F);
        assert_eq!(imperial.speed, SpeedUnit::Mph);
        assert_eq!(UnitSettings::default(), UnitSettings::metric());
    }
}
