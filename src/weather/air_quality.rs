use crate::weather::types::AirQuality;

/// Upper bounds of the AQI scale matching each concentration threshold.
const AQI_THRESHOLDS: [f64; 6] = [0.0, 20.0, 50.0, 100.0, 150.0, 250.0];

const LEVEL_NAMES: [&str; 6] = [
    "Excellent",
    "Fair",
    "Poor",
    "Unhealthy",
    "Very unhealthy",
    "Dangerous",
];

// ARGB
const LEVEL_COLORS: [u32; 6] = [
    0xFF00E59B, 0xFFFFC302, 0xFFFF712B, 0xFFF62A55, 0xFFC72EAA, 0xFF9930FF,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollutantIndex {
    PM25,
    PM10,
    SO2,
    NO2,
    O3,
    CO,
}

impl PollutantIndex {
    /// Export order of pollutants.
    pub const ALL: [PollutantIndex; 6] = [
        Self::PM25,
        Self::PM10,
        Self::SO2,
        Self::NO2,
        Self::O3,
        Self::CO,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::PM25 => "pm25",
            Self::PM10 => "pm10",
            Self::SO2 => "so2",
            Self::NO2 => "no2",
            Self::O3 => "o3",
            Self::CO => "co",
        }
    }

    /// Concentration breakpoints (µg/m³, CO in mg/m³) aligned with [`AQI_THRESHOLDS`].
    fn thresholds(&self) -> [f64; 6] {
        match self {
            Self::O3 => [0.0, 50.0, 100.0, 160.0, 240.0, 480.0],
            Self::NO2 => [0.0, 10.0, 25.0, 200.0, 400.0, 1000.0],
            Self::PM10 => [0.0, 15.0, 45.0, 80.0, 160.0, 400.0],
            Self::PM25 => [0.0, 5.0, 15.0, 30.0, 60.0, 150.0],
            Self::SO2 => [0.0, 20.0, 40.0, 270.0, 500.0, 960.0],
            Self::CO => [0.0, 2.0, 4.0, 35.0, 100.0, 230.0],
        }
    }

    /// Linear interpolation of the concentration onto the AQI scale,
    /// extrapolated proportionally past the last breakpoint.
    pub fn index(&self, concentration: f64) -> Option<i32> {
        if !concentration.is_finite() || concentration < 0.0 {
            return None;
        }

        let thresholds = self.thresholds();
        let last = thresholds.len() - 1;
        let level = thresholds
            .iter()
            .rposition(|threshold| concentration >= *threshold)?;

        let aqi = if level < last {
            let (bp_lo, bp_hi) = (thresholds[level], thresholds[level + 1]);
            let (aqi_lo, aqi_hi) = (AQI_THRESHOLDS[level], AQI_THRESHOLDS[level + 1]);
            (aqi_hi - aqi_lo) / (bp_hi - bp_lo) * (concentration - bp_lo) + aqi_lo
        } else {
            concentration * AQI_THRESHOLDS[last] / thresholds[last]
        };

        Some(aqi.round() as i32)
    }
}

fn level(index: i32) -> usize {
    AQI_THRESHOLDS
        .iter()
        .rposition(|threshold| f64::from(index) >= *threshold)
        .unwrap_or(0)
}

pub fn level_name(index: i32) -> &'static str {
    LEVEL_NAMES[level(index)]
}

/// ARGB color as a signed 32-bit integer, the way Android color ints are encoded.
pub fn level_color(index: i32) -> i32 {
    LEVEL_COLORS[level(index)] as i32
}

impl AirQuality {
    pub fn concentration(&self, pollutant: PollutantIndex) -> Option<f64> {
        match pollutant {
            PollutantIndex::PM25 => self.pm25,
            PollutantIndex::PM10 => self.pm10,
            PollutantIndex::SO2 => self.so2,
            PollutantIndex::NO2 => self.no2,
            PollutantIndex::O3 => self.o3,
            PollutantIndex::CO => self.co,
        }
    }

    pub fn pollutant_index(&self, pollutant: PollutantIndex) -> Option<i32> {
        self.concentration(pollutant)
            .and_then(|value| pollutant.index(value))
    }

    /// Overall index: the worst pollutant wins.
    pub fn index(&self) -> Option<i32> {
        PollutantIndex::ALL
            .iter()
            .filter_map(|pollutant| self.pollutant_index(*pollutant))
            .max()
    }

    pub fn level_name(&self, pollutant: Option<PollutantIndex>) -> Option<&'static str> {
        let index = match pollutant {
            Some(pollutant) => self.pollutant_index(pollutant),
            None => self.index(),
        };
        index.map(level_name)
    }

    pub fn color(&self, pollutant: Option<PollutantIndex>) -> Option<i32> {
        let index = match pollutant {
            Some(pollutant) => self.pollutant_index(pollutant),
            None => self.index(),
        };
        index.map(level_color)
    }

    pub fn is_empty(&self) -> bool {
        PollutantIndex::ALL
            .iter()
            .all(|pollutant| self.concentration(*pollutant).is_none())
    }
}
