use crate::error::ConfigError;
use crate::units::UnitSettings;
use crate::weather::Location;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "skyshare";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub units: UnitSettings,
    pub locations: Vec<LocationConfig>,
    /// Per-source preferences, keyed by source id.
    pub sources: BTreeMap<String, SourceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_source")]
    pub source: String,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub province: Option<String>,
    pub province_code: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_source() -> String {
    "open_meteo".to_string()
}

/// Free-form string preferences of one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceConfig(BTreeMap<String, String>);

impl SourceConfig {
    /// Returns the value for `key`, treating blank strings as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Accepts `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(|v| v.to_lowercase()).as_deref() {
            Some("true" | "yes" | "on" | "1") => true,
            Some("false" | "no" | "off" | "0") => false,
            _ => default,
        }
    }

    #[allow(dead_code)]
    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

impl LocationConfig {
    pub fn to_location(&self) -> Result<Location, ConfigError> {
        if self.id.trim().is_empty() {
            return Err(ConfigError::InvalidLocation {
                id: self.id.clone(),
                reason: "id must not be empty".to_string(),
            });
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ConfigError::InvalidLocation {
                id: self.id.clone(),
                reason: format!("latitude {} is outside -90..90", self.latitude),
            });
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ConfigError::InvalidLocation {
                id: self.id.clone(),
                reason: format!("longitude {} is outside -180..180", self.longitude),
            });
        }

        Ok(Location {
            id: self.id.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone.clone(),
            country: self.country.clone(),
            country_code: self.country_code.clone(),
            province: self.province.clone(),
            province_code: self.province_code.clone(),
            city: self.city.clone(),
            district: self.district.clone(),
            source: self.source.clone(),
            weather: None,
        })
    }
}

impl Config {
    /// Loads the config from the platform config directory, or defaults when
    /// no file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn source_config(&self, id: &str) -> SourceConfig {
        self.sources.get(id).cloned().unwrap_or_default()
    }

    /// Location ids key the weather cache and the share payload, so they
    /// must be unique.
    pub fn locations(&self) -> Result<Vec<Location>, ConfigError> {
        let mut seen = HashSet::new();
        self.locations
            .iter()
            .map(|location| {
                if !seen.insert(location.id.trim()) {
                    return Err(ConfigError::DuplicateLocation(location.id.clone()));
                }
                location.to_location()
            })
            .collect()
    }
}
