pub mod manager;

use crate::config::SourceConfig;
use crate::error::WeatherError;
use crate::weather::Location;
use std::collections::BTreeMap;

pub use manager::SourceManager;

/// Anything that can be selected or toggled by id: weather providers and
/// export targets alike.
pub trait Source: Send + Sync {
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;
}

/// Implement this if the source needs a preference screen.
pub trait ConfigurableSource: Source {
    fn preferences(&self, config: &SourceConfig) -> Vec<Preference>;
}

/// A source that hands weather data over to other applications.
pub trait BroadcastSource: Source {
    fn intent_action(&self) -> &'static str;

    fn extras(&self, locations: &[Location]) -> Result<Extras, WeatherError>;
}

/// String-keyed payload attached to a broadcast.
pub type Extras = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum Preference {
    EditText {
        key: &'static str,
        title: &'static str,
        summary: Option<&'static str>,
        value: Option<String>,
        default: Option<&'static str>,
    },
    Switch {
        key: &'static str,
        title: &'static str,
        value: bool,
    },
}

impl Preference {
    pub fn key(&self) -> &'static str {
        match self {
            Self::EditText { key, .. } | Self::Switch { key, .. } => key,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::EditText { title, .. } | Self::Switch { title, .. } => title,
        }
    }

    /// The value currently in effect, falling back to the default.
    pub fn effective_value(&self) -> Option<String> {
        match self {
            Self::EditText { value, default, .. } => value
                .clone()
                .or_else(|| default.map(|d| d.to_string())),
            Self::Switch { value, .. } => Some(value.to_string()),
        }
    }

    /// Builds the instance-URL preference shared by self-hostable providers.
    pub fn instance(config: &SourceConfig, default: &'static str) -> Self {
        Self::EditText {
            key: "instance",
            title: "Instance",
            summary: Some("Base URL of the API, leave empty for the official instance"),
            value: config.get("instance").map(|v| v.to_string()),
            default: Some(default),
        }
    }
}
