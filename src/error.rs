use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    #[error("Failed to encode share payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{source_name} does not cover location '{location}'")]
    UnsupportedLocation {
        source_name: &'static str,
        location: String,
    },

    #[error("Unknown source: '{0}'")]
    UnknownSource(String),
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Could not connect to {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Could not resolve host for {url}")]
    Dns { url: String },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid response body from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    Other { url: String, message: String },
}

impl NetworkError {
    pub fn from_reqwest(error: reqwest::Error, url: &str, timeout_secs: u64) -> Self {
        let url = redact_query(url);

        if error.is_timeout() {
            return Self::Timeout { url, timeout_secs };
        }

        if let Some(status) = error.status() {
            return Self::Status {
                url,
                status: status.as_u16(),
            };
        }

        if error.is_decode() {
            return Self::Decode {
                url,
                message: error.to_string(),
            };
        }

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return Self::Dns { url };
            }
            return Self::Connect { url, message };
        }

        Self::Other {
            url,
            message: error.to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Timeout { timeout_secs, .. } => format!(
                "The weather service did not answer within {} seconds.\nCheck your connection or try again later.",
                timeout_secs
            ),
            Self::Connect { .. } => {
                "Could not reach the weather service.\nCheck your internet connection.".to_string()
            }
            Self::Dns { .. } => {
                "Could not resolve the weather service host.\nCheck your DNS settings or the configured instance URL.".to_string()
            }
            Self::Status { status, .. } if *status == 401 || *status == 403 => {
                "The weather service rejected the request.\nCheck the API key or instance settings in config.toml.".to_string()
            }
            Self::Status { status, .. } if *status == 429 => {
                "Too many requests to the weather service.\nWait a moment before refreshing again.".to_string()
            }
            Self::Status { status, .. } => {
                format!("The weather service returned HTTP {}.", status)
            }
            Self::Decode { .. } => {
                "The weather service sent data that could not be read.\nThe provider API may have changed.".to_string()
            }
            Self::Other { message, .. } => format!("Weather request failed: {}", message),
        }
    }
}

// Provider URLs may carry API keys or coordinates in the query string.
fn redact_query(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => format!("{}?…", base),
        None => url.to_string(),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine the platform config directory")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid location '{id}': {reason}")]
    InvalidLocation { id: String, reason: String },

    #[error("Location id '{0}' is used more than once")]
    DuplicateLocation(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("No locations configured in {}", .0.display())]
    NoLocations(PathBuf),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl AppError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Weather(WeatherError::Network(net_err)) => net_err.user_friendly_message(),
            Self::NoLocations(path) => format!(
                "No locations configured.\n\nAdd at least one location to {}:\n\n  [[locations]]\n  id = \"home\"\n  latitude = 59.437\n  longitude = 24.7536\n  timezone = \"Europe/Tallinn\"\n  source = \"ilmateenistus\"  # or \"open_meteo\"",
                path.display()
            ),
            _ => self.to_string(),
        }
    }
}
