use crate::config::Config;
use crate::error::WeatherError;
use crate::weather::ilmateenistus::IlmateenistusService;
use crate::weather::open_meteo::OpenMeteoProvider;
use crate::weather::provider::WeatherProvider;
use std::sync::Arc;

pub const PROVIDER_IDS: &[&str] = &["open_meteo", "ilmateenistus"];

/// Resolves the spellings accepted in config files to a canonical provider id.
pub fn canonical_provider_id(name: &str) -> Option<&'static str> {
    match name.trim().to_lowercase().as_str() {
        "open_meteo" | "openmeteo" | "open-meteo" => Some("open_meteo"),
        "ilmateenistus" | "ilm" | "emhi" => Some("ilmateenistus"),
        _ => None,
    }
}

pub fn create_provider(name: &str, config: &Config) -> Result<Arc<dyn WeatherProvider>, WeatherError> {
    let id = canonical_provider_id(name).ok_or_else(|| {
        WeatherError::Configuration(format!(
            "Unknown weather provider: '{}'. Valid options: {}",
            name,
            PROVIDER_IDS.join(", ")
        ))
    })?;

    let source_config = config.source_config(id);
    let provider: Arc<dyn WeatherProvider> = match id {
        "ilmateenistus" => Arc::new(IlmateenistusService::new(&source_config)),
        _ => Arc::new(OpenMeteoProvider::new(&source_config)),
    };

    Ok(provider)
}
