use crate::config::Config;
use crate::error::WeatherError;
use crate::share::ShareService;
use crate::sources::{BroadcastSource, Preference};
use crate::weather::factory::{PROVIDER_IDS, canonical_provider_id, create_provider};
use crate::weather::provider::WeatherProvider;
use std::sync::Arc;

/// Registry of every weather provider and broadcast target.
pub struct SourceManager {
    providers: Vec<Arc<dyn WeatherProvider>>,
    broadcasters: Vec<Arc<dyn BroadcastSource>>,
    config: Config,
}

/// A configurable source with its preferences resolved against the config.
#[derive(Debug)]
pub struct SourcePreferences {
    pub id: &'static str,
    pub name: &'static str,
    pub preferences: Vec<Preference>,
}

impl SourceManager {
    pub fn new(config: &Config) -> Self {
        let providers = PROVIDER_IDS
            .iter()
            .filter_map(|id| match create_provider(id, config) {
                Ok(provider) => Some(provider),
                Err(e) => {
                    tracing::warn!(provider = %id, error = %e, "skipping provider");
                    None
                }
            })
            .collect();

        let broadcasters: Vec<Arc<dyn BroadcastSource>> =
            vec![Arc::new(ShareService::new(config.units))];

        Self {
            providers,
            broadcasters,
            config: config.clone(),
        }
    }

    pub fn weather_providers(&self) -> &[Arc<dyn WeatherProvider>] {
        &self.providers
    }

    pub fn weather_provider(&self, name: &str) -> Result<Arc<dyn WeatherProvider>, WeatherError> {
        let id = canonical_provider_id(name)
            .ok_or_else(|| WeatherError::UnknownSource(name.to_string()))?;
        self.providers
            .iter()
            .find(|provider| provider.id() == id)
            .cloned()
            .ok_or_else(|| WeatherError::UnknownSource(name.to_string()))
    }

    pub fn broadcast_sources(&self) -> &[Arc<dyn BroadcastSource>] {
        &self.broadcasters
    }

    pub fn broadcast_source(&self, id: &str) -> Result<Arc<dyn BroadcastSource>, WeatherError> {
        self.broadcasters
            .iter()
            .find(|source| source.id() == id)
            .cloned()
            .ok_or_else(|| WeatherError::UnknownSource(id.to_string()))
    }

    pub fn configurable_sources(&self) -> Vec<SourcePreferences> {
        self.providers
            .iter()
            .filter_map(|provider| {
                let configurable = provider.as_configurable()?;
                Some(SourcePreferences {
                    id: configurable.id(),
                    name: configurable.name(),
                    preferences: configurable
                        .preferences(&self.config.source_config(configurable.id())),
                })
            })
            .collect()
    }
}
