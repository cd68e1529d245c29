use crate::error::WeatherError;
use crate::sources::SourceManager;
use crate::weather::types::{Location, Weather};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct WeatherClient {
    sources: Arc<SourceManager>,
    cache: Arc<RwLock<HashMap<String, CachedWeather>>>,
    cache_duration: Duration,
}

struct CachedWeather {
    data: Weather,
    source: String,
    coordinates: String,
    fetched_at: Instant,
}

impl WeatherClient {
    pub fn new(sources: Arc<SourceManager>, cache_duration: Duration) -> Self {
        Self {
            sources,
            cache: Arc::new(RwLock::new(HashMap::new())),
            cache_duration,
        }
    }

    /// Weather for one location from the provider it is configured with.
    pub async fn get_weather(&self, location: &Location) -> Result<Weather, WeatherError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.get(&location.id) {
                if cached.source == location.source
                    && cached.coordinates == location.coordinates()
                    && cached.fetched_at.elapsed() < self.cache_duration
                {
                    tracing::debug!(location = %location.id, "using cached weather");
                    return Ok(cached.data.clone());
                }
            }
        }

        let provider = self.sources.weather_provider(&location.source)?;

        // Fetch fresh data
        let data = provider.weather(location).await?;

        {
            let mut cache = self.cache.write().await;
            cache.insert(
                location.id.clone(),
                CachedWeather {
                    data: data.clone(),
                    source: location.source.clone(),
                    coordinates: location.coordinates(),
                    fetched_at: Instant::now(),
                },
            );
        }

        Ok(data)
    }

    /// Refreshes every location in order. A failing location is kept without
    /// weather so exporters can skip it.
    pub async fn refresh_all(&self, locations: Vec<Location>) -> Vec<Location> {
        let mut refreshed = Vec::with_capacity(locations.len());

        for mut location in locations {
            match self.get_weather(&location).await {
                Ok(weather) => {
                    tracing::info!(
                        location = %location.id,
                        source = %location.source,
                        "weather refreshed"
                    );
                    location.weather = Some(weather);
                }
                Err(e) => {
                    tracing::warn!(
                        location = %location.id,
                        source = %location.source,
                        error = %e,
                        "failed to refresh weather"
                    );
                    location.weather = None;
                }
            }
            refreshed.push(location);
        }

        refreshed
    }

    #[allow(dead_code)]
    pub async fn invalidate_cache(&self) {
        let mut cache = self.cache.write().await;
        cache.clear();
    }
}
