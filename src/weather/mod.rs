pub mod air_quality;
pub mod client;
pub mod factory;
pub mod ilmateenistus;
pub mod normalizer;
pub mod open_meteo;
pub mod provider;
pub mod types;

pub use client::WeatherClient;
pub use types::Location;
