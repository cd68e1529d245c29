use crate::error::WeatherError;
use crate::weather::ilmateenistus::json::IlmateenistusForecastResult;
use crate::weather::provider::{endpoint, get_json};

const METEOGRAM_PATH: &str = "wp-content/themes/ilm2020/meteogram.php";

/// The single endpoint the provider exposes: an hourly meteogram for a
/// `lat;lon` coordinate string.
pub struct IlmateenistusApi {
    client: reqwest::Client,
    base_url: String,
}

impl IlmateenistusApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn hourly_request(&self, coordinates: &str) -> reqwest::RequestBuilder {
        self.client
            .get(endpoint(&self.base_url, METEOGRAM_PATH))
            .query(&[("coordinates", coordinates)])
    }

    pub async fn get_hourly(
        &self,
        coordinates: &str,
    ) -> Result<IlmateenistusForecastResult, WeatherError> {
        get_json(self.hourly_request(coordinates)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_request_url() {
        let api = IlmateenistusApi::new(reqwest::Client::new(), "https://www.ilmateenistus.ee/");
        let request = api.hourly_request("59.4370;24.7535").build().unwrap();

        assert_eq!(
            request.url().path(),
            "/wp-content/themes/ilm2020/meteogram.php"
        );
        let query: Vec<(String, String)> = request.url().query_pairs().into_owned().collect();
        assert_eq!(
            query,
            vec![("coordinates".to_string(), "59.4370;24.7535".to_string())]
        );
        assert_eq!(request.method(), reqwest::Method::GET);
    }
}
