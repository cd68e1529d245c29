use crate::error::{NetworkError, WeatherError};
use crate::sources::{ConfigurableSource, Source};
use crate::weather::types::{Location, Weather};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[async_trait]
pub trait WeatherProvider: Source {
    /// Fetches weather for `location`, normalized to native units.
    async fn weather(&self, location: &Location) -> Result<Weather, WeatherError>;

    fn is_supported(&self, _location: &Location) -> bool {
        true
    }

    fn as_configurable(&self) -> Option<&dyn ConfigurableSource> {
        None
    }
}

pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to create custom HTTP client, using defaults");
            reqwest::Client::new()
        })
}

/// Sends a GET and decodes the JSON body, mapping every failure to a
/// [`NetworkError`] tagged with the request URL.
pub async fn get_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, WeatherError> {
    let (client, request) = request.build_split();
    let request = request
        .map_err(|e| NetworkError::from_reqwest(e, "<invalid request>", REQUEST_TIMEOUT_SECS))?;
    let url = request.url().to_string();

    tracing::debug!(url = %url, "requesting provider");

    let response = client
        .execute(request)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| NetworkError::from_reqwest(e, &url, REQUEST_TIMEOUT_SECS))?;

    let data = response
        .json::<T>()
        .await
        .map_err(|e| NetworkError::from_reqwest(e, &url, REQUEST_TIMEOUT_SECS))?;

    Ok(data)
}

/// Joins a configurable instance base URL and an endpoint path.
pub fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn test_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    /// Answers a single request on a loopback port with `response`.
    fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 2048];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}/v1/forecast", addr)
    }

    #[tokio::test]
    async fn test_http_status_is_classified() {
        let url = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let request = test_client().get(&url).query(&[("latitude", "59.4")]);

        let err = get_json::<serde_json::Value>(request).await.unwrap_err();
        match err {
            WeatherError::Network(NetworkError::Status { url: reported, status }) => {
                assert_eq!(status, 503);
                assert_eq!(reported, format!("{}?…", url));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_body_is_a_decode_error() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 8\r\nConnection: close\r\n\r\nnot json",
        );

        let err = get_json::<serde_json::Value>(test_client().get(&url))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WeatherError::Network(NetworkError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_refused_connection_is_a_connect_error() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        // the listener is dropped, so nothing accepts on this port
        let url = format!("http://{}/v1/forecast", addr);

        let err = get_json::<serde_json::Value>(test_client().get(&url))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WeatherError::Network(NetworkError::Connect { .. })
        ));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(
            endpoint("https://example.com/", "/v1/forecast"),
            "https://example.com/v1/forecast"
        );
        assert_eq!(
            endpoint("https://example.com", "v1/forecast"),
            "https://example.com/v1/forecast"
        );
    }
}
