//! Event platform HTTP client
//!
//! Every platform endpoint answers with the `{ success, message?, data? }`
//! envelope. This client owns the reqwest setup, session credentials,
//! URL building and the mapping of envelopes and HTTP statuses onto
//! [`EventHubError`].

use std::time::{Duration, Instant};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;
use crate::config::ApiConfig;
use crate::models::api::{ApiResponse, Ignored};
use crate::models::user::Session;
use crate::utils::errors::{EventHubError, Result};
use crate::utils::logging::log_api_error;

/// Low-level client for the event platform API
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client, attaching the session cookie when one is given
    pub fn new(config: &ApiConfig, session: Option<&Session>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(EventHubError::Config(format!("API base URL cannot be a base: {}", config.base_url)));
        }

        let mut headers = HeaderMap::new();
        if let Some(session) = session {
            let mut cookie = HeaderValue::from_str(&format!("accessToken={}", session.access_token))
                .map_err(|_| EventHubError::InvalidInput("Session token contains invalid characters".to_string()))?;
            cookie.set_sensitive(true);
            headers.insert(COOKIE, cookie);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(EventHubError::Http)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| EventHubError::Config("API base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` returning the envelope's data
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Option<T>> {
        let url = self.url(segments)?;
        let request = self.client.request(Method::GET, url).query(query);
        self.execute(request, segments).await
    }

    /// `POST` with an optional JSON body
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, segments: &[&str], body: Option<&B>) -> Result<Option<T>> {
        let url = self.url(segments)?;
        let mut request = self.client.request(Method::POST, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request, segments).await
    }

    /// `DELETE`
    pub async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Option<T>> {
        let url = self.url(segments)?;
        let request = self.client.request(Method::DELETE, url);
        self.execute(request, segments).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, segments: &[&str]) -> Result<Option<T>> {
        let endpoint = segments.join("/");
        let started = Instant::now();

        let response = request.send().await.map_err(|e| {
            log_api_error("platform", &e.to_string(), Some(&endpoint));
            EventHubError::Http(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(EventHubError::Http)?;

        debug!(
            endpoint = %endpoint,
            status = status.as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Platform API call completed"
        );

        if !status.is_success() {
            let message = serde_json::from_str::<ApiResponse<Ignored>>(&body)
                .ok()
                .and_then(|envelope| envelope.message);
            return Err(EventHubError::rejected(status.as_u16(), message));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;
        if !envelope.success {
            return Err(EventHubError::rejected(status.as_u16(), envelope.message));
        }

        Ok(envelope.data)
    }
}
