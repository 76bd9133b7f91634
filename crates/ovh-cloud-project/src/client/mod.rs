//! Signed HTTP client for the OVH api.
//!
//! Every authenticated call carries the application key, the consumer key, a
//! timestamp and a signature over the request. The timestamp is corrected by
//! the offset between the local clock and the api clock, which is fetched once
//! per client from `GET /auth/time`.
use reqwest::{
    Method, RequestBuilder,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use url::Url;

mod error;
mod signature;

pub use error::TransportError;
use signature::{
    HEADER_APPLICATION, HEADER_CONSUMER, HEADER_QUERY_ID, HEADER_SIGNATURE, HEADER_TIMESTAMP, sign,
};

use crate::{
    config::{ClientConfig, ConfigError, Credentials},
    service::{CloudProject, CloudProjectApi, LIST_PROJECTS_ENDPOINT, ProjectId},
};

const AUTH_TIME_ENDPOINT: &str = "/auth/time";

#[derive(Debug)]
pub struct OvhClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    time_delta: OnceCell<i64>,
}

impl OvhClient {
    /// Build a client from its configuration.
    ///
    /// No request is sent here, credentials are only checked for presence.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let credentials = config.credentials()?;
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout())
            .user_agent(concat!("ovh-cloud-project/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self {
            http,
            base_url: config.endpoint.base_url(),
            credentials,
            time_delta: OnceCell::new(),
        })
    }

    /// Signed `GET` of `path`, relative to the api root.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = self.url(path)?;
        let timestamp = chrono::Utc::now().timestamp() + self.time_delta().await?;
        let signature = sign(
            &self.credentials.application_secret,
            &self.credentials.consumer_key,
            &Method::GET,
            url.as_str(),
            "",
            timestamp,
        );

        let request = self
            .request(Method::GET, url.clone())
            .header(HEADER_CONSUMER, &self.credentials.consumer_key)
            .header(HEADER_TIMESTAMP, timestamp.to_string())
            .header(HEADER_SIGNATURE, signature);

        self.execute(request, &url).await
    }

    fn url(&self, path: &str) -> Result<Url, TransportError> {
        let url = format!("{}{path}", self.base_url);
        Url::parse(&url).map_err(|source| TransportError::InvalidUrl { url, source })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json;charset=utf-8")
            .header(HEADER_APPLICATION, &self.credentials.application_key)
    }

    /// Seconds to add to the local clock to get the api clock.
    async fn time_delta(&self) -> Result<i64, TransportError> {
        self.time_delta
            .get_or_try_init(|| async {
                let url = self.url(AUTH_TIME_ENDPOINT)?;
                let request = self.request(Method::GET, url.clone());
                let server_time: i64 = self.execute(request, &url).await?;
                let delta = server_time - chrono::Utc::now().timestamp();
                tracing::debug!(delta, "Computed OVH api clock offset");
                Ok::<_, TransportError>(delta)
            })
            .await
            .copied()
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<T, TransportError> {
        tracing::debug!(%url, "Calling OVH api");

        let http_error = |source| TransportError::Http {
            url: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(http_error)?;

        let status = response.status();
        let query_id = response
            .headers()
            .get(HEADER_QUERY_ID)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = response.text().await.map_err(http_error)?;

        if !status.is_success() {
            tracing::warn!(%url, %status, ?query_id, "OVH api call failed");
            return Err(TransportError::from_response(status, &body, query_id));
        }

        serde_json::from_str(&body).map_err(|source| TransportError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait::async_trait]
impl CloudProjectApi for OvhClient {
    async fn list_project_ids(&self) -> Result<Vec<ProjectId>, TransportError> {
        self.get(LIST_PROJECTS_ENDPOINT).await
    }

    async fn get_project(&self, project_id: &ProjectId) -> Result<CloudProject, TransportError> {
        self.get(&project_id.endpoint()).await
    }
}
