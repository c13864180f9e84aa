#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use url::Url;

use reelprice_core::{Capability, Provider, ProviderConfig, RawMovie, ReelError};

const ACCESS_TOKEN: HeaderName = HeaderName::from_static("x-access-token");

/// Movie API abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait MoviesApi: Send + Sync {
    /// List `provider`'s catalog as raw, untagged movies.
    async fn movies(&self, provider: Provider) -> Result<Vec<RawMovie>, ReelError>;

    /// Fetch the full raw record for `id` from `provider`.
    async fn movie(&self, provider: Provider, id: &str) -> Result<RawMovie, ReelError>;
}

#[derive(Deserialize)]
struct MoviesEnvelope {
    #[serde(rename = "Movies")]
    movies: Vec<RawMovie>,
}

/// Production adapter speaking to the upstream API over `reqwest`.
#[derive(Clone)]
pub struct RealAdapter {
    client: reqwest::Client,
    base_url: Url,
    headers: HeaderMap,
}

impl RealAdapter {
    /// Build an adapter with a fresh `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `Config` if the token is not a valid header value or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &ProviderConfig) -> Result<Self, ReelError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ReelError::Config(format!("failed to build HTTP client: {e}")))?;
        Self::with_client(client, config)
    }

    /// Build an adapter on top of an existing client; connection pools are shared.
    ///
    /// # Errors
    /// Returns `Config` if the token is not a valid header value.
    pub fn with_client(client: reqwest::Client, config: &ProviderConfig) -> Result<Self, ReelError> {
        let token = HeaderValue::from_str(&config.token)
            .map_err(|_| ReelError::Config("API token is not a valid header value".into()))?;
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("x-access-token"),
        );
        headers.insert(ACCESS_TOKEN, token);
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            headers,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ReelError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ReelError::Config(format!("base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        provider: Provider,
        capability: Capability,
        url: Url,
    ) -> Result<T, ReelError> {
        let resp = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| map_reqwest_err(&e, provider, capability))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ReelError::Status {
                provider,
                status: status.as_u16(),
            });
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| map_reqwest_err(&e, provider, capability))?;
        serde_json::from_slice(&body).map_err(|e| ReelError::decode(provider, e.to_string()))
    }
}

fn map_reqwest_err(e: &reqwest::Error, provider: Provider, capability: Capability) -> ReelError {
    if e.is_timeout() {
        ReelError::provider_timeout(provider, capability)
    } else if e.is_builder() {
        ReelError::Config(format!("invalid {provider} request: {e}"))
    } else if e.is_decode() {
        ReelError::decode(provider, e.to_string())
    } else {
        ReelError::transport(provider, e.to_string())
    }
}

#[async_trait]
impl MoviesApi for RealAdapter {
    async fn movies(&self, provider: Provider) -> Result<Vec<RawMovie>, ReelError> {
        let url = self.endpoint(&[provider.as_str(), "movies"])?;
        let envelope: MoviesEnvelope = self.get(provider, Capability::Catalog, url).await?;
        Ok(envelope.movies)
    }

    async fn movie(&self, provider: Provider, id: &str) -> Result<RawMovie, ReelError> {
        let url = self.endpoint(&[provider.as_str(), "movie", id])?;
        self.get(provider, Capability::Detail, url).await
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn MoviesApi {
    /// Build a `MoviesApi` from two closures (tests only).
    pub fn from_fns<FL, FD>(list: FL, detail: FD) -> Arc<dyn MoviesApi>
    where
        FL: Send + Sync + 'static + Fn(Provider) -> Result<Vec<RawMovie>, ReelError>,
        FD: Send + Sync + 'static + Fn(Provider, String) -> Result<RawMovie, ReelError>,
    {
        struct FnApi<FL, FD>(FL, FD);
        #[async_trait]
        impl<FL, FD> MoviesApi for FnApi<FL, FD>
        where
            FL: Send + Sync + 'static + Fn(Provider) -> Result<Vec<RawMovie>, ReelError>,
            FD: Send + Sync + 'static + Fn(Provider, String) -> Result<RawMovie, ReelError>,
        {
            async fn movies(&self, provider: Provider) -> Result<Vec<RawMovie>, ReelError> {
                (self.0)(provider)
            }

            async fn movie(&self, provider: Provider, id: &str) -> Result<RawMovie, ReelError> {
                (self.1)(provider, id.to_string())
            }
        }
        Arc::new(FnApi(list, detail))
    }
}
