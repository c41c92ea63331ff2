use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::SourceError;
use crate::histogram::HistogramEvolution;

use super::{MeasureListing, MetricsSource};

const USER_AGENT: &str = concat!("tpdash/", env!("CARGO_PKG_VERSION"));

/// Reads measures from an HTTP service exposing the dump layout per version:
/// `GET {base}/{version}/measures` and `GET {base}/{version}/{measure}/evolution`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    /// # Errors
    ///
    /// Returns an error when `base` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(base: &str, request_timeout: Duration) -> Result<Self, SourceError> {
        let mut base_url = Url::parse(base).map_err(|err| SourceError::InvalidUrl {
            value: base.to_owned(),
            source: err,
        })?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()
            .map_err(|err| SourceError::Http {
                url: base.to_owned(),
                source: err,
            })?;
        Ok(Self {
            client,
            base: base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SourceError> {
        self.base.join(path).map_err(|err| SourceError::InvalidUrl {
            value: path.to_owned(),
            source: err,
        })
    }

    async fn get_json<T>(&self, url: Url, operation: &'static str) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
    {
        let target = url.to_string();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| SourceError::Http {
                url: target.clone(),
                source: err,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Rejected {
                operation,
                target,
                message: format!("HTTP {}", status),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| SourceError::Http {
                url: target,
                source: err,
            })
    }
}

#[async_trait]
impl MetricsSource for HttpSource {
    async fn list_measures(&self, version: &str) -> Result<MeasureListing, SourceError> {
        let url = self.endpoint(&format!("{}/measures", version))?;
        self.get_json(url, "list_measures").await
    }

    async fn fetch_evolution(
        &self,
        version: &str,
        measure: &str,
    ) -> Result<HistogramEvolution, SourceError> {
        let url = self.endpoint(&format!("{}/{}/evolution", version, measure))?;
        self.get_json(url, "fetch_evolution").await
    }
}
