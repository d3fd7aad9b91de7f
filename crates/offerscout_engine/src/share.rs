use offerscout_core::{FilterState, Offer};
use serde::{Deserialize, Serialize};

use crate::{FetchSettings, ShareError};

#[derive(Serialize)]
struct ShareRequest<'a> {
    offers: &'a [Offer],
    filters: &'a FilterState,
}

#[derive(Deserialize)]
struct ShareResponse {
    share_url: Option<String>,
    error: Option<String>,
}

/// The share persistence service: stores an (offers, filters) snapshot and
/// returns a stable link to it.
#[async_trait::async_trait]
pub trait ShareClient: Send + Sync {
    async fn create_share_link(
        &self,
        offers: &[Offer],
        filters: &FilterState,
    ) -> Result<String, ShareError>;
}

/// [`ShareClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpShareClient {
    settings: FetchSettings,
}

impl HttpShareClient {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl ShareClient for HttpShareClient {
    async fn create_share_link(
        &self,
        offers: &[Offer],
        filters: &FilterState,
    ) -> Result<String, ShareError> {
        let client = self
            .settings
            .build_client()
            .map_err(|err| ShareError::Network(err.to_string()))?;

        let response = client
            .post(self.settings.endpoint("share"))
            .json(&ShareRequest { offers, filters })
            .send()
            .await
            .map_err(|err| ShareError::Network(err.to_string()))?;

        let status = response.status();
        let body: ShareResponse = response
            .json()
            .await
            .map_err(|err| ShareError::Network(err.to_string()))?;

        if status.is_success() {
            body.share_url
                .ok_or_else(|| ShareError::Backend("response carried no share_url".to_string()))
        } else {
            Err(ShareError::Backend(
                body.error.unwrap_or_else(|| format!("http status {status}")),
            ))
        }
    }
}
