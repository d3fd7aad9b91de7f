use std::time::Duration;

use futures_util::StreamExt;
use offerscout_core::Address;
use scout_logging::engine_debug;
use serde::Deserialize;

use crate::ndjson::OfferDecoder;
use crate::{EngineEvent, SearchError};

/// Error message the backend uses when address validation fails.
const INVALID_ADDRESS: &str = "Invalid address.";

/// Transport configuration for the offers, share and autocomplete requests.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Applies to the whole request including the streamed body.
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl FetchSettings {
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::Client, SearchError> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(|err| SearchError::Network(err.to_string()))
    }
}

/// Where streamed engine events go.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Sink backed by a standard mpsc channel, for the synchronous shell loop.
pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// The offers query: one streaming request per search run.
#[async_trait::async_trait]
pub trait OfferSource: Send + Sync {
    /// Streams offers for the address, emitting one
    /// [`EngineEvent::OfferReceived`] per complete record, tagged with the
    /// search generation. Returns when the stream ends.
    async fn stream_offers(
        &self,
        generation: u64,
        address: &Address,
        sink: &dyn EventSink,
    ) -> Result<(), SearchError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`OfferSource`] over HTTP, consuming the chunked NDJSON response body.
#[derive(Debug, Clone)]
pub struct HttpOfferSource {
    settings: FetchSettings,
}

impl HttpOfferSource {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl OfferSource for HttpOfferSource {
    async fn stream_offers(
        &self,
        generation: u64,
        address: &Address,
        sink: &dyn EventSink,
    ) -> Result<(), SearchError> {
        let client = self.settings.build_client()?;

        let response = client
            .get(self.settings.endpoint("offers"))
            .query(&[
                ("street", address.street.as_str()),
                ("house_number", address.house_number.as_str()),
                ("plz", address.plz.as_str()),
                ("city", address.city.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(match response.json::<ErrorBody>().await {
                Ok(body) if body.error == INVALID_ADDRESS => SearchError::AddressNotFound,
                Ok(body) => SearchError::Upstream(body.error),
                Err(_) => SearchError::Upstream(format!("http status {status}")),
            });
        }

        let mut decoder = OfferDecoder::new();
        let mut received = 0usize;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_transport_error)?;
            for offer in decoder.push(&chunk) {
                received += 1;
                sink.emit(EngineEvent::OfferReceived { generation, offer });
            }
        }
        decoder.finish();
        engine_debug!("generation {generation}: stream ended after {received} offers");

        Ok(())
    }
}

pub(crate) fn map_transport_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::Timeout;
    }
    SearchError::Network(err.to_string())
}
