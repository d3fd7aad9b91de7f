//! Offerscout engine: network I/O for the offer comparison pipeline.
//!
//! Everything suspending lives here: the streaming offers query, the share
//! persistence call and address autocomplete. Results are reported as
//! [`EngineEvent`]s over a channel; the pure core decides what to keep.
mod autocomplete;
mod engine;
mod fetch;
mod ndjson;
mod share;
mod types;

pub use autocomplete::{AutocompleteClient, AutocompleteError, HttpAutocompleteClient, Suggestion};
pub use engine::EngineHandle;
pub use fetch::{ChannelEventSink, EventSink, FetchSettings, HttpOfferSource, OfferSource};
pub use ndjson::{NdjsonSplitter, OfferDecoder};
pub use share::{HttpShareClient, ShareClient};
pub use types::{EngineEvent, SearchError, ShareError};
