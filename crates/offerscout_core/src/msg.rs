use std::collections::BTreeSet;

use crate::{Address, LimitFilter, Offer, SearchFailure, SortKey, TvFilter};

/// Intents fed to the reducer, from user input and from the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Address form fields changed (typing or an autocomplete pick).
    AddressChanged(Address),
    /// One filter control changed.
    FilterChanged(FilterChange),
    /// User picked a page in the pagination widget (1-based).
    PageChanged(usize),
    /// User submitted the search form.
    SearchRequested,
    /// One offer record completed parsing in the stream.
    OfferIngested { generation: u64, offer: Offer },
    /// The offer stream ended normally.
    StreamFinished { generation: u64 },
    /// The offers request failed before or during streaming.
    SearchFailed {
        generation: u64,
        failure: SearchFailure,
    },
    /// User asked for a share link.
    ShareRequested,
    /// The share backend produced a link.
    ShareUrlReady { epoch: u64, url: String },
    /// The share backend failed; offers and filters are unaffected.
    ShareFailed { epoch: u64, message: String },
}

/// One filter control's new value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Speed(Option<u32>),
    Limit(LimitFilter),
    MaxDuration(Option<u32>),
    Tv(TvFilter),
    ConnectionTypes(BTreeSet<String>),
    Providers(BTreeSet<String>),
    InstallationOnly(bool),
    /// Entering an age re-enables age filtering.
    Age(Option<u32>),
    /// Enabling this clears the entered age.
    ShowAllAges(bool),
    Sort(SortKey),
}
