use crate::{FilterState, Offer, ResultsView};

/// Fixed number of offer cards per page.
pub const PAGE_SIZE: usize = 10;

/// The search address as entered in the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    pub house_number: String,
    pub plz: String,
    pub city: String,
}

impl Address {
    /// All four fields present after trimming.
    pub fn is_complete(&self) -> bool {
        !self.street.trim().is_empty()
            && !self.house_number.trim().is_empty()
            && !self.plz.trim().is_empty()
            && !self.city.trim().is_empty()
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Address {
        Address {
            street: self.street.trim().to_string(),
            house_number: self.house_number.trim().to_string(),
            plz: self.plz.trim().to_string(),
            city: self.city.trim().to_string(),
        }
    }
}

/// Why the offers query failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFailure {
    /// The backend rejected the address.
    AddressNotFound,
    /// Any other upstream or transport failure, with the backend message
    /// when one was available.
    Upstream(Option<String>),
}

impl SearchFailure {
    /// User-facing message for the failure banner.
    pub fn user_message(&self) -> String {
        match self {
            SearchFailure::AddressNotFound => {
                "The address could not be found. Please check your input.".to_string()
            }
            SearchFailure::Upstream(Some(message)) => message.clone(),
            SearchFailure::Upstream(None) => "An error occurred. Please try again.".to_string(),
        }
    }
}

/// Lifecycle of the current search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No search has been submitted yet.
    #[default]
    Idle,
    /// The offer stream is still delivering records.
    Streaming,
    /// The stream ended normally.
    Completed,
    /// Address or age input was rejected before the request was sent.
    InputError(String),
    /// The offers request failed.
    Failed(SearchFailure),
}

impl SearchPhase {
    /// The message to surface near the form, if any.
    pub fn user_message(&self) -> Option<String> {
        match self {
            SearchPhase::InputError(message) => Some(message.clone()),
            SearchPhase::Failed(failure) => Some(failure.user_message()),
            _ => None,
        }
    }
}

/// The single owner of all client-side search state.
///
/// Mutated only through [`crate::update`]; everything else reads it through
/// [`AppState::view`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    address: Address,
    offers: Vec<Offer>,
    filters: FilterState,
    current_page: usize,
    generation: u64,
    phase: SearchPhase,
    share_url: Option<String>,
    share_in_flight: bool,
    share_epoch: u64,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            address: Address::default(),
            offers: Vec::new(),
            filters: FilterState::default(),
            current_page: 1,
            generation: 0,
            phase: SearchPhase::default(),
            share_url: None,
            share_in_flight: false,
            share_epoch: 0,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State restored from a bookmarked query string.
    pub fn restore(address: Address, filters: FilterState) -> Self {
        Self {
            address,
            filters,
            ..Self::default()
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Tag of the search run whose stream events are currently accepted.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn share_url(&self) -> Option<&str> {
        self.share_url.as_deref()
    }

    /// Computes the full view model for the shell: filtered and paginated
    /// offers, summary counts, and the bookmarkable query string.
    pub fn view(&self) -> ResultsView {
        ResultsView::compute(self)
    }

    /// Returns and clears the dirty flag, used to coalesce renders.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // Mutators below are reducer-internal.

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_address(&mut self, address: Address) {
        self.address = address;
    }

    pub(crate) fn set_phase(&mut self, phase: SearchPhase) {
        self.phase = phase;
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub(crate) fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    pub(crate) fn push_offer(&mut self, offer: Offer) {
        self.offers.push(offer);
    }

    pub(crate) fn clear_offers(&mut self) {
        self.offers.clear();
    }

    /// Starts a new search run and returns its generation tag. Appends from
    /// superseded runs are dropped because their tag no longer matches.
    pub(crate) fn begin_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Drops the cached share link. Any response still in flight is
    /// recognized as stale through the epoch counter.
    pub(crate) fn invalidate_share(&mut self) {
        self.share_url = None;
        self.share_in_flight = false;
        self.share_epoch += 1;
    }

    pub(crate) fn share_epoch(&self) -> u64 {
        self.share_epoch
    }

    pub(crate) fn share_in_flight(&self) -> bool {
        self.share_in_flight
    }

    pub(crate) fn set_share_in_flight(&mut self, in_flight: bool) {
        self.share_in_flight = in_flight;
    }

    pub(crate) fn cache_share_url(&mut self, url: String) {
        self.share_url = Some(url);
    }
}
