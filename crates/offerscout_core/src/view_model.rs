use std::collections::BTreeSet;

use crate::{filter, pagination, url_params, AppState, Offer, SearchPhase, PAGE_SIZE};

/// Everything a shell needs to render one frame: the visible offer slice,
/// pagination and summary figures, and the bookmarkable query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub phase: SearchPhase,
    pub visible: Vec<Offer>,
    /// 1-based page that was sliced (after out-of-range correction).
    pub current_page: usize,
    /// 0 when there are no filtered results; the pagination widget is
    /// suppressed when this is at most 1.
    pub total_pages: usize,
    /// Full filtered count, not just the visible slice.
    pub offer_count: usize,
    /// Distinct providers in the filtered set.
    pub provider_count: usize,
    /// Query string reflecting the current address and filters.
    pub query: String,
    pub share_url: Option<String>,
    /// Inline message for input or upstream failures.
    pub error: Option<String>,
}

impl ResultsView {
    pub(crate) fn compute(state: &AppState) -> ResultsView {
        let filtered = filter::apply(state.offers(), state.filters());
        let page = pagination::paginate(&filtered, PAGE_SIZE, state.current_page());
        let providers: BTreeSet<&str> =
            filtered.iter().map(|offer| offer.provider.as_str()).collect();

        ResultsView {
            phase: state.phase().clone(),
            current_page: page.page,
            total_pages: page.total_pages,
            visible: page.visible.to_vec(),
            offer_count: filtered.len(),
            provider_count: providers.len(),
            query: url_params::encode(state.address(), state.filters()),
            share_url: state.share_url().map(ToOwned::to_owned),
            error: state.phase().user_message(),
        }
    }

    /// Summary line shown above the results, e.g.
    /// "Found 3 offers from 2 providers".
    pub fn summary(&self) -> String {
        format!(
            "Found {} offer{} from {} provider{}",
            self.offer_count,
            if self.offer_count == 1 { "" } else { "s" },
            self.provider_count,
            if self.provider_count == 1 { "" } else { "s" },
        )
    }
}
