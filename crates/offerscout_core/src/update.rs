use crate::{filter, pagination, AppState, Effect, FilterChange, Msg, SearchPhase, PAGE_SIZE};

/// Pure update function: applies a message to state and returns any effects.
///
/// Every invalidation rule lives here: the share cache is dropped on any
/// change to the offers, filters, or page; stream events tagged with a
/// superseded generation are discarded; the current page never points past
/// the filtered result set.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::AddressChanged(address) => {
            state.set_address(address);
            state.mark_dirty();
            Vec::new()
        }
        Msg::FilterChanged(change) => {
            apply_filter_change(&mut state, change);
            state.invalidate_share();
            reset_page_if_out_of_range(&mut state);
            state.mark_dirty();
            Vec::new()
        }
        Msg::PageChanged(page) => {
            let filtered_len = filter::apply(state.offers(), state.filters()).len();
            let total_pages = filtered_len.div_ceil(PAGE_SIZE);
            let page = if page == 0 || page > total_pages { 1 } else { page };
            if page != state.current_page() {
                state.set_page(page);
                state.invalidate_share();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SearchRequested => match validate_input(&state) {
            Err(message) => {
                state.set_phase(SearchPhase::InputError(message));
                state.mark_dirty();
                Vec::new()
            }
            Ok(()) => {
                let generation = state.begin_generation();
                state.clear_offers();
                state.set_page(1);
                state.invalidate_share();
                state.set_phase(SearchPhase::Streaming);
                state.mark_dirty();
                vec![Effect::StartSearch {
                    generation,
                    address: state.address().trimmed(),
                }]
            }
        },
        Msg::OfferIngested { generation, offer } => {
            if generation == state.generation() {
                state.push_offer(offer);
                state.invalidate_share();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StreamFinished { generation } => {
            if generation == state.generation() {
                state.set_phase(SearchPhase::Completed);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SearchFailed {
            generation,
            failure,
        } => {
            if generation == state.generation() {
                state.clear_offers();
                state.set_page(1);
                state.invalidate_share();
                state.set_phase(SearchPhase::Failed(failure));
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ShareRequested => {
            if let Some(url) = state.share_url() {
                vec![Effect::ShareUrlAvailable {
                    url: url.to_string(),
                }]
            } else if state.share_in_flight() {
                // A request for this exact snapshot is already on the wire;
                // its response will serve this caller too.
                Vec::new()
            } else {
                state.set_share_in_flight(true);
                vec![Effect::RequestShareUrl {
                    epoch: state.share_epoch(),
                    offers: state.offers().to_vec(),
                    filters: state.filters().clone(),
                }]
            }
        }
        Msg::ShareUrlReady { epoch, url } => {
            if epoch == state.share_epoch() {
                state.set_share_in_flight(false);
                state.cache_share_url(url.clone());
                state.mark_dirty();
                vec![Effect::ShareUrlAvailable { url }]
            } else {
                Vec::new()
            }
        }
        Msg::ShareFailed { epoch, message } => {
            if epoch == state.share_epoch() {
                state.set_share_in_flight(false);
                vec![Effect::ShareUnavailable { message }]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}

fn apply_filter_change(state: &mut AppState, change: FilterChange) {
    let filters = state.filters_mut();
    match change {
        FilterChange::Speed(speed) => filters.speed = speed,
        FilterChange::Limit(limit) => filters.limit = limit,
        FilterChange::MaxDuration(duration) => filters.max_duration = duration,
        FilterChange::Tv(tv) => filters.tv = tv,
        FilterChange::ConnectionTypes(types) => filters.connection_types = types,
        FilterChange::Providers(providers) => filters.providers = providers,
        FilterChange::InstallationOnly(required) => filters.installation_only = required,
        FilterChange::Age(age) => {
            // Typing an age re-arms the age filter.
            if age.is_some() {
                filters.show_all_ages = false;
            }
            filters.age = age;
        }
        FilterChange::ShowAllAges(show_all) => {
            if show_all {
                filters.age = None;
            }
            filters.show_all_ages = show_all;
        }
        FilterChange::Sort(sort) => filters.sort = sort,
    }
}

fn validate_input(state: &AppState) -> Result<(), String> {
    if !state.address().is_complete() {
        return Err("Please fill in all address fields.".to_string());
    }
    if state.filters().age == Some(0) {
        return Err("Please enter a valid age".to_string());
    }
    Ok(())
}

fn reset_page_if_out_of_range(state: &mut AppState) {
    let filtered = filter::apply(state.offers(), state.filters());
    let page = pagination::paginate(&filtered, PAGE_SIZE, state.current_page()).page;
    if page != state.current_page() {
        state.set_page(page);
    }
}
