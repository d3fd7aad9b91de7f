use std::sync::Once;

use offerscout_core::{update, Address, AppState, Effect, FilterChange, Msg, Offer, SortKey};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scout_logging::initialize_for_tests);
}

fn searched_state() -> AppState {
    let address = Address {
        street: "Hauptstrasse".to_string(),
        house_number: "12".to_string(),
        plz: "80331".to_string(),
        city: "Munich".to_string(),
    };
    let (state, _) = update(AppState::new(), Msg::AddressChanged(address));
    let (state, _) = update(state, Msg::SearchRequested);
    let generation = state.generation();
    let (state, _) = update(
        state,
        Msg::OfferIngested {
            generation,
            offer: Offer {
                provider: "A".to_string(),
                name: "Plan A".to_string(),
                speed_mbps: 100,
                cost_eur: 30.0,
                cost_first_years_eur: 25.0,
                after_two_years_eur: 30.0,
                duration_months: 24,
                limit_from_gb: None,
                installation_included: false,
                tv: None,
                max_age: None,
                connection_type: "DSL".to_string(),
            },
        },
    );
    state
}

fn request_epoch(effects: &[Effect]) -> u64 {
    match effects {
        [Effect::RequestShareUrl { epoch, .. }] => *epoch,
        other => panic!("expected a single RequestShareUrl effect, got {other:?}"),
    }
}

#[test]
fn first_share_request_snapshots_offers_and_filters() {
    init_logging();
    let state = searched_state();

    let (_state, effects) = update(state, Msg::ShareRequested);

    match &effects[..] {
        [Effect::RequestShareUrl {
            offers, filters, ..
        }] => {
            assert_eq!(offers.len(), 1);
            assert_eq!(filters, &offerscout_core::FilterState::default());
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn share_requested_twice_issues_a_single_backend_call() {
    init_logging();
    let state = searched_state();

    let (state, effects) = update(state, Msg::ShareRequested);
    let epoch = request_epoch(&effects);

    // Second click while the first request is still in flight: no new call.
    let (state, effects) = update(state, Msg::ShareRequested);
    assert!(effects.is_empty());

    let (state, effects) = update(
        state,
        Msg::ShareUrlReady {
            epoch,
            url: "https://short.example/abc".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ShareUrlAvailable {
            url: "https://short.example/abc".to_string(),
        }]
    );

    // Third click after the response: served from cache, still no new call.
    let (_state, effects) = update(state, Msg::ShareRequested);
    assert_eq!(
        effects,
        vec![Effect::ShareUrlAvailable {
            url: "https://short.example/abc".to_string(),
        }]
    );
}

#[test]
fn filter_change_invalidates_cached_share_url() {
    init_logging();
    let state = searched_state();
    let (state, effects) = update(state, Msg::ShareRequested);
    let epoch = request_epoch(&effects);
    let (state, _) = update(
        state,
        Msg::ShareUrlReady {
            epoch,
            url: "https://short.example/abc".to_string(),
        },
    );
    assert_eq!(state.share_url(), Some("https://short.example/abc"));

    let (state, _) = update(
        state,
        Msg::FilterChanged(FilterChange::Sort(SortKey::PromoPrice)),
    );
    assert_eq!(state.share_url(), None);

    // The next request must go back to the backend.
    let (_state, effects) = update(state, Msg::ShareRequested);
    request_epoch(&effects);
}

#[test]
fn stale_share_response_is_dropped_after_invalidation() {
    init_logging();
    let state = searched_state();
    let (state, effects) = update(state, Msg::ShareRequested);
    let old_epoch = request_epoch(&effects);

    // Filters change while the share request is still in flight.
    let (state, _) = update(
        state,
        Msg::FilterChanged(FilterChange::Speed(Some(100))),
    );

    let (state, effects) = update(
        state,
        Msg::ShareUrlReady {
            epoch: old_epoch,
            url: "https://short.example/stale".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.share_url(), None);
}

#[test]
fn share_failure_leaves_offers_and_filters_untouched() {
    init_logging();
    let state = searched_state();
    let offers_before = state.offers().to_vec();
    let (state, effects) = update(state, Msg::ShareRequested);
    let epoch = request_epoch(&effects);

    let (state, effects) = update(
        state,
        Msg::ShareFailed {
            epoch,
            message: "persistence unavailable".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::ShareUnavailable {
            message: "persistence unavailable".to_string(),
        }]
    );
    assert_eq!(state.offers(), offers_before.as_slice());

    // Retry is possible immediately.
    let (_state, effects) = update(state, Msg::ShareRequested);
    request_epoch(&effects);
}

#[test]
fn ingested_offer_invalidates_cached_share_url() {
    init_logging();
    let state = searched_state();
    let (state, effects) = update(state, Msg::ShareRequested);
    let epoch = request_epoch(&effects);
    let (state, _) = update(
        state,
        Msg::ShareUrlReady {
            epoch,
            url: "https://short.example/abc".to_string(),
        },
    );

    let generation = state.generation();
    let (state, _) = update(
        state,
        Msg::OfferIngested {
            generation,
            offer: Offer {
                provider: "B".to_string(),
                name: "Plan B".to_string(),
                speed_mbps: 200,
                cost_eur: 40.0,
                cost_first_years_eur: 35.0,
                after_two_years_eur: 40.0,
                duration_months: 12,
                limit_from_gb: None,
                installation_included: true,
                tv: None,
                max_age: None,
                connection_type: "Fiber".to_string(),
            },
        },
    );
    assert_eq!(state.share_url(), None);
}
