use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Offer;

/// Data-cap constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitFilter {
    /// No constraint.
    #[default]
    Any,
    /// Keep only offers without a data cap.
    UnlimitedOnly,
    /// Keep offers without a cap, or with a cap of at least this many GB.
    AtLeastGb(u32),
}

/// TV-package constraint (tri-state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TvFilter {
    #[default]
    Any,
    Required,
    Excluded,
}

/// Display ordering for the filtered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    /// Preserve arrival order.
    #[default]
    #[serde(rename = "unsorted")]
    Unsorted,
    /// Ascending promotional monthly price.
    #[serde(rename = "cost_first_years_eur")]
    PromoPrice,
    /// Ascending post-promotion monthly price.
    #[serde(rename = "after_two_years_eur")]
    PostPromoPrice,
    /// Descending speed.
    #[serde(rename = "speed_mbps")]
    SpeedDesc,
}

impl SortKey {
    /// Query-parameter token, `None` for the default ordering.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            SortKey::Unsorted => None,
            SortKey::PromoPrice => Some("cost_first_years_eur"),
            SortKey::PostPromoPrice => Some("after_two_years_eur"),
            SortKey::SpeedDesc => Some("speed_mbps"),
        }
    }

    /// Parses a query-parameter token; unknown tokens mean "unsorted".
    pub fn from_param(value: &str) -> SortKey {
        match value {
            "cost_first_years_eur" => SortKey::PromoPrice,
            "after_two_years_eur" => SortKey::PostPromoPrice,
            "speed_mbps" => SortKey::SpeedDesc,
            _ => SortKey::Unsorted,
        }
    }
}

/// The user's current filter and sort selections.
///
/// A default field imposes no constraint. The age filter and the
/// "show all ages" switch are mutually exclusive; the reducer keeps that
/// invariant, this struct just stores both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Minimum speed in Mbps, inclusive.
    pub speed: Option<u32>,
    pub limit: LimitFilter,
    /// Maximum contract duration in months, inclusive.
    #[serde(rename = "duration")]
    pub max_duration: Option<u32>,
    pub tv: TvFilter,
    /// Allowed connection technologies; empty = unconstrained.
    pub connection_types: BTreeSet<String>,
    /// Allowed providers; empty = unconstrained.
    pub providers: BTreeSet<String>,
    /// Keep only offers with installation included.
    #[serde(rename = "installation")]
    pub installation_only: bool,
    /// The user's age, for youth-tariff eligibility.
    pub age: Option<u32>,
    pub show_all_ages: bool,
    pub sort: SortKey,
}

impl FilterState {
    /// True when the offer passes every active predicate (logical AND).
    pub fn matches(&self, offer: &Offer) -> bool {
        if let Some(min_speed) = self.speed {
            if offer.speed_mbps < min_speed {
                return false;
            }
        }
        match self.limit {
            LimitFilter::Any => {}
            LimitFilter::UnlimitedOnly => {
                if offer.limit_from_gb.is_some() {
                    return false;
                }
            }
            // An uncapped offer always satisfies a numeric threshold.
            LimitFilter::AtLeastGb(min_gb) => {
                if offer.limit_from_gb.is_some_and(|gb| gb < min_gb) {
                    return false;
                }
            }
        }
        if let Some(max_duration) = self.max_duration {
            if offer.duration_months > max_duration {
                return false;
            }
        }
        match self.tv {
            TvFilter::Any => {}
            TvFilter::Required => {
                if offer.tv.is_none() {
                    return false;
                }
            }
            TvFilter::Excluded => {
                if offer.tv.is_some() {
                    return false;
                }
            }
        }
        if !self.connection_types.is_empty() && !self.connection_types.contains(&offer.connection_type)
        {
            return false;
        }
        if !self.providers.is_empty() && !self.providers.contains(&offer.provider) {
            return false;
        }
        if self.installation_only && !offer.installation_included {
            return false;
        }
        if !self.show_all_ages {
            if let Some(age) = self.age {
                if offer.max_age.is_some_and(|max_age| age > max_age) {
                    return false;
                }
            }
        }
        true
    }
}

/// Pure filter/sort engine: maps the offer collection and the current filter
/// state to an ordered, filtered subset. The input is never mutated and the
/// sort is stable, so `SortKey::Unsorted` preserves arrival order.
pub fn apply(offers: &[Offer], filters: &FilterState) -> Vec<Offer> {
    let mut result: Vec<Offer> = offers
        .iter()
        .filter(|offer| filters.matches(offer))
        .cloned()
        .collect();

    match filters.sort {
        SortKey::Unsorted => {}
        SortKey::PromoPrice => {
            result.sort_by(|a, b| a.cost_first_years_eur.total_cmp(&b.cost_first_years_eur))
        }
        SortKey::PostPromoPrice => {
            result.sort_by(|a, b| a.after_two_years_eur.total_cmp(&b.after_two_years_eur))
        }
        SortKey::SpeedDesc => result.sort_by(|a, b| b.speed_mbps.cmp(&a.speed_mbps)),
    }

    result
}
