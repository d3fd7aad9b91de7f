//! Round-trip between (address, filters) and the browser-visible query
//! string. Absence of a parameter means "default/unset".

use url::form_urlencoded;

use crate::{Address, FilterState, LimitFilter, SortKey, TvFilter};

/// Sentinel for the unlimited-only data-cap selection.
const LIMIT_NONE: &str = "none";

/// Serializes the address and filter state into a query string
/// (without a leading `?`). Defaults are omitted.
pub fn encode(address: &Address, filters: &FilterState) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    let trimmed = address.trimmed();
    for (key, value) in [
        ("street", &trimmed.street),
        ("house_number", &trimmed.house_number),
        ("plz", &trimmed.plz),
        ("city", &trimmed.city),
    ] {
        if !value.is_empty() {
            query.append_pair(key, value);
        }
    }

    if let Some(speed) = filters.speed {
        query.append_pair("speed", &speed.to_string());
    }
    match filters.limit {
        LimitFilter::Any => {}
        LimitFilter::UnlimitedOnly => {
            query.append_pair("limit", LIMIT_NONE);
        }
        LimitFilter::AtLeastGb(gb) => {
            query.append_pair("limit", &gb.to_string());
        }
    }
    if let Some(duration) = filters.max_duration {
        query.append_pair("duration", &duration.to_string());
    }
    match filters.tv {
        TvFilter::Any => {}
        TvFilter::Required => {
            query.append_pair("tv", "true");
        }
        TvFilter::Excluded => {
            query.append_pair("tv", "false");
        }
    }
    if !filters.connection_types.is_empty() {
        let joined: Vec<&str> = filters.connection_types.iter().map(String::as_str).collect();
        query.append_pair("connection_types", &joined.join(","));
    }
    if !filters.providers.is_empty() {
        let joined: Vec<&str> = filters.providers.iter().map(String::as_str).collect();
        query.append_pair("providers", &joined.join(","));
    }
    if filters.installation_only {
        query.append_pair("installation", "true");
    }
    if !filters.show_all_ages {
        if let Some(age) = filters.age {
            query.append_pair("age", &age.to_string());
        }
    }
    if let Some(sort) = filters.sort.as_param() {
        query.append_pair("sort", sort);
    }

    query.finish()
}

/// Parses a query string (with or without a leading `?`) back into an
/// address and filter state. Unknown or malformed parameters are ignored.
pub fn decode(query: &str) -> (Address, FilterState) {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut address = Address::default();
    let mut filters = FilterState::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let value = value.as_ref();
        match key.as_ref() {
            "street" => address.street = value.to_string(),
            "house_number" => address.house_number = value.to_string(),
            "plz" => address.plz = value.to_string(),
            "city" => address.city = value.to_string(),
            "speed" => filters.speed = value.parse().ok(),
            "limit" => {
                filters.limit = if value == LIMIT_NONE {
                    LimitFilter::UnlimitedOnly
                } else if let Ok(gb) = value.parse() {
                    LimitFilter::AtLeastGb(gb)
                } else {
                    LimitFilter::Any
                };
            }
            "duration" => filters.max_duration = value.parse().ok(),
            "tv" => {
                filters.tv = match value {
                    "true" => TvFilter::Required,
                    "false" => TvFilter::Excluded,
                    _ => TvFilter::Any,
                };
            }
            "connection_types" => {
                filters.connection_types = split_list(value);
            }
            "providers" => {
                filters.providers = split_list(value);
            }
            "installation" => filters.installation_only = value == "true",
            "age" => {
                if let Ok(age) = value.parse() {
                    filters.age = Some(age);
                    filters.show_all_ages = false;
                }
            }
            "sort" => filters.sort = SortKey::from_param(value),
            _ => {}
        }
    }

    (address, filters)
}

fn split_list(value: &str) -> std::collections::BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn address() -> Address {
        Address {
            street: "Hauptstrasse".to_string(),
            house_number: "12a".to_string(),
            plz: "80331".to_string(),
            city: "Munich".to_string(),
        }
    }

    #[test]
    fn defaults_encode_to_address_only() {
        let query = encode(&address(), &FilterState::default());
        assert_eq!(
            query,
            "street=Hauptstrasse&house_number=12a&plz=80331&city=Munich"
        );
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let filters = FilterState {
            speed: Some(100),
            limit: LimitFilter::AtLeastGb(250),
            max_duration: Some(12),
            tv: TvFilter::Required,
            connection_types: BTreeSet::from(["Cable".to_string(), "Fiber".to_string()]),
            providers: BTreeSet::from(["WebWunder".to_string()]),
            installation_only: true,
            age: Some(27),
            show_all_ages: false,
            sort: SortKey::PromoPrice,
        };

        let query = encode(&address(), &filters);
        let (decoded_address, decoded_filters) = decode(&query);
        assert_eq!(decoded_address, address());
        assert_eq!(decoded_filters, filters);
    }

    #[test]
    fn round_trip_each_field_independently() {
        let variants = [
            FilterState {
                speed: Some(500),
                ..FilterState::default()
            },
            FilterState {
                limit: LimitFilter::UnlimitedOnly,
                ..FilterState::default()
            },
            FilterState {
                max_duration: Some(24),
                ..FilterState::default()
            },
            FilterState {
                tv: TvFilter::Excluded,
                ..FilterState::default()
            },
            FilterState {
                connection_types: BTreeSet::from(["DSL".to_string()]),
                ..FilterState::default()
            },
            FilterState {
                providers: BTreeSet::from(["ByteMe".to_string(), "Ping Perfect".to_string()]),
                ..FilterState::default()
            },
            FilterState {
                installation_only: true,
                ..FilterState::default()
            },
            FilterState {
                age: Some(19),
                ..FilterState::default()
            },
            FilterState {
                sort: SortKey::SpeedDesc,
                ..FilterState::default()
            },
        ];

        for filters in variants {
            let query = encode(&Address::default(), &filters);
            let (_, decoded) = decode(&query);
            assert_eq!(decoded, filters, "query was {query}");
        }
    }

    #[test]
    fn show_all_ages_omits_age_parameter() {
        let filters = FilterState {
            age: Some(30),
            show_all_ages: true,
            ..FilterState::default()
        };
        let query = encode(&Address::default(), &filters);
        assert!(!query.contains("age="));
    }

    #[test]
    fn absent_parameters_decode_to_defaults() {
        let (address, filters) = decode("street=Foo");
        assert_eq!(address.street, "Foo");
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn leading_question_mark_and_junk_are_tolerated() {
        let (_, filters) = decode("?speed=abc&unknown=1&tv=maybe&limit=zzz");
        assert_eq!(filters, FilterState::default());
    }
}
