use clap::Parser;
use offerscout_core::{Address, FilterState, LimitFilter, SortKey, TvFilter};

/// Compare internet offers for an address from the terminal.
#[derive(Debug, Parser)]
#[command(name = "offerscout", version, about)]
pub struct Args {
    /// Restore address and filters from a bookmarked query string
    /// (overrides the individual address and filter flags).
    #[arg(long, value_name = "QUERY")]
    pub from_url: Option<String>,

    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub house_number: Option<String>,
    /// Postal code.
    #[arg(long)]
    pub plz: Option<String>,
    #[arg(long)]
    pub city: Option<String>,

    /// Minimum speed in Mbps.
    #[arg(long)]
    pub speed: Option<u32>,
    /// Minimum data cap in GB, or "none" to keep only unlimited offers.
    #[arg(long)]
    pub limit: Option<String>,
    /// Maximum contract duration in months.
    #[arg(long)]
    pub duration: Option<u32>,
    /// Require (true) or exclude (false) a TV package.
    #[arg(long)]
    pub tv: Option<bool>,
    /// Comma-separated connection technologies to allow.
    #[arg(long, value_name = "LIST")]
    pub connection_types: Option<String>,
    /// Comma-separated providers to allow.
    #[arg(long, value_name = "LIST")]
    pub providers: Option<String>,
    /// Keep only offers with installation included.
    #[arg(long)]
    pub installation: bool,
    /// Your age, for youth-tariff eligibility.
    #[arg(long)]
    pub age: Option<u32>,
    /// Ignore age restrictions entirely.
    #[arg(long)]
    pub show_all_ages: bool,
    /// cost_first_years_eur | after_two_years_eur | speed_mbps
    #[arg(long)]
    pub sort: Option<String>,

    /// Result page to display (1-based).
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    /// Request a share link once the search completes.
    #[arg(long)]
    pub share: bool,
    /// Offers backend base URL.
    #[arg(long, default_value = "http://localhost:5000")]
    pub base_url: String,
    /// Also log to the terminal instead of only ./offerscout.log.
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    /// The initial address and filter state, either decoded from a pasted
    /// query string or assembled from the individual flags.
    pub fn restore_state(&self) -> (Address, FilterState) {
        if let Some(query) = &self.from_url {
            return offerscout_core::decode(query);
        }

        let address = Address {
            street: self.street.clone().unwrap_or_default(),
            house_number: self.house_number.clone().unwrap_or_default(),
            plz: self.plz.clone().unwrap_or_default(),
            city: self.city.clone().unwrap_or_default(),
        };

        let mut filters = FilterState {
            speed: self.speed,
            max_duration: self.duration,
            installation_only: self.installation,
            age: self.age,
            show_all_ages: self.show_all_ages && self.age.is_none(),
            ..FilterState::default()
        };
        if let Some(limit) = &self.limit {
            filters.limit = if limit == "none" {
                LimitFilter::UnlimitedOnly
            } else if let Ok(gb) = limit.parse() {
                LimitFilter::AtLeastGb(gb)
            } else {
                LimitFilter::Any
            };
        }
        filters.tv = match self.tv {
            None => TvFilter::Any,
            Some(true) => TvFilter::Required,
            Some(false) => TvFilter::Excluded,
        };
        if let Some(list) = &self.connection_types {
            filters.connection_types = split_list(list);
        }
        if let Some(list) = &self.providers {
            filters.providers = split_list(list);
        }
        if let Some(sort) = &self.sort {
            filters.sort = SortKey::from_param(sort);
        }

        (address, filters)
    }
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

    #[test]
    fn flags_assemble_address_and_filters() {
        let args = Args::parse_from([
            "offerscout",
            "--street",
            "Hauptstrasse",
            "--house-number",
            "12",
            "--plz",
            "80331",
            "--city",
            "Munich",
            "--speed",
            "100",
            "--limit",
            "none",
            "--tv",
            "true",
            "--providers",
            "ByteMe,WebWunder",
            "--sort",
            "speed_mbps",
        ]);

        let (address, filters) = args.restore_state();
        assert!(address.is_complete());
        assert_eq!(filters.speed, Some(100));
        assert_eq!(filters.limit, LimitFilter::UnlimitedOnly);
        assert_eq!(filters.tv, TvFilter::Required);
        assert_eq!(filters.providers.len(), 2);
        assert_eq!(filters.sort, SortKey::SpeedDesc);
    }

    #[test]
    fn from_url_overrides_flags() {
        let args = Args::parse_from([
            "offerscout",
            "--street",
            "Ignored",
            "--from-url",
            "?street=Hauptstrasse&house_number=12&plz=80331&city=Munich&speed=250",
        ]);

        let (address, filters) = args.restore_state();
        assert_eq!(address.street, "Hauptstrasse");
        assert_eq!(filters.speed, Some(250));
    }

    #[test]
    fn age_wins_over_show_all_ages() {
        let args = Args::parse_from(["offerscout", "--age", "25", "--show-all-ages"]);
        let (_, filters) = args.restore_state();
        assert_eq!(filters.age, Some(25));
        assert!(!filters.show_all_ages);
    }
}
