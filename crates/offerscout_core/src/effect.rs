use crate::{Address, FilterState, Offer};

/// Side effects requested by the reducer, executed by the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Begin streaming offers for the tagged search run.
    StartSearch { generation: u64, address: Address },
    /// Persist the current offers+filters snapshot and obtain a link.
    RequestShareUrl {
        epoch: u64,
        offers: Vec<Offer>,
        filters: FilterState,
    },
    /// A share link (cached or freshly issued) is ready for presentation.
    ShareUrlAvailable { url: String },
    /// Share persistence failed; surface to the user and allow a retry.
    ShareUnavailable { message: String },
}
