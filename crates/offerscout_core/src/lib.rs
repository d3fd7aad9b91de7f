//! Offerscout core: pure state machine for the offer comparison pipeline.
//!
//! No I/O lives here. The reducer in [`update`] consumes intents, the view
//! model in [`ResultsView`] is what a shell renders, and the effects returned
//! by the reducer are executed by the surrounding application.
mod effect;
mod filter;
mod msg;
mod offer;
mod pagination;
mod state;
mod update;
mod url_params;
mod view_model;

pub use effect::Effect;
pub use filter::{apply, FilterState, LimitFilter, SortKey, TvFilter};
pub use msg::{FilterChange, Msg};
pub use offer::Offer;
pub use pagination::{paginate, Page};
pub use state::{Address, AppState, SearchFailure, SearchPhase, PAGE_SIZE};
pub use update::update;
pub use url_params::{decode, encode};
pub use view_model::ResultsView;
