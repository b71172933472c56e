//! Client-side data synchronization shared by every screen.
//!
//! - [`debounce`]: delays suggestion lookups until typing pauses
//! - [`suggestions`]: fail-soft suggestion lookups with stale discard
//! - [`pager`]: paginated fetching into a duplicate-free [`ResultSet`]
//! - [`scroll`]: decides when a scroll position asks for the next page
//! - [`poller`]: bounded status polling for newly created items

pub mod debounce;
pub mod pager;
pub mod poller;
pub mod result_set;
pub mod scroll;
pub mod sequence;
pub mod suggestions;

pub use debounce::{DebounceOutcome, Debouncer};
pub use pager::{FetchOutcome, FetchTicket, Pager, PagerSnapshot};
pub use poller::{PollOutcome, PollPolicy, PollState, Poller};
pub use result_set::{Keyed, ResultSet};
pub use scroll::{ScrollMetrics, ScrollTrigger};
pub use sequence::{RequestSequence, Ticket};
pub use suggestions::SuggestionFetcher;
