//! Screen controllers. Each owns one result set and the sync components
//! that keep it current; rendering is left to the caller.

mod feed;
mod publishers;
mod search;

pub use feed::NewsFeed;
pub use publishers::PublisherList;
pub use search::SearchOverlay;

use crate::toast::Toast;

/// Outcome of a user action: the value plus a success toast, or the toast
/// describing the failure
pub type ActionResult<T> = std::result::Result<(T, Toast), Toast>;
