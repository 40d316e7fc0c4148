//! Request-keyed cache with optimistic mutation support.
//!
//! Entries are keyed by endpoint path plus normalized query parameters and
//! replaced verbatim on every successful fetch. Mutations run as tagged
//! transactions: snapshot the affected entries, patch them optimistically,
//! then either commit (mark stale, forcing a refetch) or roll every
//! snapshot back in one atomic step.

mod key;
mod layer;
mod transaction;

pub use key::CacheKey;
pub use layer::{CacheEntry, QueryCache};
pub use transaction::MutationTxn;
