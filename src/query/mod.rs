//! Query cache layer.
//!
//! Pages of notes are cached under composite [`QueryKey`]s and served
//! stale-while-revalidate. Successful mutations invalidate the whole
//! [`NOTES_NAMESPACE`].
//!
//! - [`key`]: Composite `(namespace, page, term)` keys
//! - [`cache`]: Entries, pending-request registry, keep-previous-data policy

pub mod cache;
pub mod key;

pub use cache::{Lookup, QueryCache, QueryView, Resolution};
pub use key::{QueryKey, NOTES_NAMESPACE};
