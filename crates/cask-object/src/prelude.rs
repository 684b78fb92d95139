//! Convenience re-exports.

pub use crate::client::{DelimitedListing, ListedItem, ObjectClient};
pub use crate::config::StoreConfig;
pub use crate::store::{DIR_MARKER, Store};
pub use crate::types::{ObjectEntry, Page, StoreError, StoreResult};
