//! One page of a cursor-chained listing.

use serde::Serialize;

use super::ObjectEntry;

/// One page of directory entries plus a resumption cursor.
///
/// `last_key` is the backend-native full key of the last emitted entry, not a
/// positional offset: passing it back as `start_after` resumes strictly after
/// that key, so the cursor stays valid even when earlier entries are deleted
/// (or new ones inserted) between calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    /// Entries in lexicographic key order.
    pub entries: Vec<ObjectEntry>,
    /// Opaque cursor for the next call; empty when no entry was emitted.
    pub last_key: String,
    /// Whether a further page exists beyond this one.
    pub has_more: bool,
}
