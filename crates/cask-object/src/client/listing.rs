//! Merged view of a delimiter-grouped listing.

use derive_more::Deref;
use object_store::{ListResult, ObjectMeta};

/// One raw result of a delimited listing: a leaf object directly under the
/// listed prefix, or a common prefix grouping every deeper key.
#[derive(Debug, Clone)]
pub enum ListedItem {
    /// A leaf object with its metadata.
    Object(ObjectMeta),
    /// A synthetic directory: keys sharing this prefix up to the next
    /// separator. Carries the full prefix key *with* its trailing
    /// separator: the path model strips it, but a leaf object and a
    /// directory can share the same stem, and without the separator the two
    /// would collide on one key — a cursor landing between them would then
    /// skip the second.
    CommonPrefix(String),
}

impl ListedItem {
    /// Full backend key of this item. Common prefixes end with the
    /// separator, so they order and resume exactly like backend-native
    /// prefix keys.
    pub fn key(&self) -> &str {
        match self {
            Self::Object(meta) => meta.location.as_ref(),
            Self::CommonPrefix(key) => key,
        }
    }
}

/// Lexicographically ordered sequence of listing items, already bounded
/// below (exclusively) by the caller's resumption key.
///
/// The backend reports common prefixes and leaf objects as two separately
/// sorted sets; this merges them into the single key-ordered sequence a
/// cursor-chained scan needs.
#[derive(Debug, Deref)]
pub struct DelimitedListing {
    items: Vec<ListedItem>,
}

impl DelimitedListing {
    pub(crate) fn merge(result: ListResult, start_after: &str) -> Self {
        let mut items: Vec<ListedItem> = result
            .common_prefixes
            .into_iter()
            .map(|path| ListedItem::CommonPrefix(format!("{path}/")))
            .chain(result.objects.into_iter().map(ListedItem::Object))
            .filter(|item| start_after.is_empty() || item.key() > start_after)
            .collect();
        items.sort_unstable_by(|a, b| a.key().cmp(b.key()));

        Self { items }
    }
}

impl IntoIterator for DelimitedListing {
    type Item = ListedItem;
    type IntoIter = std::vec::IntoIter<ListedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
