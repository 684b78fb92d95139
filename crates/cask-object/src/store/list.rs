//! Paginated, delimiter-aware directory listing.

use crate::client::ListedItem;
use crate::types::{ObjectEntry, Page, StoreError, StoreResult};

use super::{DIR_MARKER, Store};

impl Store {
    /// List one page of the immediate children of `prefix`.
    ///
    /// `start_after` is either empty (first page) or the `last_key` of a
    /// previous page; scanning resumes strictly after it. Chaining pages
    /// until `has_more` is false yields every child exactly once, in
    /// lexicographic order, even while other writers insert or remove
    /// unrelated keys: the cursor is the raw last-seen key, not a positional
    /// offset.
    ///
    /// Files and synthetic directories share one namespace and interleave in
    /// key order. Directory entries report size 0 and no timestamps, and
    /// never carry a trailing separator in their name.
    ///
    /// A backend failure mid-iteration aborts the call; no partial page is
    /// returned.
    #[tracing::instrument(name = "store.list_page", skip(self))]
    pub async fn list_page(
        &self,
        prefix: &str,
        start_after: &str,
        limit: usize,
    ) -> StoreResult<Page> {
        if limit == 0 {
            return Err(StoreError::InvalidInput(
                "limit must be greater than zero".to_string(),
            ));
        }

        let full_prefix = self.dir_prefix(prefix);
        let listing = self.client().list_delimited(&full_prefix, start_after).await?;

        tracing::debug!(items = listing.len(), "delimited listing fetched");

        let mut page = Page::default();
        let mut emitted = listing
            .into_iter()
            .filter_map(|item| to_entry(&full_prefix, item))
            .peekable();

        while page.entries.len() < limit {
            let Some((key, entry)) = emitted.next() else {
                break;
            };
            page.last_key = key;
            page.entries.push(entry);
        }

        // Probe for one further emittable item instead of reasoning from
        // counts: a page that exactly exhausts the prefix must not report a
        // further page, and hidden items (markers) must not count as one.
        page.has_more = emitted.peek().is_some();

        Ok(page)
    }
}

/// Convert a raw listing item into `(raw key, entry)`, or `None` when the
/// item must stay hidden: the listed prefix itself, or a directory marker.
fn to_entry(full_prefix: &str, item: ListedItem) -> Option<(String, ObjectEntry)> {
    match item {
        ListedItem::CommonPrefix(key) => {
            let name = strip_prefix(full_prefix, &key).trim_end_matches('/');
            if name.is_empty() {
                return None;
            }

            let entry = ObjectEntry::dir(name);
            Some((key, entry))
        }
        ListedItem::Object(meta) => {
            let key = meta.location.as_ref();
            let name = strip_prefix(full_prefix, key);
            if name.is_empty() || name == DIR_MARKER {
                return None;
            }

            Some((key.to_string(), ObjectEntry::file(name, &meta)))
        }
    }
}

fn strip_prefix<'a>(full_prefix: &str, key: &'a str) -> &'a str {
    key.strip_prefix(full_prefix).unwrap_or(key)
}
