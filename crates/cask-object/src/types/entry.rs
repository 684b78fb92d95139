//! A single child of a listed prefix.

use jiff::Timestamp;
use object_store::ObjectMeta;
use serde::Serialize;

/// One immediate child of a listed prefix: either a leaf object or a
/// synthetic directory.
///
/// Directories have no backing object of their own; the backend reports them
/// as common prefixes (key groupings up to the next separator), so a
/// directory entry carries no size and no timestamps. Files and directories
/// share one namespace and interleave in key order within a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectEntry {
    /// Key segment relative to the listed prefix, without a trailing
    /// separator for directories.
    pub name: String,
    /// Whether this entry is a synthetic directory.
    pub is_dir: bool,
    /// Object size in bytes; always 0 for directories.
    pub size: u64,
    /// Creation time. The storage metadata carries a single modification
    /// timestamp, so for backends that do not track creation separately this
    /// mirrors [`updated`](Self::updated). `None` for directories.
    pub created: Option<Timestamp>,
    /// Last modification time. `None` for directories.
    pub updated: Option<Timestamp>,
}

impl ObjectEntry {
    /// Synthetic directory entry.
    pub(crate) fn dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_dir: true,
            size: 0,
            created: None,
            updated: None,
        }
    }

    /// Leaf object entry, carrying size and timestamps from the backend
    /// metadata.
    pub(crate) fn file(name: &str, meta: &ObjectMeta) -> Self {
        let timestamp = meta
            .last_modified
            .timestamp_nanos_opt()
            .and_then(|nanos| Timestamp::from_nanosecond(i128::from(nanos)).ok());

        Self {
            name: name.to_string(),
            is_dir: false,
            size: meta.size,
            created: timestamp,
            updated: timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_entry_has_no_size_or_timestamps() {
        let entry = ObjectEntry::dir("sub");
        assert!(entry.is_dir);
        assert_eq!(entry.size, 0);
        assert_eq!(entry.created, None);
        assert_eq!(entry.updated, None);
    }

    #[test]
    fn serializes_with_stable_field_names() {
        let json = serde_json::to_value(ObjectEntry::dir("docs")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "docs",
                "is_dir": true,
                "size": 0,
                "created": null,
                "updated": null,
            })
        );
    }
}
