//! Directory-style store facade over an [`ObjectClient`].
//!
//! Every key the store touches is rooted under a caller-supplied base
//! prefix, so several stores (tenants, test runs) can share one bucket and
//! one client. The store itself persists nothing: the backend keyspace is
//! the single source of truth, and directories are synthetic groupings
//! derived from it at listing time.

use bytes::Bytes;
use object_store::ObjectMeta;

use crate::client::ObjectClient;
use crate::types::StoreResult;

mod list;
mod rename;

/// Name of the zero-byte object that marks an otherwise-empty directory.
///
/// The path model rejects keys with a trailing separator, so a marker object
/// inside the directory stands in for the classic `dir/` placeholder. The
/// lister hides it under its own prefix; the directory still shows up as a
/// common prefix in the parent listing.
pub const DIR_MARKER: &str = ".keep";

/// Directory-style view of an object-storage keyspace.
///
/// Holds a cloned [`ObjectClient`] handle; construct the client once at
/// startup and hand a clone to every store rather than connecting per
/// operation.
#[derive(Clone, Debug)]
pub struct Store {
    client: ObjectClient,
    base_prefix: String,
}

impl Store {
    /// Create a store scoped under `base_prefix` (may be empty).
    pub fn new(client: ObjectClient, base_prefix: impl Into<String>) -> Self {
        let base_prefix = base_prefix.into().trim_matches('/').to_string();

        Self {
            client,
            base_prefix,
        }
    }

    /// The backend client this store operates through.
    pub fn client(&self) -> &ObjectClient {
        &self.client
    }

    /// The base prefix this store is scoped under.
    pub fn base_prefix(&self) -> &str {
        &self.base_prefix
    }

    /// Upload `data` to `prefix/name`, creating or overwriting the object.
    /// Returns the number of bytes written.
    pub async fn upload(&self, prefix: &str, name: &str, data: Bytes) -> StoreResult<u64> {
        let key = self.join_key(&[prefix, name]);
        self.client.put(&key, data).await
    }

    /// Create an empty directory `prefix/name` by writing its marker object.
    ///
    /// Directories containing at least one object need no marker; this only
    /// matters for directories that should list before anything is uploaded
    /// into them.
    pub async fn create_dir(&self, prefix: &str, name: &str) -> StoreResult<()> {
        let key = self.join_key(&[prefix, name, DIR_MARKER]);
        self.client.put(&key, Bytes::new()).await?;

        Ok(())
    }

    /// Download the object at `prefix/name`.
    pub async fn get(&self, prefix: &str, name: &str) -> StoreResult<Bytes> {
        let key = self.join_key(&[prefix, name]);
        self.client.get(&key).await
    }

    /// Metadata for the object at `prefix/name`.
    pub async fn stat(&self, prefix: &str, name: &str) -> StoreResult<ObjectMeta> {
        let key = self.join_key(&[prefix, name]);
        self.client.head(&key).await
    }

    /// Delete the object at `prefix/name`.
    pub async fn delete(&self, prefix: &str, name: &str) -> StoreResult<()> {
        let key = self.join_key(&[prefix, name]);
        self.client.delete(&key).await
    }

    /// Join `parts` under the base prefix, skipping empty segments.
    fn join_key(&self, parts: &[&str]) -> String {
        let mut key = String::new();
        for part in std::iter::once(self.base_prefix.as_str()).chain(parts.iter().copied()) {
            let part = part.trim_matches('/');
            if part.is_empty() {
                continue;
            }
            if !key.is_empty() {
                key.push('/');
            }
            key.push_str(part);
        }

        key
    }

    /// Full listing prefix for `prefix`, normalized to end with a separator
    /// (empty stays empty).
    fn dir_prefix(&self, prefix: &str) -> String {
        let mut key = self.join_key(&[prefix]);
        if !key.is_empty() {
            key.push('/');
        }

        key
    }
}
