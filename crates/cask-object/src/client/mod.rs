//! Unified object-store client backed by [`object_store::ObjectStore`].
//!
//! [`ObjectClient`] is a thin, cloneable wrapper around
//! `Arc<dyn ObjectStore>` exposing exactly the backend capabilities the
//! store layer consumes: put, get, head, delete, conditional copy, and
//! delimited listing. Every public method is instrumented with [`tracing`].

use std::sync::Arc;

use bytes::Bytes;
use object_store::path::Path;
use object_store::{ObjectMeta, ObjectStore, PutPayload};

use crate::types::{StoreError, StoreResult};

mod listing;

pub use listing::{DelimitedListing, ListedItem};

/// Cloneable handle to any [`ObjectStore`] backend (S3, GCS, in-memory).
///
/// Construct once at application startup (see
/// [`ObjectClient::connect`](crate::config)) and clone freely: a clone is an
/// `Arc` clone and reuses the underlying authentication state and connection
/// pool. Building a fresh client per operation repeats that setup cost every
/// time.
///
/// All methods accept string keys and convert them to
/// [`object_store::path::Path`] internally.
#[derive(Clone, Debug)]
pub struct ObjectClient(Arc<dyn ObjectStore>);

impl ObjectClient {
    /// Wrap a concrete [`ObjectStore`] implementation.
    pub fn new(store: impl ObjectStore) -> Self {
        Self(Arc::new(store))
    }

    /// Upload `data` to `key`, creating or overwriting the object.
    /// Returns the number of bytes written.
    #[tracing::instrument(name = "object.put", skip(self, data), fields(size = data.len()))]
    pub async fn put(&self, key: &str, data: Bytes) -> StoreResult<u64> {
        let path = Path::from(key);
        let size = data.len() as u64;
        self.0.put(&path, PutPayload::from(data)).await?;

        Ok(size)
    }

    /// Retrieve the raw bytes stored at `key`.
    #[tracing::instrument(name = "object.get", skip(self))]
    pub async fn get(&self, key: &str) -> StoreResult<Bytes> {
        let path = Path::from(key);
        let result = self.0.get(&path).await?;

        Ok(result.bytes().await?)
    }

    /// Get object metadata (size, last-modified) without downloading the
    /// body.
    #[tracing::instrument(name = "object.head", skip(self))]
    pub async fn head(&self, key: &str) -> StoreResult<ObjectMeta> {
        let path = Path::from(key);

        Ok(self.0.head(&path).await?)
    }

    /// Delete the object at `key`. Fails with [`StoreError::NotFound`] when
    /// absent.
    #[tracing::instrument(name = "object.delete", skip(self))]
    pub async fn delete(&self, key: &str) -> StoreResult<()> {
        let path = Path::from(key);

        Ok(self.0.delete(&path).await?)
    }

    /// Copy `src` to `dst`, failing with [`StoreError::PreconditionFailed`]
    /// if `dst` already exists.
    ///
    /// The precondition is evaluated server-side, so the copy is safe
    /// against concurrent creators of the same destination key.
    #[tracing::instrument(name = "object.copy_if_absent", skip(self))]
    pub async fn copy_if_absent(&self, src: &str, dst: &str) -> StoreResult<()> {
        let from = Path::from(src);
        let to = Path::from(dst);

        match self.0.copy_if_not_exists(&from, &to).await {
            Ok(()) => Ok(()),
            Err(
                object_store::Error::AlreadyExists { .. }
                | object_store::Error::Precondition { .. },
            ) => Err(StoreError::PreconditionFailed {
                dst: dst.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// List one directory level under `prefix`.
    ///
    /// Keys deeper than one separator collapse into common prefixes. The
    /// merged result is ordered by raw key and, when `start_after` is
    /// non-empty, resumes strictly after it (exclusive lower bound), so a
    /// previously returned key is never reported twice across chained calls.
    #[tracing::instrument(name = "object.list_delimited", skip(self))]
    pub async fn list_delimited(
        &self,
        prefix: &str,
        start_after: &str,
    ) -> StoreResult<DelimitedListing> {
        let path = if prefix.is_empty() {
            None
        } else {
            Some(Path::from(prefix))
        };

        let result = self
            .0
            .list_with_delimiter(path.as_ref())
            .await
            .map_err(|source| StoreError::Iteration {
                prefix: prefix.to_string(),
                source,
            })?;

        Ok(DelimitedListing::merge(result, start_after))
    }
}
