//! Rename via copy-then-delete under a destination-must-not-exist
//! precondition.

use crate::types::{StoreError, StoreResult};

use super::Store;

impl Store {
    /// Move the object at `src_prefix/src_name` to `dst_prefix/dst_name`.
    ///
    /// The backend has no native rename across keys, so the move is a
    /// server-side conditional copy followed by a delete of the source.
    /// Between those two calls both keys briefly hold the object; the window
    /// is inherent to the two-call sequence and is surfaced in the error
    /// taxonomy rather than hidden:
    ///
    /// - [`StoreError::PreconditionFailed`] — the destination already
    ///   exists; nothing changed.
    /// - [`StoreError::Copy`] — the copy failed; nothing changed.
    /// - [`StoreError::DeleteAfterCopy`] — the source delete failed and the
    ///   fresh destination copy was removed again; the source is intact and
    ///   retrying is safe.
    /// - [`StoreError::Compensation`] — the source delete and the
    ///   destination cleanup both failed; the object exists under both keys
    ///   until an operator intervenes.
    ///
    /// No step is retried here: the precondition and the deletes are not
    /// idempotent, and the backend client already retries transient
    /// transport failures internally. A cancellation firing between the two
    /// calls leaves whatever the last completed call produced; compensation
    /// only runs in response to an observed delete failure.
    #[tracing::instrument(name = "store.rename", skip(self))]
    pub async fn rename(
        &self,
        src_prefix: &str,
        src_name: &str,
        dst_prefix: &str,
        dst_name: &str,
    ) -> StoreResult<()> {
        let src = self.join_key(&[src_prefix, src_name]);
        let dst = self.join_key(&[dst_prefix, dst_name]);

        if let Err(err) = self.client().copy_if_absent(&src, &dst).await {
            return Err(match err {
                StoreError::PreconditionFailed { .. } => err,
                other => StoreError::Copy {
                    src,
                    dst,
                    source: Box::new(other),
                },
            });
        }

        let Err(delete_err) = self.client().delete(&src).await else {
            return Ok(());
        };

        tracing::warn!(
            src = %src,
            dst = %dst,
            error = %delete_err,
            "source delete failed after copy, removing destination copy"
        );

        Err(match self.client().delete(&dst).await {
            Ok(()) => StoreError::DeleteAfterCopy {
                src,
                dst,
                source: Box::new(delete_err),
            },
            Err(cleanup_err) => {
                tracing::error!(
                    src = %src,
                    dst = %dst,
                    error = %cleanup_err,
                    "destination cleanup failed, duplicate objects remain"
                );

                StoreError::Compensation {
                    src,
                    dst,
                    delete: Box::new(delete_err),
                    cleanup: Box::new(cleanup_err),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use async_trait::async_trait;
    use bytes::Bytes;
    use futures::stream::BoxStream;
    use object_store::memory::InMemory;
    use object_store::path::Path;
    use object_store::{
        GetOptions, GetResult, ListResult, MultipartUpload, ObjectMeta, ObjectStore,
        PutMultipartOpts, PutOptions, PutPayload, PutResult,
    };

    use crate::client::ObjectClient;

    use super::*;

    #[tokio::test]
    async fn rename_moves_content() {
        let store = Store::new(ObjectClient::new(InMemory::new()), "");
        let content = Bytes::from("second test file");
        store
            .upload("", "file2.txt", content.clone())
            .await
            .unwrap();

        store
            .rename("", "file2.txt", "", "file2-renamed.txt")
            .await
            .unwrap();

        assert!(store.get("", "file2.txt").await.unwrap_err().is_not_found());
        assert_eq!(store.get("", "file2-renamed.txt").await.unwrap(), content);
    }

    #[tokio::test]
    async fn rename_across_prefixes() {
        let store = Store::new(ObjectClient::new(InMemory::new()), "base");
        let content = Bytes::from("payload");
        store.upload("a", "x.txt", content.clone()).await.unwrap();

        store.rename("a", "x.txt", "b", "y.txt").await.unwrap();

        assert!(store.get("a", "x.txt").await.unwrap_err().is_not_found());
        assert_eq!(store.get("b", "y.txt").await.unwrap(), content);
    }

    #[tokio::test]
    async fn rename_onto_existing_destination_fails_cleanly() {
        let store = Store::new(ObjectClient::new(InMemory::new()), "");
        let src_content = Bytes::from("source");
        let dst_content = Bytes::from("destination");
        store.upload("", "old.txt", src_content.clone()).await.unwrap();
        store.upload("", "new.txt", dst_content.clone()).await.unwrap();

        let err = store.rename("", "old.txt", "", "new.txt").await.unwrap_err();

        assert!(err.is_precondition_failed());
        // Neither side was touched.
        assert_eq!(store.get("", "old.txt").await.unwrap(), src_content);
        assert_eq!(store.get("", "new.txt").await.unwrap(), dst_content);
    }

    #[tokio::test]
    async fn rename_missing_source_is_a_copy_failure() {
        let store = Store::new(ObjectClient::new(InMemory::new()), "");

        let err = store.rename("", "ghost.txt", "", "new.txt").await.unwrap_err();

        assert!(matches!(err, StoreError::Copy { .. }));
        assert!(store.get("", "new.txt").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn failed_source_delete_cleans_up_the_destination() {
        let content = Bytes::from("survives");
        let store = failing_store(&["old.txt"]);
        store.upload("", "old.txt", content.clone()).await.unwrap();

        let err = store.rename("", "old.txt", "", "new.txt").await.unwrap_err();

        assert!(matches!(err, StoreError::DeleteAfterCopy { .. }));
        // Source intact, destination removed again: no duplicate.
        assert_eq!(store.get("", "old.txt").await.unwrap(), content);
        assert!(store.get("", "new.txt").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn double_delete_failure_reports_duplicates() {
        let content = Bytes::from("twice");
        let store = failing_store(&["old.txt", "new.txt"]);
        store.upload("", "old.txt", content.clone()).await.unwrap();

        let err = store.rename("", "old.txt", "", "new.txt").await.unwrap_err();

        assert!(matches!(err, StoreError::Compensation { .. }));
        // Terminal duplicate state: both keys hold the content.
        assert_eq!(store.get("", "old.txt").await.unwrap(), content);
        assert_eq!(store.get("", "new.txt").await.unwrap(), content);
    }

    fn failing_store(deny_deletes: &[&str]) -> Store {
        let inner = FailingDeletes {
            inner: InMemory::new(),
            deny: deny_deletes.iter().map(|k| Path::from(*k)).collect(),
        };

        Store::new(ObjectClient::new(inner), "")
    }

    /// In-memory store that fails `delete` for a configured set of keys.
    #[derive(Debug)]
    struct FailingDeletes {
        inner: InMemory,
        deny: Vec<Path>,
    }

    impl fmt::Display for FailingDeletes {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "FailingDeletes({})", self.inner)
        }
    }

    #[async_trait]
    impl ObjectStore for FailingDeletes {
        async fn put_opts(
            &self,
            location: &Path,
            payload: PutPayload,
            opts: PutOptions,
        ) -> object_store::Result<PutResult> {
            self.inner.put_opts(location, payload, opts).await
        }

        async fn put_multipart_opts(
            &self,
            location: &Path,
            opts: PutMultipartOpts,
        ) -> object_store::Result<Box<dyn MultipartUpload>> {
            self.inner.put_multipart_opts(location, opts).await
        }

        async fn get_opts(
            &self,
            location: &Path,
            options: GetOptions,
        ) -> object_store::Result<GetResult> {
            self.inner.get_opts(location, options).await
        }

        async fn delete(&self, location: &Path) -> object_store::Result<()> {
            if self.deny.contains(location) {
                return Err(object_store::Error::Generic {
                    store: "FailingDeletes",
                    source: format!("delete disabled for {location}").into(),
                });
            }
            self.inner.delete(location).await
        }

        fn list(
            &self,
            prefix: Option<&Path>,
        ) -> BoxStream<'static, object_store::Result<ObjectMeta>> {
            self.inner.list(prefix)
        }

        async fn list_with_delimiter(
            &self,
            prefix: Option<&Path>,
        ) -> object_store::Result<ListResult> {
            self.inner.list_with_delimiter(prefix).await
        }

        async fn copy(&self, from: &Path, to: &Path) -> object_store::Result<()> {
            self.inner.copy(from, to).await
        }

        async fn copy_if_not_exists(&self, from: &Path, to: &Path) -> object_store::Result<()> {
            self.inner.copy_if_not_exists(from, to).await
        }
    }
}
