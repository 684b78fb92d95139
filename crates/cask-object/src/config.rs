//! Backend selection and client construction.

use serde::{Deserialize, Serialize};

use crate::client::ObjectClient;
use crate::types::StoreResult;

/// Storage backend configuration.
///
/// Cloud variants are gated by cargo features so a deployment only compiles
/// the SDK surface it uses; the in-memory backend is always available for
/// tests and local development.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum StoreConfig {
    /// Amazon S3 or an S3-compatible service (MinIO, ...).
    #[cfg(feature = "s3")]
    #[cfg_attr(docsrs, doc(cfg(feature = "s3")))]
    S3(S3Config),
    /// Google Cloud Storage.
    #[cfg(feature = "gcs")]
    #[cfg_attr(docsrs, doc(cfg(feature = "gcs")))]
    Gcs(GcsConfig),
    /// Process-local in-memory store.
    Memory,
}

impl StoreConfig {
    /// Returns the backend name as a static string.
    pub fn backend_name(&self) -> &'static str {
        match self {
            #[cfg(feature = "s3")]
            Self::S3(_) => "s3",
            #[cfg(feature = "gcs")]
            Self::Gcs(_) => "gcs",
            Self::Memory => "memory",
        }
    }
}

/// Configuration for S3-compatible backends.
#[cfg(feature = "s3")]
#[cfg_attr(docsrs, doc(cfg(feature = "s3")))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Config {
    /// S3 bucket name.
    pub bucket: String,
    /// AWS region (defaults to `us-east-1`).
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint URL (e.g. `http://localhost:9000` for MinIO).
    /// Required for non-AWS S3-compatible services.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Access key ID for static credentials.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key for static credentials.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Session token for temporary credentials.
    #[serde(default)]
    pub session_token: Option<String>,
}

#[cfg(feature = "s3")]
fn default_region() -> String {
    "us-east-1".to_string()
}

/// Configuration for Google Cloud Storage.
#[cfg(feature = "gcs")]
#[cfg_attr(docsrs, doc(cfg(feature = "gcs")))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcsConfig {
    /// GCS bucket name.
    pub bucket: String,
    /// Path to a JSON service account key file. When absent, application
    /// default credentials apply.
    #[serde(default)]
    pub service_account_path: Option<String>,
    /// Custom endpoint URL (for testing with a fake GCS server).
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl ObjectClient {
    /// Build a client for the configured backend.
    ///
    /// Validates credentials and builder inputs only; the first network
    /// round-trip happens on the first operation. The returned handle is
    /// long-lived: create it once at startup and clone it everywhere.
    pub fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let client = match config {
            #[cfg(feature = "s3")]
            StoreConfig::S3(cfg) => {
                use object_store::aws::AmazonS3Builder;

                let mut builder = AmazonS3Builder::new()
                    .with_bucket_name(&cfg.bucket)
                    .with_region(&cfg.region);

                if let Some(endpoint) = &cfg.endpoint {
                    builder = builder.with_endpoint(endpoint);
                    if endpoint.starts_with("http://") {
                        builder = builder.with_allow_http(true);
                    }
                }

                if let Some(access_key) = &cfg.access_key_id {
                    builder = builder.with_access_key_id(access_key);
                }

                if let Some(secret_key) = &cfg.secret_access_key {
                    builder = builder.with_secret_access_key(secret_key);
                }

                if let Some(token) = &cfg.session_token {
                    builder = builder.with_token(token);
                }

                Self::new(builder.build()?)
            }

            #[cfg(feature = "gcs")]
            StoreConfig::Gcs(cfg) => {
                use object_store::gcp::GoogleCloudStorageBuilder;

                let mut builder =
                    GoogleCloudStorageBuilder::new().with_bucket_name(&cfg.bucket);

                if let Some(key_path) = &cfg.service_account_path {
                    builder = builder.with_service_account_path(key_path);
                }

                if let Some(endpoint) = &cfg.endpoint {
                    builder = builder.with_url(endpoint);
                }

                Self::new(builder.build()?)
            }

            StoreConfig::Memory => Self::new(object_store::memory::InMemory::new()),
        };

        tracing::info!(
            backend = config.backend_name(),
            "object storage client initialized"
        );

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_connects() {
        let client = ObjectClient::connect(&StoreConfig::Memory);
        assert!(client.is_ok());
    }

    #[test]
    fn config_round_trips_through_serde() {
        let json = serde_json::json!({ "type": "memory" });
        let config: StoreConfig = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(config, StoreConfig::Memory);
        assert_eq!(serde_json::to_value(&config).unwrap(), json);
    }
}
