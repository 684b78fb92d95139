#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Client wrapper over [`object_store::ObjectStore`] backends.
pub mod client;
/// Backend selection and client construction.
pub mod config;
/// Directory-style store facade (paginated listing, rename).
pub mod store;
/// Entry, page, and error types.
pub mod types;

#[doc(hidden)]
pub mod prelude;
