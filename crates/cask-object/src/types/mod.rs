//! Types shared across the store surface.

pub mod entry;
pub mod error;
pub mod page;

pub use entry::ObjectEntry;
pub use error::{StoreError, StoreResult};
pub use page::Page;
