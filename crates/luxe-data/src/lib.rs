//! External collaborator layer for the LUXE storefront.
//!
//! The storefront delegates persistence, identity, file storage, and
//! signed URLs to a hosted backend service. This crate models that
//! collaborator as three async traits plus an in-memory backend:
//!
//! - [`DataClient`]: record insert/select/update/delete by collection
//!   name with equality/ordering filters
//! - [`FileClient`]: file upload returning a storage path, and signed,
//!   time-limited URL generation for private files
//! - [`IdentityClient`]: session-based current-user identity
//!
//! The contract is intentionally thin: structured records in, records or
//! an error out. The wire format belongs to the external service.
//!
//! # Example
//!
//! ```rust,ignore
//! use luxe_data::prelude::*;
//! use serde_json::json;
//!
//! let backend = MemoryBackend::new();
//! backend.insert("products", json!({"name": "Scarf"})).await?;
//! let rows = backend.select("products", Select::new()).await?;
//! assert_eq!(rows.len(), 1);
//! ```

mod client;
mod error;
mod files;
mod memory;
mod query;
mod session;

pub use client::{DataClient, DataClientExt};
pub use error::DataError;
pub use files::{FileClient, UploadOptions};
pub use memory::MemoryBackend;
pub use query::{Direction, Filter, Select};
pub use session::{IdentityClient, SessionUser};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        DataClient, DataClientExt, DataError, Direction, FileClient, Filter, IdentityClient,
        MemoryBackend, Select, SessionUser, UploadOptions,
    };
}
