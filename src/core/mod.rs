pub mod error;
pub mod types;

pub use error::{Result, StoreError};
pub use types::{Document, EntityMeta, document_is_archived, new_token};
