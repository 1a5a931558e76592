// ============================================================================
// Casebook Library
// ============================================================================
//
// Session-scoped case store: typed entities over an in-memory document
// store, lazy foreign-key joins, display presenters, journey routing and
// pagination. Everything here is synchronous and owned by one request.

pub mod core;
pub mod journey;
pub mod model;
pub mod pagination;
pub mod prelude;
pub mod presenter;
pub mod relation;
pub mod store;

pub use crate::core::{Document, EntityMeta, Result, StoreError};
pub use journey::{JourneyMap, JourneyPaths};
pub use model::{DeletePolicy, Entity};
pub use pagination::{PageLinks, Results, page_links, paginate};
pub use presenter::Presenter;
pub use store::{FindOptions, Patch, Repository, RepositoryExt, Store, StoreConfig};
