use crate::core::{Document, document_is_archived};
use crate::model::Entity;
use tracing::warn;

/// Read-only view of a store, handed to joins and presenters.
pub trait Repository {
    /// Exact ID lookup; `None` when the collection or record is missing.
    fn find_document(&self, collection: &str, id: &str) -> Option<&Document>;

    /// Every record in a collection in insertion order, archived ones included.
    fn documents(&self, collection: &str) -> Vec<&Document>;
}

/// Typed lookups over any [`Repository`].
pub trait RepositoryExt: Repository {
    fn find<E: Entity>(&self, id: &str) -> Option<E> {
        self.find_document(E::COLLECTION, id)
            .and_then(|doc| decode::<E>(doc))
    }

    /// Non-archived records in insertion order.
    fn all<E: Entity>(&self) -> Vec<E> {
        self.all_where(|_: &E| true)
    }

    fn all_where<E: Entity>(&self, predicate: impl Fn(&E) -> bool) -> Vec<E> {
        self.documents(E::COLLECTION)
            .into_iter()
            .filter(|doc| !document_is_archived(doc))
            .filter_map(|doc| decode::<E>(doc))
            .filter(|entity| predicate(entity))
            .collect()
    }
}

impl<R: Repository + ?Sized> RepositoryExt for R {}

/// Decode a stored record into its typed shape.
///
/// Records that do not fit are logged and treated as absent.
pub fn decode<E: Entity>(doc: &Document) -> Option<E> {
    match serde_json::from_value(serde_json::Value::Object(doc.clone())) {
        Ok(entity) => Some(entity),
        Err(err) => {
            warn!(
                collection = E::COLLECTION,
                id = doc.get("id").and_then(|id| id.as_str()).unwrap_or("<none>"),
                error = %err,
                "record does not decode, treating as missing"
            );
            None
        }
    }
}
