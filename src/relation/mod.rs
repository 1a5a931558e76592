//! Foreign-key resolution.
//!
//! Joins take the repository as a parameter and never hold on to it. A key
//! that points nowhere resolves to `None` (or is dropped from a list) and is
//! logged; it is never an error, because seed data is routinely incomplete.

use crate::core::{Document, document_is_archived};
use crate::model::Entity;
use crate::store::{Repository, decode};
use serde_json::Value;
use std::cmp::Ordering;
use tracing::warn;

/// Resolve the single key held in `source[field]` against `target`.
pub fn resolve_field<'a, R: Repository + ?Sized>(
    repo: &'a R,
    source: &Document,
    field: &str,
    target: &str,
) -> Option<&'a Document> {
    let id = source.get(field).and_then(Value::as_str)?;
    lookup(repo, target, field, id)
}

/// Resolve the list of keys held in `source[field]`, in declared order.
pub fn resolve_field_many<'a, R: Repository + ?Sized>(
    repo: &'a R,
    source: &Document,
    field: &str,
    target: &str,
) -> Vec<&'a Document> {
    let Some(Value::Array(ids)) = source.get(field) else {
        return Vec::new();
    };
    ids.iter()
        .filter_map(Value::as_str)
        .filter_map(|id| lookup(repo, target, field, id))
        .collect()
}

/// Typed single join: `patient.school_id` → `Location`.
pub fn resolve<T: Entity, R: Repository + ?Sized>(repo: &R, id: Option<&str>) -> Option<T> {
    let id = id.filter(|id| !id.is_empty())?;
    match repo.find_document(T::COLLECTION, id) {
        Some(doc) => decode::<T>(doc),
        None => {
            warn!(collection = T::COLLECTION, id = %id, "dangling reference");
            None
        }
    }
}

/// Typed plural join: `team.clinic_ids` → `Vec<Location>`.
///
/// Unresolvable IDs are dropped; the rest keep the order the IDs were declared in.
pub fn resolve_many<T: Entity, R: Repository + ?Sized>(repo: &R, ids: &[String]) -> Vec<T> {
    ids.iter()
        .filter_map(|id| resolve::<T, R>(repo, Some(id.as_str())))
        .collect()
}

/// Non-archived records of `T` whose `field` holds `id`, either as the
/// value itself or as a member of a list.
pub fn referencing<T: Entity, R: Repository + ?Sized>(repo: &R, field: &str, id: &str) -> Vec<T> {
    repo.documents(T::COLLECTION)
        .into_iter()
        .filter(|doc| !document_is_archived(doc))
        .filter(|doc| holds_key(doc.get(field), id))
        .filter_map(|doc| decode::<T>(doc))
        .collect()
}

/// Stable, case-insensitive sort by a display field.
pub fn sort_by_name<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| compare_case_insensitive(key(a), key(b)));
}

pub fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn lookup<'a, R: Repository + ?Sized>(
    repo: &'a R,
    target: &str,
    field: &str,
    id: &str,
) -> Option<&'a Document> {
    let found = repo.find_document(target, id);
    if found.is_none() {
        warn!(collection = target, field, id = %id, "dangling reference");
    }
    found
}

fn holds_key(value: Option<&Value>, id: &str) -> bool {
    match value {
        Some(Value::String(value)) => value == id,
        Some(Value::Array(values)) => values.iter().any(|v| v.as_str() == Some(id)),
        _ => false,
    }
}
