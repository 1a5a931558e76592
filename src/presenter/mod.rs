//! Read-only display projections.
//!
//! A presenter is built once from an entity plus whatever it joins in, and
//! never touches the store again. Field names of the serialized output are
//! what templates bind to, so they are kept stable.

use crate::model::Entity;
use crate::store::{Repository, RepositoryExt};
use serde::Serialize;

pub mod format;
pub mod moves;
pub mod patient;
pub mod session;
pub mod upload;
pub mod user;

pub use moves::MovePresenter;
pub use patient::{NoticePresenter, PatientPresenter};
pub use session::SessionPresenter;
pub use upload::UploadPresenter;
pub use user::UserPresenter;

/// One labelled cell of a table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Cell {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            href: None,
        }
    }

    pub fn link(label: &str, value: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::new(label, value)
        }
    }
}

pub type TableRow = Vec<Cell>;

/// Placeholder shown for absent optional values.
pub const NOT_PROVIDED: &str = "Not provided";

pub trait Presenter: Sized + Serialize {
    type Source: Entity;

    /// Project one entity, resolving the joins it needs from `repo`.
    fn present<R: Repository + ?Sized>(source: Self::Source, repo: &R) -> Self;

    fn table_row(&self) -> TableRow;

    fn for_one<R: Repository + ?Sized>(id: &str, repo: &R) -> Option<Self> {
        repo.find::<Self::Source>(id)
            .map(|source| Self::present(source, repo))
    }

    /// Every non-archived entity of the source collection, in insertion order.
    fn for_all<R: Repository + ?Sized>(repo: &R) -> Vec<Self> {
        repo.all::<Self::Source>()
            .into_iter()
            .map(|source| Self::present(source, repo))
            .collect()
    }
}

/// Table rows for a list of presenters, in order.
pub fn table_rows<P: Presenter>(items: &[P]) -> Vec<TableRow> {
    items.iter().map(Presenter::table_row).collect()
}
