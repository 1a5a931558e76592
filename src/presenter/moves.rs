use super::{Cell, Presenter, TableRow, format};
use crate::model::{Location, Move, Patient};
use crate::relation::resolve;
use crate::store::Repository;
use serde::Serialize;

const UNKNOWN_SCHOOL: &str = "Unknown school";

/// A pending school move, with both ends resolved to names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovePresenter {
    pub id: String,
    pub uri: String,
    pub patient_name: Option<String>,
    pub patient_uri: String,
    pub from_name: String,
    pub to_name: String,
    pub source: String,
    pub created: Option<String>,
    /// Two lines: `Moved from …` then `to …`.
    pub summary: String,
}

impl Presenter for MovePresenter {
    type Source = Move;

    fn present<R: Repository + ?Sized>(record: Move, repo: &R) -> Self {
        let patient = resolve::<Patient, R>(repo, Some(record.patient_id.as_str()));
        let from = resolve::<Location, R>(repo, record.from_location_id.as_deref());
        let to = resolve::<Location, R>(repo, record.to_location_id.as_deref());
        let from_name = from.map_or_else(|| UNKNOWN_SCHOOL.to_string(), |l| l.name);
        let to_name = to.map_or_else(|| UNKNOWN_SCHOOL.to_string(), |l| l.name);

        Self {
            id: record.meta.id.clone(),
            uri: format!("/moves/{}", record.meta.id),
            patient_name: patient.map(|p| p.full_name()),
            patient_uri: format!("/patients/{}", record.patient_id),
            summary: format!("Moved from {}\nto {}", from_name, to_name),
            from_name,
            to_name,
            source: record.source.label().to_string(),
            created: record.meta.created_at.map(|at| format::long_date(at.date_naive())),
        }
    }

    fn table_row(&self) -> TableRow {
        vec![
            Cell::new("Updated", self.created.clone().unwrap_or_default()),
            Cell::link(
                "Child",
                self.patient_name.clone().unwrap_or_else(|| "Unknown child".to_string()),
                self.patient_uri.clone(),
            ),
            Cell::new("Move", self.summary.clone()),
            Cell::new("Source", self.source.clone()),
        ]
    }
}
