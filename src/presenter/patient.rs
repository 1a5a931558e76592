use super::{Cell, NOT_PROVIDED, Presenter, TableRow, format};
use crate::model::{Location, Move, Notice, Patient, Team};
use crate::relation::{referencing, resolve};
use crate::store::Repository;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientPresenter {
    pub id: String,
    pub uri: String,
    pub full_name: String,
    pub sortable_name: String,
    pub preferred_first_name: Option<String>,
    pub nhsn: String,
    pub dob: String,
    #[serde(skip)]
    pub dob_date: Option<NaiveDate>,
    pub gender: String,
    pub year_group: Option<String>,
    pub postcode: String,
    pub school_name: Option<String>,
    pub school_uri: Option<String>,
    pub team_name: Option<String>,
    pub notices: Vec<String>,
    pub has_pending_move: bool,
}

impl Presenter for PatientPresenter {
    type Source = Patient;

    fn present<R: Repository + ?Sized>(patient: Patient, repo: &R) -> Self {
        let school = resolve::<Location, R>(repo, patient.school_id.as_deref());
        let team = resolve::<Team, R>(repo, patient.team_id.as_deref());
        let notices = referencing::<Notice, R>(repo, "patient_id", &patient.meta.id);
        let moves = referencing::<Move, R>(repo, "patient_id", &patient.meta.id);

        Self {
            id: patient.meta.id.clone(),
            uri: format!("/patients/{}", patient.meta.id),
            full_name: patient.full_name(),
            sortable_name: patient.sortable_name(),
            preferred_first_name: patient.preferred_first_name.clone(),
            nhsn: patient
                .nhsn
                .as_deref()
                .map(format::nhs_number)
                .unwrap_or_else(|| NOT_PROVIDED.to_string()),
            dob: patient
                .dob
                .map(format::long_date)
                .unwrap_or_else(|| NOT_PROVIDED.to_string()),
            dob_date: patient.dob,
            gender: patient.gender.label().to_string(),
            year_group: patient.year_group.map(|year| format!("Year {}", year)),
            postcode: patient
                .address_postcode
                .clone()
                .unwrap_or_else(|| NOT_PROVIDED.to_string()),
            school_uri: school.as_ref().map(|s| format!("/schools/{}", s.meta.id)),
            school_name: school.map(|s| s.name),
            team_name: team.map(|t| t.name),
            notices: notices.iter().map(|n| n.kind.label().to_string()).collect(),
            has_pending_move: !moves.is_empty(),
        }
    }

    fn table_row(&self) -> TableRow {
        vec![
            Cell::link("Name", self.sortable_name.clone(), self.uri.clone()),
            Cell::new("NHS number", self.nhsn.clone()),
            Cell::new("Date of birth", self.dob.clone()),
            Cell::new("Year group", self.year_group.clone().unwrap_or_default()),
            Cell::new(
                "School",
                self.school_name.clone().unwrap_or_else(|| "Unknown school".to_string()),
            ),
        ]
    }
}

impl PatientPresenter {
    /// Age in whole years on `today`; `None` without a date of birth.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.dob_date.map(|dob| format::age_in_years(dob, today))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoticePresenter {
    pub id: String,
    pub kind: String,
    pub date: Option<String>,
    pub note: Option<String>,
    pub patient_name: Option<String>,
    pub patient_uri: String,
}

impl Presenter for NoticePresenter {
    type Source = Notice;

    fn present<R: Repository + ?Sized>(notice: Notice, repo: &R) -> Self {
        let patient = resolve::<Patient, R>(repo, Some(notice.patient_id.as_str()));
        Self {
            id: notice.meta.id.clone(),
            kind: notice.kind.label().to_string(),
            date: notice.meta.created_at.map(|at| format::long_date(at.date_naive())),
            note: notice.note.clone(),
            patient_name: patient.map(|p| p.full_name()),
            patient_uri: format!("/patients/{}", notice.patient_id),
        }
    }

    fn table_row(&self) -> TableRow {
        vec![
            Cell::new("Date", self.date.clone().unwrap_or_default()),
            Cell::link(
                "Child",
                self.patient_name.clone().unwrap_or_else(|| "Unknown child".to_string()),
                self.patient_uri.clone(),
            ),
            Cell::new("Notice", self.kind.clone()),
        ]
    }
}
