use super::{Cell, Presenter, TableRow, format};
use crate::model::{Location, Session, SessionKind, Team};
use crate::relation::{resolve, resolve_many, sort_by_name};
use crate::store::Repository;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionPresenter {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub address: Vec<String>,
    /// Clinic names, sorted case-insensitively.
    pub clinics: Vec<String>,
    pub dates: Vec<String>,
    pub date_summary: String,
    pub programmes: String,
    pub status: String,
    pub team_name: Option<String>,
}

impl Presenter for SessionPresenter {
    type Source = Session;

    fn present<R: Repository + ?Sized>(session: Session, repo: &R) -> Self {
        let location = resolve::<Location, R>(repo, session.location_id.as_deref());
        let team = resolve::<Team, R>(repo, session.team_id.as_deref());
        let mut clinics = resolve_many::<Location, R>(repo, &session.clinic_ids);
        sort_by_name(&mut clinics, |clinic| clinic.name.as_str());

        let name = match (&location, session.kind) {
            (Some(location), _) => location.name.clone(),
            (None, SessionKind::Clinic) => "Community clinics".to_string(),
            (None, SessionKind::School) => "Unknown school".to_string(),
        };

        let mut dates = session.dates.clone();
        dates.sort();
        dates.dedup();
        let consecutive = dates.windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1]));
        let date_summary = match (dates.first(), dates.last()) {
            (Some(&first), Some(&last)) if dates.len() > 2 && consecutive => {
                format::date_range(first, last)
            }
            (Some(_), Some(_)) => {
                let labels: Vec<String> = dates.iter().map(|d| format::long_date(*d)).collect();
                format::join_list(&labels)
            }
            _ => "No sessions scheduled".to_string(),
        };

        let programmes: Vec<&str> = session.programmes.iter().map(|p| p.label()).collect();

        Self {
            id: session.meta.id.clone(),
            uri: format!("/sessions/{}", session.meta.id),
            name,
            address: location
                .as_ref()
                .map(|l| l.address_lines().into_iter().map(String::from).collect())
                .unwrap_or_default(),
            clinics: clinics.into_iter().map(|clinic| clinic.name).collect(),
            dates: dates.into_iter().map(format::long_date).collect(),
            date_summary,
            programmes: format::join_list(&programmes),
            status: session.status.label().to_string(),
            team_name: team.map(|t| t.name),
        }
    }

    fn table_row(&self) -> TableRow {
        vec![
            Cell::link("Location", self.name.clone(), self.uri.clone()),
            Cell::new("Programmes", self.programmes.clone()),
            Cell::new("Dates", self.date_summary.clone()),
            Cell::new("Status", self.status.clone()),
        ]
    }
}
