use super::{DeletePolicy, Programme, entity};
use crate::core::EntityMeta;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    #[default]
    School,
    Clinic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Unplanned,
    Planned,
    Completed,
    Closed,
}

impl SessionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unplanned => "No sessions scheduled",
            Self::Planned => "Sessions scheduled",
            Self::Completed => "All sessions completed",
            Self::Closed => "Closed",
        }
    }
}

/// A vaccination session at a school, or a run of community clinics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub kind: SessionKind,
    pub location_id: Option<String>,
    pub team_id: Option<String>,
    pub clinic_ids: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub programmes: Vec<Programme>,
    pub status: SessionStatus,
}

entity!(Session, "sessions");

impl Session {
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.iter().min().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.iter().max().copied()
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Present,
    Absent,
}

/// Attendance join record between a patient and a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Registration {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub patient_id: String,
    pub session_id: String,
    pub status: RegistrationStatus,
}

entity!(Registration, "registrations", DeletePolicy::Remove);

/// Patient specific direction allowing a non-prescriber to vaccinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instruction {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub patient_id: String,
    pub programme: Programme,
    pub session_id: Option<String>,
}

entity!(Instruction, "instructions");

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_session_dates() {
        let session = Session {
            dates: vec![date(15), date(1), date(29)],
            ..Session::default()
        };
        assert_eq!(session.first_date(), Some(date(1)));
        assert_eq!(session.last_date(), Some(date(29)));
        assert!(session.is_active_on(date(15)));
        assert!(!session.is_active_on(date(14)));
        assert_eq!(Session::default().first_date(), None);
    }
}
