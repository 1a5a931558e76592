//! Clinical records written by the consent, triage and vaccination journeys.

use super::{Programme, entity};
use crate::core::EntityMeta;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyDecision {
    Given,
    Refused,
    #[default]
    NoResponse,
}

impl ReplyDecision {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Given => "Consent given",
            Self::Refused => "Consent refused",
            Self::NoResponse => "No response",
        }
    }
}

/// A parent or guardian's consent response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reply {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub patient_id: String,
    pub session_id: Option<String>,
    pub programme: Programme,
    pub parent_full_name: Option<String>,
    pub relationship: Option<String>,
    pub decision: ReplyDecision,
    pub refusal_reason: Option<String>,
    /// Answers to the health questions, in question order.
    pub health_answers: Vec<String>,
}

entity!(Reply, "replies");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageOutcome {
    #[default]
    Needed,
    SafeToVaccinate,
    DoNotVaccinate,
    DelayVaccination,
}

impl TriageOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Needed => "Needs triage",
            Self::SafeToVaccinate => "Safe to vaccinate",
            Self::DoNotVaccinate => "Do not vaccinate in programme",
            Self::DelayVaccination => "Delay vaccination to a later date",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Triage {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub patient_id: String,
    pub programme: Programme,
    pub outcome: TriageOutcome,
    pub notes: Option<String>,
}

entity!(Triage, "triages");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaccinationOutcome {
    #[default]
    Vaccinated,
    PartVaccinated,
    AlreadyVaccinated,
    Contraindications,
    Refused,
    AbsentSchool,
    Unwell,
}

impl VaccinationOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vaccinated => "Vaccinated",
            Self::PartVaccinated => "Partially vaccinated",
            Self::AlreadyVaccinated => "Already had the vaccine",
            Self::Contraindications => "Had contraindications",
            Self::Refused => "Refused vaccine",
            Self::AbsentSchool => "Absent from school",
            Self::Unwell => "Unwell",
        }
    }

    /// Whether a dose was given, fully or in part.
    pub fn is_given(&self) -> bool {
        matches!(self, Self::Vaccinated | Self::PartVaccinated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionSite {
    Nose,
    ArmLeftUpper,
    ArmRightUpper,
    Other,
}

impl InjectionSite {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nose => "Nose",
            Self::ArmLeftUpper => "Left arm (upper position)",
            Self::ArmRightUpper => "Right arm (upper position)",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vaccination {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub patient_id: String,
    pub session_id: Option<String>,
    pub programme: Programme,
    pub outcome: VaccinationOutcome,
    pub given_at: Option<DateTime<Utc>>,
    pub batch_id: Option<String>,
    pub site: Option<InjectionSite>,
    pub notes: Option<String>,
}

entity!(Vaccination, "vaccinations");
