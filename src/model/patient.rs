use super::{DeletePolicy, entity};
use crate::core::EntityMeta;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    #[default]
    NotKnown,
    NotSpecified,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
            Self::NotKnown => "Not known",
            Self::NotSpecified => "Not specified",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    #[serde(flatten)]
    pub meta: EntityMeta,
    /// NHS number, ten digits without spacing.
    pub nhsn: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub preferred_first_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Gender,
    pub address_postcode: Option<String>,
    pub school_id: Option<String>,
    pub team_id: Option<String>,
    pub year_group: Option<u8>,
}

entity!(Patient, "patients");

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Surname-first form used in sortable lists.
    pub fn sortable_name(&self) -> String {
        format!("{}, {}", self.last_name.to_uppercase(), self.first_name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveSource {
    #[default]
    Cohort,
    School,
    Sais,
}

impl MoveSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cohort => "Cohort record",
            Self::School => "Class list",
            Self::Sais => "SAIS team",
        }
    }
}

/// A reported change of school awaiting review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Move {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub patient_id: String,
    pub from_location_id: Option<String>,
    pub to_location_id: Option<String>,
    pub source: MoveSource,
}

entity!(Move, "moves");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Deceased,
    #[default]
    Invalid,
    Sensitive,
    HiddenConsent,
}

impl NoticeKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deceased => "Record updated with child’s date of death",
            Self::Invalid => "Record flagged as invalid",
            Self::Sensitive => "Record flagged as sensitive",
            Self::HiddenConsent => "Child gave consent for HPV vaccination under Gillick competence",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notice {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub patient_id: String,
    pub kind: NoticeKind,
    pub note: Option<String>,
}

entity!(Notice, "notices", DeletePolicy::Archive);
