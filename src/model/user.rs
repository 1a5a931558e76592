use super::entity;
use crate::core::EntityMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Nurse,
    HealthcareAssistant,
    Pharmacist,
    MedicalSecretary,
    /// Read-only stakeholder account; never records clinical decisions.
    Consumer,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nurse => "Nurse",
            Self::HealthcareAssistant => "Healthcare assistant",
            Self::Pharmacist => "Pharmacist",
            Self::MedicalSecretary => "Medical secretary",
            Self::Consumer => "Consumer",
        }
    }

    pub fn is_prescriber(&self) -> bool {
        matches!(self, Self::Nurse | Self::Pharmacist)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub team_ids: Vec<String>,
}

entity!(User, "users");

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub clinic_ids: Vec<String>,
    pub school_ids: Vec<String>,
}

entity!(Team, "teams");
