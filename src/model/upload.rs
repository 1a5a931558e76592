use super::entity;
use crate::core::EntityMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    #[default]
    Cohort,
    Vaccinations,
    ClassList,
}

impl UploadKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cohort => "Child records",
            Self::Vaccinations => "Vaccination records",
            Self::ClassList => "Class list",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    #[default]
    Processing,
    /// Processed, but no new records were found.
    Devoid,
    Invalid,
    Accepted,
}

impl UploadStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Processing => "Processing",
            Self::Devoid => "No new records",
            Self::Invalid => "Invalid",
            Self::Accepted => "Completed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Upload {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub kind: UploadKind,
    pub status: UploadStatus,
    /// School the class list belongs to.
    pub location_id: Option<String>,
    pub patient_ids: Vec<String>,
    pub error_count: u32,
}

entity!(Upload, "uploads");
