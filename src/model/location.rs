use super::entity;
use crate::core::EntityMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    #[default]
    School,
    Clinic,
}

/// A school or community clinic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(flatten)]
    pub meta: EntityMeta,
    pub name: String,
    pub kind: LocationKind,
    /// Unique reference number, schools only.
    pub urn: Option<String>,
    pub address_line_1: Option<String>,
    pub address_town: Option<String>,
    pub address_postcode: Option<String>,
}

entity!(Location, "locations");

impl Location {
    /// Address parts that are present, in postal order.
    pub fn address_lines(&self) -> Vec<&str> {
        [
            self.address_line_1.as_deref(),
            self.address_town.as_deref(),
            self.address_postcode.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|line| !line.trim().is_empty())
        .collect()
    }
}
