//! Domain entities.
//!
//! Every entity is a plain data struct with [`EntityMeta`] flattened into it.
//! The store owns the records; derived display values live in
//! [`crate::presenter`], joins in [`crate::relation`].

use crate::core::EntityMeta;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub mod location;
pub mod patient;
pub mod record;
pub mod session;
pub mod upload;
pub mod user;

pub use location::{Location, LocationKind};
pub use patient::{Gender, Move, MoveSource, Notice, NoticeKind, Patient};
pub use record::{
    InjectionSite, Reply, ReplyDecision, Triage, TriageOutcome, Vaccination, VaccinationOutcome,
};
pub use session::{
    Instruction, Registration, RegistrationStatus, Session, SessionKind, SessionStatus,
};
pub use upload::{Upload, UploadKind, UploadStatus};
pub use user::{Team, User, UserRole};

/// How an entity type leaves its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Soft delete: `archived_at` is set and the record stays retrievable by ID.
    Archive,
    /// Hard delete: the record is dropped from the collection.
    Remove,
}

impl DeletePolicy {
    pub fn operation_name(&self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Remove => "delete",
        }
    }
}

/// A typed record stored in a named collection.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// Name of the collection holding this type.
    const COLLECTION: &'static str;
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Archive;

    fn meta(&self) -> &EntityMeta;
    fn meta_mut(&mut self) -> &mut EntityMeta;

    fn id(&self) -> &str {
        &self.meta().id
    }

    fn is_archived(&self) -> bool {
        self.meta().is_archived()
    }
}

macro_rules! entity {
    ($ty:ty, $collection:literal) => {
        entity!($ty, $collection, $crate::model::DeletePolicy::Archive);
    };
    ($ty:ty, $collection:literal, $policy:expr) => {
        impl $crate::model::Entity for $ty {
            const COLLECTION: &'static str = $collection;
            const DELETE_POLICY: $crate::model::DeletePolicy = $policy;

            fn meta(&self) -> &$crate::core::EntityMeta {
                &self.meta
            }

            fn meta_mut(&mut self) -> &mut $crate::core::EntityMeta {
                &mut self.meta
            }
        }
    };
}

pub(crate) use entity;

/// Vaccination programme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Programme {
    #[default]
    Flu,
    Hpv,
    MenAcwy,
    TdIpv,
}

impl Programme {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Flu => "Flu",
            Self::Hpv => "HPV",
            Self::MenAcwy => "MenACWY",
            Self::TdIpv => "Td/IPV",
        }
    }

    /// Programmes given as a nasal spray may be administered by a healthcare assistant.
    pub fn allows_healthcare_assistant(&self) -> bool {
        matches!(self, Self::Flu)
    }
}
