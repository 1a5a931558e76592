use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Entity '{id}' not found in collection '{collection}'")]
    EntityNotFound { collection: String, id: String },

    #[error("Id '{id}' already exists in collection '{collection}'")]
    IdCollision { collection: String, id: String },

    #[error("Field '{field}' cannot be changed by an update")]
    ProtectedField { field: String },

    #[error("Collection '{collection}' does not allow {operation}")]
    DeletePolicy {
        collection: String,
        operation: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Journey '{journey}' has no step '{step}'")]
    UnknownStep { journey: String, step: String },

    #[error("Invalid journey: {0}")]
    InvalidJourney(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::EntityNotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    /// True for the development-time mistakes that must surface loudly.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownStep { .. } | Self::InvalidJourney(_) | Self::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
