use crate::core::{Result, StoreError};

/// Per-request store configuration
///
/// Built fresh alongside each store; nothing here is shared between sessions.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Length of generated entity IDs
    pub id_length: usize,

    /// Default number of rows per listing page
    pub page_size: usize,

    /// Pages shown either side of the current page in pagination links
    pub pagination_window: usize,

    /// User recorded in the `*_by_uid` audit fields
    pub actor_uid: Option<String>,
}

impl StoreConfig {
    pub const MIN_ID_LENGTH: usize = 6;
    pub const MAX_ID_LENGTH: usize = 32;

    /// Create a configuration with the default settings
    pub fn new() -> Self {
        Self {
            id_length: 8,
            page_size: 50,
            pagination_window: 1,
            actor_uid: None,
        }
    }

    /// Set the generated ID length
    pub fn id_length(mut self, length: usize) -> Self {
        self.id_length = length;
        self
    }

    /// Set the default page size
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the pagination window
    pub fn pagination_window(mut self, window: usize) -> Self {
        self.pagination_window = window;
        self
    }

    /// Set the acting user
    pub fn actor(mut self, uid: &str) -> Self {
        self.actor_uid = Some(uid.to_string());
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(Self::MIN_ID_LENGTH..=Self::MAX_ID_LENGTH).contains(&self.id_length) {
            return Err(StoreError::InvalidConfig(format!(
                "id_length must be between {} and {}, got {}",
                Self::MIN_ID_LENGTH,
                Self::MAX_ID_LENGTH,
                self.id_length
            )));
        }

        if self.page_size == 0 {
            return Err(StoreError::InvalidConfig(
                "page_size must be > 0".to_string(),
            ));
        }

        if matches!(self.actor_uid.as_deref(), Some("")) {
            return Err(StoreError::InvalidConfig(
                "actor uid cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
