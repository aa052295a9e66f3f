pub mod repository;

use tariff_catalog::ModifierError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("No {0} records to choose from")]
    Empty(&'static str),
    #[error("Invalid pricing modifier {id}: {source}")]
    InvalidModifier {
        id: String,
        #[source]
        source: ModifierError,
    },
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
