use foodgram_core::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[derive(Debug, Clone, Error)]
pub enum GeneratorError {
    #[error("invalid generator settings: {0}")]
    InvalidSettings(String),
    /// Every candidate up to the length cap collided. Fatal for the entity.
    #[error("failed to generate a unique short code for {entity} within {max_length} characters")]
    GenerationExhausted { entity: String, max_length: usize },
    #[error("registry error: {0}")]
    Registry(#[from] StorageError),
}
