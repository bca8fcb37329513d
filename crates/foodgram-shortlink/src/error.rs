use foodgram_core::StorageError;
use foodgram_generator::GeneratorError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShortLinkError>;

#[derive(Debug, Clone, Error)]
pub enum ShortLinkError {
    #[error("recipe {0} not found")]
    RecipeNotFound(u64),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
