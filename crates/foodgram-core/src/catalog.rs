use crate::error::Result;
use crate::recipe::Recipe;
use async_trait::async_trait;

/// Read access to published recipes.
#[async_trait]
pub trait RecipeCatalog: Send + Sync + 'static {
    /// Returns the recipe with the given id, or `None` if it does not exist.
    async fn recipe(&self, id: u64) -> Result<Option<Recipe>>;
}
