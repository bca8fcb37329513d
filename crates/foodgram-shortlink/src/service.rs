use crate::error::{Result, ShortLinkError};
use crate::floor::LengthFloor;
use async_trait::async_trait;
use foodgram_core::{CodeRegistry, EntityKind, RecipeCatalog, ShortCode};
use foodgram_generator::{Assignment, ShortCodeGenerator};
use std::sync::Arc;
use tracing::{debug, info, trace};

#[async_trait]
pub trait ShortLinks: Send + Sync + 'static {
    /// Returns the recipe's short code, assigning one on first request.
    async fn get_link(&self, recipe_id: u64) -> Result<ShortCode>;

    /// Returns the id of the recipe holding `code`, if any.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<u64>>;
}

/// A concrete implementation of the `ShortLinks` trait.
///
/// Codes are assigned lazily: the first `get_link` for a recipe generates a
/// code and persists it, later calls read it back. The registry's uniqueness
/// constraints decide collisions, so two requests racing for the same recipe
/// or the same code cannot both win.
#[derive(Debug)]
pub struct ShortLinkService<R, C> {
    registry: Arc<R>,
    catalog: Arc<C>,
    generator: Arc<ShortCodeGenerator>,
    floor: Arc<LengthFloor>,
}

impl<R, C> Clone for ShortLinkService<R, C> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            catalog: Arc::clone(&self.catalog),
            generator: Arc::clone(&self.generator),
            floor: Arc::clone(&self.floor),
        }
    }
}

impl<R: CodeRegistry, C: RecipeCatalog> ShortLinkService<R, C> {
    pub fn new(registry: R, catalog: C, generator: ShortCodeGenerator) -> Self {
        Self::from_shared(Arc::new(registry), Arc::new(catalog), generator)
    }

    /// Creates a service over registry and catalog handles shared with other
    /// components.
    pub fn from_shared(registry: Arc<R>, catalog: Arc<C>, generator: ShortCodeGenerator) -> Self {
        let floor = LengthFloor::new(generator.min_length());
        Self {
            registry,
            catalog,
            generator: Arc::new(generator),
            floor: Arc::new(floor),
        }
    }

    /// Current starting length for new codes.
    pub fn length_floor(&self) -> usize {
        self.floor.get()
    }
}

#[async_trait]
impl<R: CodeRegistry, C: RecipeCatalog> ShortLinks for ShortLinkService<R, C> {
    async fn get_link(&self, recipe_id: u64) -> Result<ShortCode> {
        let recipe = self
            .catalog
            .recipe(recipe_id)
            .await?
            .ok_or(ShortLinkError::RecipeNotFound(recipe_id))?;

        if let Some(code) = self.registry.code_of(EntityKind::RECIPE, recipe_id).await? {
            trace!(recipe_id, %code, "recipe already has a short code");
            return Ok(code);
        }

        let length = self.floor.get();
        let assignment = self
            .generator
            .assign_unique_code(&recipe, self.registry.as_ref(), length, 0)
            .await?;

        match assignment {
            Assignment::Assigned(generated) => {
                if self.floor.raise(generated.length) {
                    info!(length = generated.length, "short code length floor raised");
                }
                debug!(recipe_id, code = %generated.code, seed = generated.seed, "short code assigned");
                Ok(generated.code)
            }
            Assignment::Existing(code) => Ok(code),
        }
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<u64>> {
        let recipe_id = self.registry.resolve(EntityKind::RECIPE, code).await?;
        trace!(%code, ?recipe_id, "resolved short code");
        Ok(recipe_id)
    }
}
