use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use foodgram_core::{
    CodeRegistry, EntityKind, ReadRegistry, Recipe, RecipeCatalog, Result, ShortCode, StorageError,
};
use std::path::Path;
use tracing::debug;

/// In-memory code registry backed by two DashMaps.
///
/// `persist` holds the entity entry, then the code entry, so the
/// "entity has no code yet" and "code is free" checks and both writes happen
/// under the same pair of shard locks. Every writer takes them in that order.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    codes: DashMap<(EntityKind, ShortCode), u64>,
    assigned: DashMap<(EntityKind, u64), ShortCode>,
}

impl InMemoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with room for `capacity` codes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            codes: DashMap::with_capacity(capacity),
            assigned: DashMap::with_capacity(capacity),
        }
    }

    /// Number of codes held across all entity kinds.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[async_trait]
impl ReadRegistry for InMemoryRegistry {
    async fn exists(&self, kind: EntityKind, code: &ShortCode) -> Result<bool> {
        Ok(self.codes.contains_key(&(kind, code.clone())))
    }

    async fn resolve(&self, kind: EntityKind, code: &ShortCode) -> Result<Option<u64>> {
        Ok(self.codes.get(&(kind, code.clone())).map(|id| *id))
    }

    async fn code_of(&self, kind: EntityKind, id: u64) -> Result<Option<ShortCode>> {
        Ok(self.assigned.get(&(kind, id)).map(|code| code.clone()))
    }
}

#[async_trait]
impl CodeRegistry for InMemoryRegistry {
    async fn persist(&self, kind: EntityKind, id: u64, code: &ShortCode) -> Result<()> {
        let slot = match self.assigned.entry((kind, id)) {
            Entry::Occupied(existing) => {
                return Err(StorageError::AlreadyAssigned {
                    kind: kind.to_string(),
                    id,
                    code: existing.get().to_string(),
                })
            }
            Entry::Vacant(slot) => slot,
        };

        match self.codes.entry((kind, code.clone())) {
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
            Entry::Vacant(free) => {
                free.insert(id);
                slot.insert(code.clone());
                debug!(%kind, id, %code, "short code assigned");
                Ok(())
            }
        }
    }
}

/// In-memory recipe catalog, usually loaded from a JSON fixture.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    recipes: DashMap<u64, Recipe>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let catalog = Self::new();
        for recipe in recipes {
            catalog.insert(recipe);
        }
        catalog
    }

    /// Parses a JSON array of recipes.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)
            .map_err(|e| StorageError::InvalidData(format!("invalid recipe fixture: {e}")))?;
        Ok(Self::from_recipes(recipes))
    }

    /// Reads and parses a JSON array of recipes from `path`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            StorageError::Unavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Inserts or replaces a recipe.
    pub fn insert(&self, recipe: Recipe) {
        self.recipes.insert(recipe.id, recipe);
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[async_trait]
impl RecipeCatalog for InMemoryCatalog {
    async fn recipe(&self, id: u64) -> Result<Option<Recipe>> {
        Ok(self.recipes.get(&id).map(|recipe| recipe.clone()))
    }
}
