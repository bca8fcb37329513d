use crate::entity::EntityKind;
use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// A read-only view of the code registry.
///
/// Codes are namespaced by [`EntityKind`]: the same code may be held by a
/// recipe and by an entity of another type at the same time.
#[async_trait]
pub trait ReadRegistry: Send + Sync + 'static {
    /// Checks whether any entity of `kind` already holds `code`.
    async fn exists(&self, kind: EntityKind, code: &ShortCode) -> Result<bool>;

    /// Returns the id of the entity of `kind` holding `code`, if any.
    async fn resolve(&self, kind: EntityKind, code: &ShortCode) -> Result<Option<u64>>;

    /// Returns the code assigned to the entity, if one was assigned.
    async fn code_of(&self, kind: EntityKind, id: u64) -> Result<Option<ShortCode>>;
}

#[async_trait]
pub trait CodeRegistry: ReadRegistry {
    /// Assigns `code` to the entity.
    ///
    /// Returns `Err(Conflict)` if another entity of the same kind holds the
    /// code, and `Err(AlreadyAssigned)` if the entity already has a code.
    /// Both checks and the write happen atomically in the backend.
    async fn persist(&self, kind: EntityKind, id: u64, code: &ShortCode) -> Result<()>;
}
