use std::fmt::Display;

/// Name of a persisted entity type.
///
/// The name is mixed into every generated code and namespaces the code
/// registry, so two entity types may hold the same code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKind(&'static str);

impl EntityKind {
    pub const RECIPE: EntityKind = EntityKind("Recipe");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Anything that can carry a short code: a type name plus a stable id.
pub trait Entity {
    fn kind(&self) -> EntityKind;

    fn id(&self) -> u64;
}

/// A bare `(kind, id)` pair, for callers that do not hold the full record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: u64,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: u64) -> Self {
        Self { kind, id }
    }

    pub fn recipe(id: u64) -> Self {
        Self::new(EntityKind::RECIPE, id)
    }
}

impl Entity for EntityRef {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn id(&self) -> u64 {
        self.id
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}
