use crate::entity::{Entity, EntityKind};
use serde::{Deserialize, Serialize};

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub ingredient: String,
    pub measurement_unit: String,
    pub amount: u32,
}

/// A published recipe, as seen by the short-link and shopping-list code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    /// Username of the author.
    pub author: String,
    /// Cooking time in minutes.
    pub cooking_time: u32,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Entity for Recipe {
    fn kind(&self) -> EntityKind {
        EntityKind::RECIPE
    }

    fn id(&self) -> u64 {
        self.id
    }
}
