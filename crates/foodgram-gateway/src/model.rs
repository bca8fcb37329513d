use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GetLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

/// Recipes to put on the shopping list, by id.
#[derive(Debug, Deserialize)]
pub struct ShoppingCartRequest {
    pub recipes: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errors: String,
}
