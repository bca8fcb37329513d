use crate::error::{AppError, Result};
use crate::model::ShoppingCartRequest;
use crate::state::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use foodgram_core::shopping::{aggregate_recipes, render_text};
use jiff::Zoned;
use std::collections::HashSet;

const SHOPPING_CART_FILENAME: &str = "shopping_cart.txt";

/// Renders the combined shopping list of the requested recipes as a text
/// attachment. Repeated ids count once.
pub async fn download_shopping_cart_handler(
    State(state): State<AppState>,
    Json(request): Json<ShoppingCartRequest>,
) -> Result<Response> {
    let mut seen = HashSet::new();
    let mut recipes = Vec::with_capacity(request.recipes.len());

    for id in request.recipes {
        if !seen.insert(id) {
            continue;
        }
        let recipe = state
            .catalog()
            .recipe(id)
            .await?
            .ok_or(AppError::RecipeNotFound(id))?;
        recipes.push(recipe);
    }

    let items = aggregate_recipes(&recipes);
    let body = render_text(&items, &recipes, Zoned::now().datetime());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_CART_FILENAME}\""),
            ),
        ],
        body,
    )
        .into_response())
}
