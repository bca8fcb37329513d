use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    download_shopping_cart_handler, get_link_handler, health_handler, redirect_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/s/{code}/", get(redirect_handler))
            .nest(
                "/api/recipes",
                Router::new()
                    .route("/{id}/get-link/", get(get_link_handler))
                    .route(
                        "/download_shopping_cart/",
                        post(download_shopping_cart_handler),
                    ),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
