mod health;
mod links;
mod shopping;

pub use health::health_handler;
pub use links::{get_link_handler, redirect_handler};
pub use shopping::download_shopping_cart_handler;
