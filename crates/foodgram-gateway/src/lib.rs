//! HTTP surface for recipe short links and the shopping-list export.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use error::{AppError, Result};
pub use state::AppState;
