//! Short links for recipes.
//!
//! This crate assigns short codes to recipes on first request and resolves
//! codes back to recipes. Code generation lives in `foodgram_generator`;
//! storage is reached through the `foodgram_core` registry and catalog traits.

pub mod error;
pub mod floor;
pub mod service;

pub use error::{Result, ShortLinkError};
pub use floor::LengthFloor;
pub use service::{ShortLinkService, ShortLinks};
