//! Core types and traits for the Foodgram short-link service.
//!
//! This crate provides the types shared by the code generator, the storage
//! backends, the short-link service and the HTTP gateway.

pub mod catalog;
pub mod entity;
pub mod error;
pub mod recipe;
pub mod registry;
pub mod shopping;
pub mod shortcode;

pub use catalog::RecipeCatalog;
pub use entity::{Entity, EntityKind, EntityRef};
pub use error::{CoreError, Result, StorageError};
pub use recipe::{Component, Recipe};
pub use registry::{CodeRegistry, ReadRegistry};
pub use shopping::ShoppingItem;
pub use shortcode::ShortCode;
