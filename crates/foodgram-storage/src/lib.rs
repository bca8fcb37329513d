pub mod memory;
pub mod mysql;

pub use foodgram_core::{CodeRegistry, ReadRegistry, RecipeCatalog, StorageError};
pub use memory::{InMemoryCatalog, InMemoryRegistry};
pub use mysql::{MySqlCatalog, MySqlRegistry, MIGRATOR};
