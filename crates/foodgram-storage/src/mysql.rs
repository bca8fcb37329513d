use async_trait::async_trait;
use foodgram_core::{
    CodeRegistry, Component, EntityKind, ReadRegistry, Recipe, RecipeCatalog, Result, ShortCode,
    StorageError,
};
use jiff::Timestamp;
use sqlx::migrate::Migrator;
use sqlx::{MySqlPool, Row};
use tracing::debug;

/// Schema for `short_codes`, `recipes` and `recipe_components`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// MySQL implementation of the code registry.
///
/// Uniqueness lives in the schema: the primary key on
/// `(entity_kind, entity_id)` keeps one code per entity and the unique key on
/// `(entity_kind, code)` keeps one entity per code. A failed insert is the
/// collision signal; there is no separate check before writing.
#[derive(Debug, Clone)]
pub struct MySqlRegistry {
    pool: MySqlPool,
}

impl MySqlRegistry {
    /// Creates a registry from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a registry by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Applies pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Operation(format!("migration failed: {e}")))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRegistry for MySqlRegistry {
    async fn exists(&self, kind: EntityKind, code: &ShortCode) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM short_codes
            WHERE entity_kind = ?
              AND code = ?
            LIMIT 1
            "#,
        )
        .bind(kind.name())
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }

    async fn resolve(&self, kind: EntityKind, code: &ShortCode) -> Result<Option<u64>> {
        let row = sqlx::query(
            r#"
            SELECT entity_id
            FROM short_codes
            WHERE entity_kind = ?
              AND code = ?
            LIMIT 1
            "#,
        )
        .bind(kind.name())
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(|row| row.try_get::<u64, _>("entity_id"))
            .transpose()
            .map_err(map_sqlx_error)
    }

    async fn code_of(&self, kind: EntityKind, id: u64) -> Result<Option<ShortCode>> {
        let row = sqlx::query(
            r#"
            SELECT code
            FROM short_codes
            WHERE entity_kind = ?
              AND entity_id = ?
            LIMIT 1
            "#,
        )
        .bind(kind.name())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row.try_get("code").map_err(map_sqlx_error)?;
        ShortCode::new(&raw)
            .map(Some)
            .map_err(|e| StorageError::InvalidData(format!("stored code '{raw}': {e}")))
    }
}

#[async_trait]
impl CodeRegistry for MySqlRegistry {
    async fn persist(&self, kind: EntityKind, id: u64, code: &ShortCode) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO short_codes (entity_kind, entity_id, code, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(kind.name())
        .bind(id)
        .bind(code.as_str())
        .bind(Timestamp::now().as_second())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!(%kind, id, %code, "short code assigned");
                Ok(())
            }
            Err(err) if is_unique_violation(&err) => {
                // Either key can fire; the primary key means the entity was
                // already served by an earlier request.
                match self.code_of(kind, id).await? {
                    Some(existing) => Err(StorageError::AlreadyAssigned {
                        kind: kind.to_string(),
                        id,
                        code: existing.to_string(),
                    }),
                    None => Err(StorageError::Conflict(code.to_string())),
                }
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}

/// Reads recipes from the `recipes` and `recipe_components` tables.
#[derive(Debug, Clone)]
pub struct MySqlCatalog {
    pool: MySqlPool,
}

impl MySqlCatalog {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeCatalog for MySqlCatalog {
    async fn recipe(&self, id: u64) -> Result<Option<Recipe>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, author, cooking_time
            FROM recipes
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let components = sqlx::query(
            r#"
            SELECT ingredient, measurement_unit, amount
            FROM recipe_components
            WHERE recipe_id = ?
            ORDER BY ingredient
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .into_iter()
        .map(|row| {
            Ok(Component {
                ingredient: row.try_get("ingredient")?,
                measurement_unit: row.try_get("measurement_unit")?,
                amount: row.try_get("amount")?,
            })
        })
        .collect::<std::result::Result<Vec<_>, sqlx::Error>>()
        .map_err(map_sqlx_error)?;

        Ok(Some(Recipe {
            id: row.try_get("id").map_err(map_sqlx_error)?,
            name: row.try_get("name").map_err(map_sqlx_error)?,
            author: row.try_get("author").map_err(map_sqlx_error)?,
            cooking_time: row.try_get("cooking_time").map_err(map_sqlx_error)?,
            components,
        }))
    }
}
