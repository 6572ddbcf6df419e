//! Property repository
//!
//! Read access to the `properties` table behind a trait, so the listing cache
//! can be exercised without a database.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{NewProperty, Property};

/// Source of truth for property listings.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Every property, ordered by id.
    async fn all(&self) -> Result<Vec<Property>>;
}

/// SQLite implementation of PropertyRepository
#[derive(Debug, Clone)]
pub struct SqlitePropertyRepository {
    pool: SqlitePool,
}

impl SqlitePropertyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a property and returns its id.
    pub async fn insert(&self, property: &NewProperty) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO properties (title, description, price, location, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&property.title)
        .bind(&property.description)
        .bind(property.price)
        .bind(&property.location)
        .bind(property.created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}

#[async_trait]
impl PropertyRepository for SqlitePropertyRepository {
    async fn all(&self) -> Result<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(
            r#"
            SELECT id, title, description, price, location, created_at
            FROM properties
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect;
    use crate::error::AppError;

    async fn repo() -> SqlitePropertyRepository {
        SqlitePropertyRepository::new(connect("sqlite::memory:", 1).await.unwrap())
    }

    #[tokio::test]
    async fn test_all_on_empty_table() {
        assert!(repo().await.all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_then_all_in_id_order() {
        let repo = repo().await;

        let first = repo
            .insert(&NewProperty::new("Loft", "Open plan", 250_000.0, "Lyon"))
            .await
            .unwrap();
        let second = repo
            .insert(&NewProperty::new("Cottage", "Garden", 180_000.0, "Rennes"))
            .await
            .unwrap();
        assert!(second > first);

        let all = repo.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first);
        assert_eq!(all[0].title, "Loft");
        assert_eq!(all[1].location, "Rennes");
        assert_eq!(all[1].price, 180_000.0);
    }

    #[tokio::test]
    async fn test_created_at_survives_storage() {
        let repo = repo().await;
        let mut new = NewProperty::new("Loft", "Open plan", 1.0, "Lyon");
        new.created_at = "2024-03-01T12:30:00Z".parse().unwrap();

        repo.insert(&new).await.unwrap();

        assert_eq!(repo.all().await.unwrap()[0].created_at, new.created_at);
    }

    #[tokio::test]
    async fn test_missing_table_propagates() {
        let pool = connect("sqlite::memory:", 1).await.unwrap();
        sqlx::query("DROP TABLE properties").execute(&pool).await.unwrap();

        let result = SqlitePropertyRepository::new(pool).all().await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
