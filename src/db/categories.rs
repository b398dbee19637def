//! Category table operations

use sqlx::{Row, SqlitePool};

use crate::error::StoreResult;
use crate::models::{Category, NewCategory};

/// List all categories in insertion order
pub async fn list(pool: &SqlitePool) -> StoreResult<Vec<Category>> {
    let rows = sqlx::query("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .map(|row| Category {
            id: row.get("id"),
            name: row.get("name"),
        })
        .collect())
}

/// Load category by id
pub async fn by_id(pool: &SqlitePool, id: i64) -> StoreResult<Option<Category>> {
    let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Category {
        id: row.get("id"),
        name: row.get("name"),
    }))
}

/// Id of the first category with the given name
pub async fn id_by_name(pool: &SqlitePool, name: &str) -> StoreResult<Option<i64>> {
    let id: Option<i64> =
        sqlx::query_scalar("SELECT id FROM categories WHERE name = ? ORDER BY id LIMIT 1")
            .bind(name)
            .fetch_optional(pool)
            .await?;

    Ok(id)
}

/// Insert category; the id comes from AUTOINCREMENT
pub async fn insert(pool: &SqlitePool, category: &NewCategory) -> StoreResult<()> {
    sqlx::query("INSERT INTO categories (name) VALUES (?)")
        .bind(&category.name)
        .execute(pool)
        .await?;

    Ok(())
}
