//! Publisher table operations

use sqlx::{Row, SqlitePool};

use crate::error::StoreResult;
use crate::models::{NewPublisher, Publisher};

/// List all publishers in insertion order
pub async fn list(pool: &SqlitePool) -> StoreResult<Vec<Publisher>> {
    let rows = sqlx::query("SELECT id, name FROM publishers ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .map(|row| Publisher {
            id: row.get("id"),
            name: row.get("name"),
        })
        .collect())
}

/// Load publisher by id
pub async fn by_id(pool: &SqlitePool, id: i64) -> StoreResult<Option<Publisher>> {
    let row = sqlx::query("SELECT id, name FROM publishers WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Publisher {
        id: row.get("id"),
        name: row.get("name"),
    }))
}

/// Id of the first publisher with the given name
pub async fn id_by_name(pool: &SqlitePool, name: &str) -> StoreResult<Option<i64>> {
    let id: Option<i64> =
        sqlx::query_scalar("SELECT id FROM publishers WHERE name = ? ORDER BY id LIMIT 1")
            .bind(name)
            .fetch_optional(pool)
            .await?;

    Ok(id)
}

/// Insert publisher; the id comes from AUTOINCREMENT
pub async fn insert(pool: &SqlitePool, publisher: &NewPublisher) -> StoreResult<()> {
    sqlx::query("INSERT INTO publishers (name) VALUES (?)")
        .bind(&publisher.name)
        .execute(pool)
        .await?;

    Ok(())
}
