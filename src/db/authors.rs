//! Author table operations

use sqlx::{Row, SqlitePool};

use crate::error::StoreResult;
use crate::models::{Author, NewAuthor};

/// List all authors in insertion order
pub async fn list(pool: &SqlitePool) -> StoreResult<Vec<Author>> {
    let rows = sqlx::query("SELECT id, first_name, last_name FROM authors ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .map(|row| Author {
            id: row.get("id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
        })
        .collect())
}

/// Load author by id
pub async fn by_id(pool: &SqlitePool, id: i64) -> StoreResult<Option<Author>> {
    let row = sqlx::query("SELECT id, first_name, last_name FROM authors WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Author {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
    }))
}

/// Id of the first author matching the (first_name, last_name) pair
pub async fn id_by_name(
    pool: &SqlitePool,
    first_name: &str,
    last_name: &str,
) -> StoreResult<Option<i64>> {
    let id: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM authors WHERE first_name = ? AND last_name = ? ORDER BY id LIMIT 1",
    )
    .bind(first_name)
    .bind(last_name)
    .fetch_optional(pool)
    .await?;

    Ok(id)
}

/// Insert author; the id comes from AUTOINCREMENT
pub async fn insert(pool: &SqlitePool, author: &NewAuthor) -> StoreResult<()> {
    sqlx::query("INSERT INTO authors (first_name, last_name) VALUES (?, ?)")
        .bind(&author.first_name)
        .bind(&author.last_name)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_and_look_up_author() {
        let pool = crate::db::test_pool().await;

        insert(
            &pool,
            &NewAuthor {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            },
        )
        .await
        .expect("insert failed");

        let id = id_by_name(&pool, "Ada", "Lovelace")
            .await
            .expect("lookup failed")
            .expect("author not found");

        let author = by_id(&pool, id)
            .await
            .expect("load failed")
            .expect("author not found");
        assert_eq!(author.first_name, "Ada");
        assert_eq!(author.last_name, "Lovelace");

        assert_eq!(id_by_name(&pool, "Ada", "Byron").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_natural_keys_resolve_to_first_row() {
        let pool = crate::db::test_pool().await;

        let author = NewAuthor {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        insert(&pool, &author).await.unwrap();
        insert(&pool, &author).await.unwrap();

        let authors = list(&pool).await.unwrap();
        assert_eq!(authors.len(), 2);

        let id = id_by_name(&pool, "Ada", "Lovelace").await.unwrap();
        assert_eq!(id, Some(authors[0].id));
    }
}
