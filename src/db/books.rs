//! Book table operations

use sqlx::{Row, SqlitePool};

use crate::error::{StoreError, StoreResult};
use crate::models::{Book, NewBook};

fn book_from_row(row: &sqlx::sqlite::SqliteRow) -> Book {
    Book {
        isbn: row.get("isbn"),
        title: row.get("title"),
        author_id: row.get("author_id"),
        category_id: row.get("category_id"),
        publisher_id: row.get("publisher_id"),
    }
}

/// List all books in insertion order (rowid order; the ISBN primary key
/// carries no ordering of its own)
pub async fn list(pool: &SqlitePool) -> StoreResult<Vec<Book>> {
    let rows = sqlx::query(
        r#"
        SELECT isbn, title, author_id, category_id, publisher_id
        FROM books
        ORDER BY rowid
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(book_from_row).collect())
}

/// Load book by ISBN
pub async fn by_isbn(pool: &SqlitePool, isbn: &str) -> StoreResult<Option<Book>> {
    let row = sqlx::query(
        r#"
        SELECT isbn, title, author_id, category_id, publisher_id
        FROM books
        WHERE isbn = ?
        "#,
    )
    .bind(isbn)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(book_from_row))
}

/// Insert book. An existing ISBN surfaces as
/// [`StoreError::DuplicateKey`] and leaves the table untouched.
pub async fn insert(pool: &SqlitePool, book: &NewBook) -> StoreResult<()> {
    let result = sqlx::query(
        r#"
        INSERT INTO books (isbn, title, author_id, category_id, publisher_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&book.isbn)
    .bind(&book.title)
    .bind(book.author_id)
    .bind(book.category_id)
    .bind(book.publisher_id)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(err) => {
            if err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation())
            {
                Err(StoreError::DuplicateKey(book.isbn.clone()))
            } else {
                Err(err.into())
            }
        }
    }
}
