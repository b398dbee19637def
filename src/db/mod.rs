//! SQLite access for the catalog database.
//!
//! Schema note: the reference columns on `books` are deliberately not
//! declared as foreign keys. The legacy store tolerated dangling references
//! and the detailed-book skip policy depends on them being representable.

pub mod authors;
pub mod books;
pub mod categories;
pub mod publishers;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info};

use crate::error::StoreResult;

/// Database path that selects a transient in-memory database.
pub const MEMORY_DB: &str = ":memory:";

/// Open (or create) the catalog database and prepare its schema.
///
/// With `seed`, the demo catalog rows are inserted; `INSERT OR IGNORE`
/// makes the seeding idempotent across restarts.
pub async fn init_pool(db_path: &Path, seed: bool) -> StoreResult<SqlitePool> {
    let pool = if db_path == Path::new(MEMORY_DB) {
        // A single connection keeps every caller on the same transient
        // database; each pooled :memory: connection would otherwise get
        // its own.
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?
    } else {
        let newly_created = !db_path.exists();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Use proper SQLite URI with mode=rwc (read, write, create)
        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        debug!("Connecting to database: {}", db_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        if newly_created {
            info!("Initialized new database: {}", db_path.display());
        } else {
            info!("Opened existing database: {}", db_path.display());
        }

        // WAL allows concurrent readers with one writer
        sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

        pool
    };

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    if seed {
        seed_demo_rows(&pool).await?;
    }

    Ok(pool)
}

/// Create catalog tables if they don't exist (idempotent).
pub async fn create_schema(pool: &SqlitePool) -> StoreResult<()> {
    create_authors_table(pool).await?;
    create_categories_table(pool).await?;
    create_publishers_table(pool).await?;
    create_books_table(pool).await?;

    info!("Database tables initialized (authors, categories, publishers, books)");

    Ok(())
}

async fn create_authors_table(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Non-unique: the direct insert path permits natural-key duplicates
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_authors_name ON authors(first_name, last_name)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_categories_table(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_categories_name ON categories(name)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_publishers_table(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS publishers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_publishers_name ON publishers(name)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_books_table(pool: &SqlitePool) -> StoreResult<()> {
    // Reference ids carry no REFERENCES clauses; see module docs
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            isbn TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            author_id INTEGER NOT NULL,
            category_id INTEGER NOT NULL,
            publisher_id INTEGER NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert the demo catalog the legacy service shipped. Explicit ids keep the
/// well-known values (authors 1-2, categories 101-102, publishers 201-202);
/// `AUTOINCREMENT` continues above them for subsequent inserts.
pub async fn seed_demo_rows(pool: &SqlitePool) -> StoreResult<()> {
    let authors = [(1i64, "John", "Doe"), (2, "Jane", "Smith")];
    for (id, first_name, last_name) in authors {
        sqlx::query("INSERT OR IGNORE INTO authors (id, first_name, last_name) VALUES (?, ?, ?)")
            .bind(id)
            .bind(first_name)
            .bind(last_name)
            .execute(pool)
            .await?;
    }

    let categories = [(101i64, "Fiction"), (102, "Science")];
    for (id, name) in categories {
        sqlx::query("INSERT OR IGNORE INTO categories (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;
    }

    let publishers = [(201i64, "Penguin"), (202, "Random House")];
    for (id, name) in publishers {
        sqlx::query("INSERT OR IGNORE INTO publishers (id, name) VALUES (?, ?)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;
    }

    let books = [
        ("978-0321765723", "The Great Nest", 1i64, 101i64, 201i64),
        ("978-0134494166", "NestJS in Action", 2, 102, 202),
    ];
    for (isbn, title, author_id, category_id, publisher_id) in books {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO books (isbn, title, author_id, category_id, publisher_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(isbn)
        .bind(title)
        .bind(author_id)
        .bind(category_id)
        .bind(publisher_id)
        .execute(pool)
        .await?;
    }

    debug!("Demo catalog rows seeded");

    Ok(())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    create_schema(&pool).await.expect("schema");
    pool
}
