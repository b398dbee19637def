//! SQLite-backed record store.
//!
//! Thin adapter from [`RecordStore`] to the query modules under
//! [`crate::db`]. Id assignment is delegated to `AUTOINCREMENT`, so
//! concurrent inserts cannot hand out the same id.

use std::path::Path;

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::RecordStore;
use crate::db;
use crate::error::StoreResult;
use crate::models::{
    Author, Book, Category, NewAuthor, NewBook, NewCategory, NewPublisher, Publisher,
};

/// Record store over a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path`, prepare the schema and
    /// optionally seed the demo catalog. `":memory:"` selects a transient
    /// database.
    pub async fn open(db_path: &Path, seed: bool) -> StoreResult<Self> {
        let pool = db::init_pool(db_path, seed).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool whose schema is already prepared.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        db::authors::list(&self.pool).await
    }

    async fn get_author_by_id(&self, id: i64) -> StoreResult<Option<Author>> {
        db::authors::by_id(&self.pool, id).await
    }

    async fn find_author_id(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Option<i64>> {
        db::authors::id_by_name(&self.pool, first_name, last_name).await
    }

    async fn insert_author(&self, author: &NewAuthor) -> StoreResult<()> {
        db::authors::insert(&self.pool, author).await
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        db::categories::list(&self.pool).await
    }

    async fn get_category_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        db::categories::by_id(&self.pool, id).await
    }

    async fn find_category_id(&self, name: &str) -> StoreResult<Option<i64>> {
        db::categories::id_by_name(&self.pool, name).await
    }

    async fn insert_category(&self, category: &NewCategory) -> StoreResult<()> {
        db::categories::insert(&self.pool, category).await
    }

    async fn list_publishers(&self) -> StoreResult<Vec<Publisher>> {
        db::publishers::list(&self.pool).await
    }

    async fn get_publisher_by_id(&self, id: i64) -> StoreResult<Option<Publisher>> {
        db::publishers::by_id(&self.pool, id).await
    }

    async fn find_publisher_id(&self, name: &str) -> StoreResult<Option<i64>> {
        db::publishers::id_by_name(&self.pool, name).await
    }

    async fn insert_publisher(&self, publisher: &NewPublisher) -> StoreResult<()> {
        db::publishers::insert(&self.pool, publisher).await
    }

    async fn list_books(&self) -> StoreResult<Vec<Book>> {
        db::books::list(&self.pool).await
    }

    async fn get_book_by_isbn(&self, isbn: &str) -> StoreResult<Option<Book>> {
        db::books::by_isbn(&self.pool, isbn).await
    }

    async fn insert_book(&self, book: &NewBook) -> StoreResult<()> {
        db::books::insert(&self.pool, book).await
    }
}
