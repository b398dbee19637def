//! Record store abstraction.
//!
//! The catalog talks to persistent state only through [`RecordStore`]; the
//! backend (in-memory or SQLite) is chosen at startup and injected. Lookups
//! return `Option` rather than erroring on absence, and id assignment is
//! each backend's responsibility.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{
    Author, Book, Category, NewAuthor, NewBook, NewCategory, NewPublisher, Publisher,
};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Storage contract for the four record kinds.
///
/// Each kind gets a listing, a primary-key lookup and an insert; authors,
/// categories and publishers additionally get a natural-key lookup used by
/// the composite resolver. Listings come back in insertion order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // Authors
    async fn list_authors(&self) -> StoreResult<Vec<Author>>;
    async fn get_author_by_id(&self, id: i64) -> StoreResult<Option<Author>>;
    /// First author matching the (firstName, lastName) pair.
    async fn find_author_id(&self, first_name: &str, last_name: &str)
        -> StoreResult<Option<i64>>;
    async fn insert_author(&self, author: &NewAuthor) -> StoreResult<()>;

    // Categories
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn get_category_by_id(&self, id: i64) -> StoreResult<Option<Category>>;
    async fn find_category_id(&self, name: &str) -> StoreResult<Option<i64>>;
    async fn insert_category(&self, category: &NewCategory) -> StoreResult<()>;

    // Publishers
    async fn list_publishers(&self) -> StoreResult<Vec<Publisher>>;
    async fn get_publisher_by_id(&self, id: i64) -> StoreResult<Option<Publisher>>;
    async fn find_publisher_id(&self, name: &str) -> StoreResult<Option<i64>>;
    async fn insert_publisher(&self, publisher: &NewPublisher) -> StoreResult<()>;

    // Books
    async fn list_books(&self) -> StoreResult<Vec<Book>>;
    async fn get_book_by_isbn(&self, isbn: &str) -> StoreResult<Option<Book>>;
    /// Fails with [`crate::error::StoreError::DuplicateKey`] if the ISBN is
    /// already present; no row is written in that case.
    async fn insert_book(&self, book: &NewBook) -> StoreResult<()>;
}
