//! In-memory record store.
//!
//! Mirrors the legacy mock backing: per-kind vectors in insertion order plus
//! per-kind id counters. All state sits behind a single `RwLock`; inserts
//! hold the write guard across counter increment and push, so concurrent
//! inserts cannot hand out the same id.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    Author, Book, Category, NewAuthor, NewBook, NewCategory, NewPublisher, Publisher,
};

#[derive(Debug)]
struct Tables {
    authors: Vec<Author>,
    categories: Vec<Category>,
    publishers: Vec<Publisher>,
    books: Vec<Book>,
    next_author_id: i64,
    next_category_id: i64,
    next_publisher_id: i64,
}

/// Record store held entirely in process memory. State is lost on shutdown.
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Empty store; ids start at 1 for every kind.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                authors: Vec::new(),
                categories: Vec::new(),
                publishers: Vec::new(),
                books: Vec::new(),
                next_author_id: 1,
                next_category_id: 1,
                next_publisher_id: 1,
            }),
        }
    }

    /// Store preloaded with the demo catalog the legacy service shipped.
    /// Id counters continue above the seeded rows (3, 103, 203).
    pub fn with_demo_data() -> Self {
        let authors = vec![
            Author {
                id: 1,
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
            },
            Author {
                id: 2,
                first_name: "Jane".to_string(),
                last_name: "Smith".to_string(),
            },
        ];
        let categories = vec![
            Category {
                id: 101,
                name: "Fiction".to_string(),
            },
            Category {
                id: 102,
                name: "Science".to_string(),
            },
        ];
        let publishers = vec![
            Publisher {
                id: 201,
                name: "Penguin".to_string(),
            },
            Publisher {
                id: 202,
                name: "Random House".to_string(),
            },
        ];
        let books = vec![
            Book {
                isbn: "978-0321765723".to_string(),
                title: "The Great Nest".to_string(),
                author_id: 1,
                category_id: 101,
                publisher_id: 201,
            },
            Book {
                isbn: "978-0134494166".to_string(),
                title: "NestJS in Action".to_string(),
                author_id: 2,
                category_id: 102,
                publisher_id: 202,
            },
        ];

        Self {
            tables: RwLock::new(Tables {
                authors,
                categories,
                publishers,
                books,
                next_author_id: 3,
                next_category_id: 103,
                next_publisher_id: 203,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_authors(&self) -> StoreResult<Vec<Author>> {
        Ok(self.tables.read().await.authors.clone())
    }

    async fn get_author_by_id(&self, id: i64) -> StoreResult<Option<Author>> {
        let tables = self.tables.read().await;
        Ok(tables.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn find_author_id(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Option<i64>> {
        let tables = self.tables.read().await;
        Ok(tables
            .authors
            .iter()
            .find(|a| a.first_name == first_name && a.last_name == last_name)
            .map(|a| a.id))
    }

    async fn insert_author(&self, author: &NewAuthor) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let id = tables.next_author_id;
        tables.next_author_id += 1;
        tables.authors.push(Author {
            id,
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
        });
        Ok(())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.clone())
    }

    async fn get_category_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_category_id(&self, name: &str) -> StoreResult<Option<i64>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id))
    }

    async fn insert_category(&self, category: &NewCategory) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let id = tables.next_category_id;
        tables.next_category_id += 1;
        tables.categories.push(Category {
            id,
            name: category.name.clone(),
        });
        Ok(())
    }

    async fn list_publishers(&self) -> StoreResult<Vec<Publisher>> {
        Ok(self.tables.read().await.publishers.clone())
    }

    async fn get_publisher_by_id(&self, id: i64) -> StoreResult<Option<Publisher>> {
        let tables = self.tables.read().await;
        Ok(tables.publishers.iter().find(|p| p.id == id).cloned())
    }

    async fn find_publisher_id(&self, name: &str) -> StoreResult<Option<i64>> {
        let tables = self.tables.read().await;
        Ok(tables
            .publishers
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id))
    }

    async fn insert_publisher(&self, publisher: &NewPublisher) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let id = tables.next_publisher_id;
        tables.next_publisher_id += 1;
        tables.publishers.push(Publisher {
            id,
            name: publisher.name.clone(),
        });
        Ok(())
    }

    async fn list_books(&self) -> StoreResult<Vec<Book>> {
        Ok(self.tables.read().await.books.clone())
    }

    async fn get_book_by_isbn(&self, isbn: &str) -> StoreResult<Option<Book>> {
        let tables = self.tables.read().await;
        Ok(tables.books.iter().find(|b| b.isbn == isbn).cloned())
    }

    async fn insert_book(&self, book: &NewBook) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.books.iter().any(|b| b.isbn == book.isbn) {
            return Err(StoreError::DuplicateKey(book.isbn.clone()));
        }
        tables.books.push(Book {
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            author_id: book.author_id,
            category_id: book.category_id,
            publisher_id: book.publisher_id,
        });
        Ok(())
    }
}
