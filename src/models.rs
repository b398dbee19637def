//! Catalog entities and request payloads.
//!
//! Wire format is camelCase JSON (`firstName`, `authorId`, ...). Request
//! payloads reject unknown fields so typos surface as 400s instead of being
//! silently dropped.

use serde::{Deserialize, Serialize};

// ============================================================================
// Stored entities
// ============================================================================

/// Author record. Identified by a store-assigned numeric id; the natural key
/// is the (firstName, lastName) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

/// Category record. Natural key is the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Publisher record. Natural key is the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub id: i64,
    pub name: String,
}

/// Book record. The ISBN is both the caller-supplied identifier and the
/// uniqueness boundary; the three reference ids are plain values, not
/// enforced foreign keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author_id: i64,
    pub category_id: i64,
    pub publisher_id: i64,
}

/// A book joined with its author, category and publisher. Computed at read
/// time, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedBook {
    pub isbn: String,
    pub title: String,
    pub author: Author,
    pub category: Category,
    pub publisher: Publisher,
}

// ============================================================================
// Request payloads
// ============================================================================

/// Payload for creating an author. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCategory {
    pub name: String,
}

/// Payload for creating a publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewPublisher {
    pub name: String,
}

/// Payload for creating a book under already-resolved reference ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewBook {
    pub isbn: String,
    pub title: String,
    pub author_id: i64,
    pub category_id: i64,
    pub publisher_id: i64,
}

/// Payload for the composite insert: a book plus the natural keys of its
/// three referents. Referents are resolved to ids, creating records as
/// needed, before the book row is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewDetailedBook {
    pub isbn: String,
    pub title: String,
    pub author: NewAuthor,
    pub category: NewCategory,
    pub publisher: NewPublisher,
}
