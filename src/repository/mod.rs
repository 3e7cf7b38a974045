//! Storage layer for book records
//!
//! [`BookStore`] is the contract both backends implement. Absence of a record
//! is never an error at this level: lookups return [`Lookup::NotFound`] or an
//! empty vector, and only I/O or serialization failures surface as
//! [`AppError`].

pub mod json_file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::percent_decode_str;

use crate::{
    config::{StorageBackend, StorageConfig},
    error::{AppError, AppResult},
    models::book::{Book, BookId, UpdateBook},
};

pub use json_file::JsonFileBookStore;
pub use memory::MemoryBookStore;

/// Outcome of an operation addressed by id
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    /// Turn a missing record into the error built by `err`
    pub fn found_or_else(self, err: impl FnOnce() -> AppError) -> AppResult<T> {
        self.into_option().ok_or_else(err)
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}

/// Which books `get_books` returns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookFilter {
    /// The single book with this id, if any
    ById(BookId),
    /// Books whose name contains the (decoded) term, case-sensitive
    NameSearch(String),
    /// Every book, in insertion order
    #[default]
    All,
}

impl BookFilter {
    /// Pick the filter mode: an id wins over a raw query fragment, which
    /// wins over a full listing. An empty fragment counts as absent.
    pub fn new(id: Option<BookId>, raw_query: Option<&str>) -> Self {
        match (id, raw_query) {
            (Some(id), _) => BookFilter::ById(id),
            (None, Some(raw)) if !raw.is_empty() => BookFilter::NameSearch(search_term(raw)),
            _ => BookFilter::All,
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::ById(id) => book.id() == id,
            BookFilter::NameSearch(term) => book.name.contains(term.as_str()),
            BookFilter::All => true,
        }
    }

    /// Apply the filter to an ordered collection
    pub fn select(&self, books: &[Book]) -> Vec<Book> {
        match self {
            BookFilter::ById(_) => books.iter().find(|b| self.matches(b)).cloned().into_iter().collect(),
            _ => books.iter().filter(|b| self.matches(b)).cloned().collect(),
        }
    }
}

/// Extract the search term from a raw `key=value` query fragment.
///
/// The term is whatever follows the last `=` (the whole fragment if there is
/// none), percent-decoded. `+` is kept literally and invalid UTF-8 is
/// replaced.
pub fn search_term(raw: &str) -> String {
    let token = raw.rsplit('=').next().unwrap_or(raw);
    percent_decode_str(token).decode_utf8_lossy().into_owned()
}

/// CRUD contract shared by every storage backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Books selected by `filter`. `ById` yields at most one book.
    async fn get_books(&self, filter: &BookFilter) -> AppResult<Vec<Book>>;

    /// Append an already validated book and return it
    async fn add_book(&self, book: Book) -> AppResult<Book>;

    /// Overwrite the supplied fields of the book with this id
    async fn update_book(&self, id: &BookId, changes: &UpdateBook) -> AppResult<Lookup<Book>>;

    /// Remove the book with this id, returning the id
    async fn delete_book(&self, id: &BookId) -> AppResult<Lookup<BookId>>;

    /// Number of stored books
    async fn count(&self) -> AppResult<usize>;

    async fn get_book(&self, id: &BookId) -> AppResult<Lookup<Book>> {
        let books = self.get_books(&BookFilter::ById(id.clone())).await?;
        Ok(books.into_iter().next().into())
    }
}

/// Build the backend selected in configuration.
///
/// The file backend is loaded before this returns; a failure here is meant to
/// abort startup.
pub async fn open_store(config: &StorageConfig) -> AppResult<Arc<dyn BookStore>> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory book storage");
            Ok(Arc::new(MemoryBookStore::new()))
        }
        StorageBackend::File => {
            let store = JsonFileBookStore::open(&config.path).await?;
            tracing::info!("Using JSON file book storage at {}", config.path.display());
            Ok(Arc::new(store))
        }
    }
}
