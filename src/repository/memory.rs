//! Transient in-process book storage

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookFilter, BookStore, Lookup};
use crate::{
    error::AppResult,
    models::book::{Book, BookId, UpdateBook},
};

/// Ordered list of books kept in memory only. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn get_books(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        Ok(filter.select(&self.books.read().await))
    }

    async fn add_book(&self, book: Book) -> AppResult<Book> {
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn update_book(&self, id: &BookId, changes: &UpdateBook) -> AppResult<Lookup<Book>> {
        let mut books = self.books.write().await;
        let updated = books.iter_mut().find(|b| b.id() == id).map(|book| {
            book.apply(changes);
            book.clone()
        });
        Ok(updated.into())
    }

    async fn delete_book(&self, id: &BookId) -> AppResult<Lookup<BookId>> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.id() != id);
        if books.len() == before {
            return Ok(Lookup::NotFound);
        }
        Ok(Lookup::Found(id.clone()))
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.books.read().await.len())
    }
}
