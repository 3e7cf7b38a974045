//! Book management service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookId, CreateBook, UpdateBook},
    repository::{BookFilter, BookStore},
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// List every book, or search by name when a raw query string is given
    pub async fn list_books(&self, raw_query: Option<&str>) -> AppResult<Vec<Book>> {
        let filter = BookFilter::new(None, raw_query);
        tracing::debug!("Listing books with {:?}", filter);
        self.store.get_books(&filter).await
    }

    /// Get a book by ID
    pub async fn get_book(&self, id: BookId) -> AppResult<Book> {
        self.store
            .get_book(&id)
            .await?
            .found_or_else(|| not_found(&id))
    }

    /// Validate the payload and store it as a new book with a fresh id
    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        data.validate()?;
        let book = self.store.add_book(data.into_book()).await?;
        tracing::info!("Created book id={} name={:?}", book.id(), book.name);
        Ok(book)
    }

    /// Apply a partial update to an existing book
    pub async fn update_book(&self, id: BookId, changes: UpdateBook) -> AppResult<Book> {
        if !changes.has_changes() {
            return Err(AppError::Validation(
                "At least one of name, author, publisher or a positive price is required".to_string(),
            ));
        }
        changes.validate()?;

        let book = self
            .store
            .update_book(&id, &changes)
            .await?
            .found_or_else(|| not_found(&id))?;
        tracing::info!("Updated book id={}", id);
        Ok(book)
    }

    /// Delete a book, returning its id
    pub async fn delete_book(&self, id: BookId) -> AppResult<BookId> {
        let deleted = self
            .store
            .delete_book(&id)
            .await?
            .found_or_else(|| not_found(&id))?;
        tracing::info!("Deleted book id={}", deleted);
        Ok(deleted)
    }

    pub async fn count(&self) -> AppResult<usize> {
        self.store.count().await
    }
}

fn not_found(id: &BookId) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}
