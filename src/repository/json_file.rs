//! JSON file book storage
//!
//! The whole collection lives in one document, `{ "books": [...] }`. It is
//! read once when the store is opened and kept in memory; reads are served
//! from that copy only. Every successful mutation rewrites the full document
//! through a temporary file and a rename. The in-memory copy is replaced only
//! after the write has succeeded, and the lock is held across the write so
//! two mutations from this process never interleave.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};

use super::{BookFilter, BookStore, Lookup};
use crate::{
    error::AppResult,
    models::book::{Book, BookId, UpdateBook},
};

/// On-disk document layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(default)]
    pub books: Vec<Book>,
}

pub struct JsonFileBookStore {
    path: PathBuf,
    document: Mutex<BookDocument>,
}

impl JsonFileBookStore {
    /// Open the store at `path`, creating the file if it does not exist.
    ///
    /// A missing or blank file is an empty collection. Unreadable files and
    /// malformed JSON are returned as errors.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let existing = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => None,
            Ok(content) => Some(serde_json::from_str::<BookDocument>(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let store = Self {
            path,
            document: Mutex::new(existing.clone().unwrap_or_default()),
        };

        match existing {
            Some(document) => {
                tracing::debug!(
                    "Loaded {} books from {}",
                    document.books.len(),
                    store.path.display()
                );
            }
            None => {
                if let Some(parent) = store.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).await?;
                    }
                }
                store.persist(&BookDocument::default()).await?;
                tracing::info!("Created empty book file at {}", store.path.display());
            }
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, document: &BookDocument) -> AppResult<()> {
        let content = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, &content).await?;
        fs::rename(&tmp, &self.path).await?;
        tracing::debug!(
            "Wrote {} books to {}",
            document.books.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[async_trait]
impl BookStore for JsonFileBookStore {
    async fn get_books(&self, filter: &BookFilter) -> AppResult<Vec<Book>> {
        Ok(filter.select(&self.document.lock().await.books))
    }

    async fn add_book(&self, book: Book) -> AppResult<Book> {
        let mut document = self.document.lock().await;
        let mut next = document.clone();
        next.books.push(book.clone());
        self.persist(&next).await?;
        *document = next;
        Ok(book)
    }

    async fn update_book(&self, id: &BookId, changes: &UpdateBook) -> AppResult<Lookup<Book>> {
        let mut document = self.document.lock().await;
        let Some(index) = document.books.iter().position(|b| b.id() == id) else {
            return Ok(Lookup::NotFound);
        };

        let mut next = document.clone();
        next.books[index].apply(changes);
        let updated = next.books[index].clone();
        self.persist(&next).await?;
        *document = next;
        Ok(Lookup::Found(updated))
    }

    async fn delete_book(&self, id: &BookId) -> AppResult<Lookup<BookId>> {
        let mut document = self.document.lock().await;
        if !document.books.iter().any(|b| b.id() == id) {
            return Ok(Lookup::NotFound);
        }

        let next = BookDocument {
            books: document.books.iter().filter(|b| b.id() != id).cloned().collect(),
        };
        self.persist(&next).await?;
        *document = next;
        Ok(Lookup::Found(id.clone()))
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.document.lock().await.books.len())
    }
}
