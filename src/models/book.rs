//! Book model and request payloads.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Opaque book identifier, serialized as a plain string.
///
/// Fresh ids are UUID v4 strings, but any string read back from storage or a
/// request path is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Generate a fresh, never reused identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<String> for BookId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for BookId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Book record as stored and returned by the API.
///
/// The id is assigned by [`Book::new`] and cannot be changed afterwards;
/// every other field may be replaced through [`Book::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    #[schema(value_type = String)]
    id: BookId,
    /// Display title
    pub name: String,
    pub author: String,
    pub publisher: String,
    /// Price, strictly positive
    pub price: f64,
    /// Favorite marker (any non-empty value)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<String>,
}

impl Book {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        publisher: impl Into<String>,
        price: f64,
        favorite: Option<String>,
    ) -> Self {
        Self {
            id: BookId::generate(),
            name: name.into(),
            author: author.into(),
            publisher: publisher.into(),
            price,
            favorite,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite.as_deref().is_some_and(|f| !f.is_empty())
    }

    /// Overwrite the fields present in `changes`, leaving the others untouched
    pub fn apply(&mut self, changes: &UpdateBook) {
        if let Some(ref name) = changes.name {
            self.name = name.clone();
        }
        if let Some(ref author) = changes.author {
            self.author = author.clone();
        }
        if let Some(ref publisher) = changes.publisher {
            self.publisher = publisher.clone();
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(ref favorite) = changes.favorite {
            self.favorite = Some(favorite.clone());
        }
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub author: String,
    pub publisher: String,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    pub price: f64,
    pub favorite: Option<String>,
}

impl CreateBook {
    /// Build a new book with a freshly generated id
    pub fn into_book(self) -> Book {
        Book::new(self.name, self.author, self.publisher, self.price, self.favorite)
    }
}

/// Partial book update. Only the supplied fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    pub price: Option<f64>,
    pub favorite: Option<String>,
}

impl UpdateBook {
    /// True when at least one of name, author, publisher is supplied, or a
    /// positive price is.
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.author.is_some()
            || self.publisher.is_some()
            || self.price.is_some_and(|p| p > 0.0)
    }
}

/// Query parameters for listing books.
///
/// Only documents the accepted forms: the value after the last `=` of the
/// raw query string is the search term, whatever the key.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Substring to search for in book names
    pub name: Option<String>,
    /// Same as `name`
    pub search: Option<String>,
}
