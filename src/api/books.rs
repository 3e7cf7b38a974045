//! Book endpoints

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, RawQuery, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, BookId, BookQuery, CreateBook, UpdateBook},
    AppState,
};

/// Response for a deleted book
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedBook {
    /// ID of the removed book
    #[schema(value_type = String)]
    pub id: BookId,
}

/// List books, optionally searching by name.
///
/// The raw query string goes to the store untouched, so `?name=` and
/// `?search=` behave the same.
#[utoipa::path(
    get,
    path = "/book",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "List of books", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list_books(query.as_deref()).await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    id: Result<Path<BookId>, PathRejection>,
) -> AppResult<Json<Book>> {
    let Path(id) = id?;
    let book = state.services.books.get_book(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid book data")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<CreateBook>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let Json(data) = payload?;
    let created = state.services.books.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update some fields of an existing book
#[utoipa::path(
    put,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid book data"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    id: Result<Path<BookId>, PathRejection>,
    payload: Result<Json<UpdateBook>, JsonRejection>,
) -> AppResult<Json<Book>> {
    let Path(id) = id?;
    let Json(changes) = payload?;
    let updated = state.services.books.update_book(id, changes).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = DeletedBook),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    id: Result<Path<BookId>, PathRejection>,
) -> AppResult<Json<DeletedBook>> {
    let Path(id) = id?;
    let id = state.services.books.delete_book(id).await?;
    Ok(Json(DeletedBook { id }))
}
