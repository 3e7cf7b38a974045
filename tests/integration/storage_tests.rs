//! Storage contract tests, run against every backend

use bookshelf_server::{
    models::book::{Book, BookId, UpdateBook},
    repository::{BookFilter, BookStore, JsonFileBookStore, Lookup, MemoryBookStore},
};
use tempfile::TempDir;

async fn file_store() -> (TempDir, JsonFileBookStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileBookStore::open(dir.path().join("db.json")).await.unwrap();
    (dir, store)
}

async fn all(store: &dyn BookStore) -> Vec<Book> {
    store.get_books(&BookFilter::All).await.unwrap()
}

async fn check_crud_scenario(store: &dyn BookStore) {
    assert!(all(store).await.is_empty());

    let book = Book::new("sherlock holmes", "Arthur", "universal", 200.0, None);
    let added = store.add_book(book.clone()).await.unwrap();
    assert_eq!(added, book);
    assert_eq!(all(store).await, vec![book.clone()]);
    assert_eq!(
        store.get_books(&BookFilter::ById(book.id().clone())).await.unwrap(),
        vec![book.clone()]
    );

    let changes = UpdateBook {
        name: Some("sherlock holmes stories".into()),
        ..Default::default()
    };
    let updated = store.update_book(book.id(), &changes).await.unwrap();
    assert_eq!(
        updated.map(|b| b.name),
        Lookup::Found("sherlock holmes stories".to_string())
    );

    assert_eq!(store.delete_book(book.id()).await.unwrap(), Lookup::Found(book.id().clone()));
    assert!(all(store).await.is_empty());

    let second = Book::new("sherlock homes1", "Arthur", "universal", 150.0, None);
    store.add_book(second.clone()).await.unwrap();
    assert_eq!(all(store).await, vec![second]);
}

async fn check_update_changes_one_field(store: &dyn BookStore) {
    let book = Book::new("othello", "william", "penguin", 2334.0, Some("fav".into()));
    store.add_book(book.clone()).await.unwrap();

    let changes = UpdateBook { price: Some(10.5), ..Default::default() };
    let updated = store
        .update_book(book.id(), &changes)
        .await
        .unwrap()
        .into_option()
        .unwrap();

    assert_eq!(updated.id(), book.id());
    assert_eq!(updated.price, 10.5);
    assert_eq!(updated.name, book.name);
    assert_eq!(updated.author, book.author);
    assert_eq!(updated.publisher, book.publisher);
    assert_eq!(updated.favorite, book.favorite);
    assert_eq!(store.get_book(book.id()).await.unwrap(), Lookup::Found(updated));
}

async fn check_missing_ids(store: &dyn BookStore) {
    let book = Book::new("hamlet", "william", "penguin", 12.0, None);
    store.add_book(book.clone()).await.unwrap();
    let unknown = BookId::generate();

    assert!(store.get_books(&BookFilter::ById(unknown.clone())).await.unwrap().is_empty());
    let changes = UpdateBook { name: Some("macbeth".into()), ..Default::default() };
    assert_eq!(store.update_book(&unknown, &changes).await.unwrap(), Lookup::NotFound);
    assert_eq!(store.delete_book(&unknown).await.unwrap(), Lookup::NotFound);
    assert_eq!(all(store).await, vec![book]);
}

async fn check_delete_keeps_order(store: &dyn BookStore) {
    let books: Vec<Book> = ["one", "two", "three", "four"]
        .into_iter()
        .map(|name| Book::new(name, "a", "p", 1.0, None))
        .collect();
    for book in &books {
        store.add_book(book.clone()).await.unwrap();
    }

    store.delete_book(books[1].id()).await.unwrap();
    let names: Vec<String> = all(store).await.into_iter().map(|b| b.name).collect();
    assert_eq!(names, ["one", "three", "four"]);
}

async fn check_name_search(store: &dyn BookStore) {
    let holmes = Book::new("sherlock holmes", "Arthur", "universal", 200.0, None);
    let homes = Book::new("sherlock homes1", "Arthur", "universal", 150.0, None);
    store.add_book(holmes.clone()).await.unwrap();
    store.add_book(homes.clone()).await.unwrap();

    let found = store
        .get_books(&BookFilter::new(None, Some("name=sherlock")))
        .await
        .unwrap();
    assert_eq!(found, vec![holmes.clone(), homes]);

    let found = store
        .get_books(&BookFilter::new(None, Some("name=holmes")))
        .await
        .unwrap();
    assert_eq!(found, vec![holmes.clone()]);

    // Any key works, and `+` is not a space
    let found = store
        .get_books(&BookFilter::new(None, Some("search=holmes")))
        .await
        .unwrap();
    assert_eq!(found, vec![holmes.clone()]);
    assert!(store
        .get_books(&BookFilter::new(None, Some("name=sherlock+holmes")))
        .await
        .unwrap()
        .is_empty());

    // An id takes priority over the search fragment
    let found = store
        .get_books(&BookFilter::new(Some(holmes.id().clone()), Some("name=homes1")))
        .await
        .unwrap();
    assert_eq!(found, vec![holmes]);
}

#[tokio::test]
async fn test_memory_crud_scenario() {
    check_crud_scenario(&MemoryBookStore::new()).await;
}

#[tokio::test]
async fn test_file_crud_scenario() {
    let (_dir, store) = file_store().await;
    check_crud_scenario(&store).await;
}

#[tokio::test]
async fn test_memory_update_changes_one_field() {
    check_update_changes_one_field(&MemoryBookStore::new()).await;
}

#[tokio::test]
async fn test_file_update_changes_one_field() {
    let (_dir, store) = file_store().await;
    check_update_changes_one_field(&store).await;
}

#[tokio::test]
async fn test_memory_missing_ids() {
    check_missing_ids(&MemoryBookStore::new()).await;
}

#[tokio::test]
async fn test_file_missing_ids() {
    let (_dir, store) = file_store().await;
    check_missing_ids(&store).await;
}

#[tokio::test]
async fn test_memory_delete_keeps_order() {
    check_delete_keeps_order(&MemoryBookStore::new()).await;
}

#[tokio::test]
async fn test_file_delete_keeps_order() {
    let (_dir, store) = file_store().await;
    check_delete_keeps_order(&store).await;
}

#[tokio::test]
async fn test_memory_name_search() {
    check_name_search(&MemoryBookStore::new()).await;
}

#[tokio::test]
async fn test_file_name_search() {
    let (_dir, store) = file_store().await;
    check_name_search(&store).await;
}

#[tokio::test]
async fn test_file_reopen_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelf").join("db.json");

    let store = JsonFileBookStore::open(&path).await.unwrap();
    check_delete_keeps_order(&store).await;
    let before = all(&store).await;
    drop(store);

    let reopened = JsonFileBookStore::open(&path).await.unwrap();
    assert_eq!(all(&reopened).await, before);

    // Reopening again without mutation changes nothing
    let again = JsonFileBookStore::open(&path).await.unwrap();
    assert_eq!(all(&again).await, before);
}

#[tokio::test]
async fn test_file_reads_existing_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    let id = uuid::Uuid::new_v4();
    let document = format!(
        r#"{{ "books": [ {{ "id": "{}", "name": "othello", "author": "william", "publisher": "penguin", "price": 2334, "favorite": "fav" }}, {{ "id": "book-7", "name": "hamlet", "author": "william", "publisher": "penguin", "price": 12 }} ] }}"#,
        id
    );
    tokio::fs::write(&path, document).await.unwrap();

    let store = JsonFileBookStore::open(&path).await.unwrap();
    assert_eq!(store.count().await.unwrap(), 2);
    let hamlet = store.get_book(&BookId::from("book-7")).await.unwrap();
    assert_eq!(hamlet.map(|b| b.name), Lookup::Found("hamlet".to_string()));

    let book = store
        .get_book(&BookId::from(id.to_string()))
        .await
        .unwrap()
        .into_option()
        .unwrap();
    assert_eq!(book.name, "othello");
    assert_eq!(book.price, 2334.0);
    assert!(book.is_favorite());
}
