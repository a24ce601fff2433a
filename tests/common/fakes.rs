//! In-memory catalog and library backends for widget tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use shelfnote::catalog::{Candidate, CandidateList, CatalogProvider};
use shelfnote::library::{LibraryBackend, LibraryStore, NewBook, OwnedItem};
use shelfnote::widget::{BookSearchWidget, SearchSettings};
use shelfnote::{Result, ShelfError};

pub fn candidate(id: &str, title: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: None,
        authors: vec!["Some Author".to_string()],
        thumbnail: None,
        isbn: None,
    }
}

#[derive(Clone)]
enum Answer {
    Found(Vec<Candidate>),
    Fails(String),
}

/// Catalog returning canned answers per query, each after a delay
#[derive(Default)]
pub struct FakeCatalog {
    answers: Mutex<HashMap<String, (Duration, Answer)>>,
    calls: Mutex<Vec<String>>,
    count: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(self, query: &str, delay_ms: u64, candidates: Vec<Candidate>) -> Self {
        self.answers.lock().insert(
            query.to_string(),
            (Duration::from_millis(delay_ms), Answer::Found(candidates)),
        );
        self
    }

    pub fn with_failure(self, query: &str, message: &str) -> Self {
        self.answers.lock().insert(
            query.to_string(),
            (Duration::ZERO, Answer::Fails(message.to_string())),
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl CatalogProvider for FakeCatalog {
    async fn lookup(&self, query: &str, limit: usize) -> Result<CandidateList> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().push(query.to_string());

        let answer = self.answers.lock().get(query).cloned();
        let (delay, answer) = answer.unwrap_or((Duration::ZERO, Answer::Found(vec![])));
        tokio::time::sleep(delay).await;

        match answer {
            Answer::Found(mut list) => {
                list.truncate(limit);
                Ok(list.into())
            }
            Answer::Fails(message) => Err(ShelfError::Api(message)),
        }
    }
}

/// Library backend holding owned items in memory
#[derive(Default)]
pub struct FakeLibrary {
    items: Mutex<Vec<OwnedItem>>,
    create_calls: AtomicUsize,
    failures_left: AtomicUsize,
    failure_message: Mutex<String>,
}

impl FakeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the shelf with a book registered from `external_id`
    pub fn owning(self, external_id: &str) -> Self {
        self.add_owned(external_id);
        self
    }

    /// Reject the next `n` create calls with `message`
    pub fn failing(self, n: usize, message: &str) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        *self.failure_message.lock() = message.to_string();
        self
    }

    /// Simulate another client adding a book
    pub fn add_owned(&self, external_id: &str) {
        let mut items = self.items.lock();
        let id = format!("b{}", items.len() + 1);
        items.push(OwnedItem {
            id,
            external_id: Some(external_id.to_string()),
            title: format!("Owned {external_id}"),
            subtitle: None,
            authors: vec![],
            thumbnail: None,
            isbn: None,
            category_id: None,
            tags: vec![],
            status: Default::default(),
            visibility: Default::default(),
        });
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn items(&self) -> Vec<OwnedItem> {
        self.items.lock().clone()
    }
}

impl LibraryBackend for FakeLibrary {
    async fn list_owned(&self) -> Result<Vec<OwnedItem>> {
        Ok(self.items.lock().clone())
    }

    async fn create_owned(&self, book: NewBook) -> Result<OwnedItem> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;

        if self.failures_left.load(Ordering::SeqCst) > 0 {
            self.failures_left.fetch_sub(1, Ordering::SeqCst);
            return Err(ShelfError::Backend(self.failure_message.lock().clone()));
        }

        let mut items = self.items.lock();
        let item = OwnedItem {
            id: format!("b{}", items.len() + 1),
            external_id: Some(book.external_id),
            title: book.title,
            subtitle: book.subtitle,
            authors: book.authors,
            thumbnail: book.thumbnail,
            isbn: book.isbn,
            category_id: book.category_id,
            tags: book.tags,
            status: book.status,
            visibility: book.visibility,
        };
        items.push(item.clone());
        Ok(item)
    }
}

pub type TestWidget = BookSearchWidget<FakeCatalog, FakeLibrary>;

/// Build a widget with default settings over the given fakes
pub async fn widget(
    catalog: FakeCatalog,
    library: FakeLibrary,
) -> (Arc<FakeCatalog>, Arc<FakeLibrary>, TestWidget) {
    let catalog = Arc::new(catalog);
    let library = Arc::new(library);
    let store = Arc::new(LibraryStore::new(library.clone()));
    store.refresh().await.expect("fake listing never fails");
    let widget = BookSearchWidget::new(catalog.clone(), store, SearchSettings::default());
    (catalog, library, widget)
}
