use async_trait::async_trait;
use parking_lot::RwLock;
use shortit_core::repository::{InsertOutcome, ReadRepository, Repository, Result, UrlMapping};
use shortit_core::shortcode::ShortCode;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Tables {
    rows: Vec<UrlMapping>,
    by_code: HashMap<ShortCode, usize>,
    by_url: HashMap<String, usize>,
}

/// In-memory implementation of the repository contract.
///
/// Rows and both lookup indexes sit behind one lock, so the uniqueness
/// checks and the insert happen under a single write guard. Rows are kept
/// in insertion order and ids start at 1.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.tables.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_original(&self, url: &str) -> Result<Option<ShortCode>> {
        let tables = self.tables.read();
        Ok(tables
            .by_url
            .get(url)
            .map(|&i| tables.rows[i].short_code.clone()))
    }

    async fn find_by_code(&self, code: &ShortCode) -> Result<Option<String>> {
        let tables = self.tables.read();
        Ok(tables
            .by_code
            .get(code)
            .map(|&i| tables.rows[i].original_url.clone()))
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>> {
        Ok(self.tables.read().rows.clone())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn try_insert(&self, url: &str, code: &ShortCode) -> Result<InsertOutcome> {
        let mut tables = self.tables.write();

        if tables.by_code.contains_key(code) || tables.by_url.contains_key(url) {
            return Ok(InsertOutcome::Conflict);
        }

        let index = tables.rows.len();
        let mapping = UrlMapping {
            id: index as i64 + 1,
            original_url: url.to_owned(),
            short_code: code.clone(),
        };

        tables.rows.push(mapping.clone());
        tables.by_code.insert(code.clone(), index);
        tables.by_url.insert(url.to_owned(), index);

        Ok(InsertOutcome::Inserted(mapping))
    }
}
