use quarry::{QueryResult, Value};
use std::sync::{Arc, Mutex};

/// One query as the executor received it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedQuery {
    pub text: String,
    pub params: Vec<Value>,

    /// `None` when the query failed
    pub result: Option<QueryResult>,
}

/// A wrapper around the query log that provides a clean API for tests
pub struct ExecLog {
    queries: Arc<Mutex<Vec<ExecutedQuery>>>,
}

impl ExecLog {
    pub(crate) fn new(queries: Arc<Mutex<Vec<ExecutedQuery>>>) -> Self {
        Self { queries }
    }

    pub fn len(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.lock().unwrap().is_empty()
    }

    /// Check if any query text starts with `prefix`, e.g. `"INSERT"`.
    pub fn has(&self, prefix: &str) -> bool {
        self.count(prefix) > 0
    }

    /// Count queries whose text starts with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|query| query.text.starts_with(prefix))
            .count()
    }

    /// All query texts, oldest first
    pub fn texts(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .map(|query| query.text.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.queries.lock().unwrap().clear();
    }

    /// Remove and return the oldest query from the log
    pub fn pop(&mut self) -> Option<ExecutedQuery> {
        let mut queries = self.queries.lock().unwrap();
        if queries.is_empty() {
            None
        } else {
            Some(queries.remove(0))
        }
    }

    /// Escape hatch for assertions the helpers don't cover
    pub fn with_queries<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[ExecutedQuery]) -> R,
    {
        let queries = self.queries.lock().unwrap();
        f(&queries)
    }
}
