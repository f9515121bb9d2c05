use crate::{async_trait, Record, Result, Value};

use std::{fmt::Debug, sync::Arc};

/// Runs parameterized SQL against a database.
///
/// This is the only async boundary of the crate family. Implementations bind
/// `params[i]` to placeholder `$<i + 1>` in `text`. Transactions are separate
/// `Executor` values handed to repository calls explicitly; no connection
/// state is tracked implicitly.
#[async_trait]
pub trait Executor: Debug + Send + Sync {
    /// Execute a statement and collect its rows.
    async fn query(&self, text: &str, params: &[Value]) -> Result<QueryResult>;
}

#[async_trait]
impl<T: Executor + ?Sized> Executor for Arc<T> {
    async fn query(&self, text: &str, params: &[Value]) -> Result<QueryResult> {
        (**self).query(text, params).await
    }
}

#[async_trait]
impl<T: Executor + ?Sized> Executor for &T {
    async fn query(&self, text: &str, params: &[Value]) -> Result<QueryResult> {
        (**self).query(text, params).await
    }
}

/// Rows returned by an [`Executor`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueryResult {
    /// Returned rows, keyed by column name in select-list order.
    pub rows: Vec<Record>,

    /// Rows returned or affected by the statement.
    pub row_count: u64,
}

impl QueryResult {
    /// A result for a statement that affected `count` rows and returned none.
    pub fn count(count: u64) -> Self {
        Self {
            rows: vec![],
            row_count: count,
        }
    }

    pub fn from_rows(rows: Vec<Record>) -> Self {
        let row_count = rows.len() as u64;
        Self { rows, row_count }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row, if any.
    pub fn first(&self) -> Option<&Record> {
        self.rows.first()
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }
}
