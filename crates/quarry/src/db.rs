mod connect;
pub use connect::connect;

use crate::{Executor, QueryResult, Result, Template};

use std::sync::Arc;

/// A database handle.
///
/// Wraps whatever [`Executor`] the application runs queries on. Cloning is
/// cheap; every clone shares the same executor.
#[derive(Debug, Clone)]
pub struct Db {
    executor: Arc<dyn Executor>,
}

impl Db {
    pub fn new(executor: impl Executor + 'static) -> Db {
        Db {
            executor: Arc::new(executor),
        }
    }

    pub fn from_arc(executor: Arc<dyn Executor>) -> Db {
        Db { executor }
    }

    /// Connects to the database at `url`, picking a driver by URL scheme.
    pub async fn connect(url: &str) -> Result<Db> {
        connect(url).await
    }

    pub fn executor(&self) -> &Arc<dyn Executor> {
        &self.executor
    }

    /// Executes `query` on this handle's executor.
    pub async fn run(&self, query: &Template) -> Result<QueryResult> {
        run(&*self.executor, query).await
    }
}

/// Executes `query` on `executor`, logging the statement.
pub async fn run(executor: &dyn Executor, query: &Template) -> Result<QueryResult> {
    tracing::debug!(sql = %query.text(), params = query.values().len(), "run query");

    let result = executor.query(query.text(), query.values()).await;

    match &result {
        Ok(res) => tracing::trace!(rows = res.row_count, "query finished"),
        Err(err) => tracing::debug!(error = %err, "query failed"),
    }

    result
}
