use crate::exec_log::{ExecLog, ExecutedQuery};
use quarry::{async_trait, Executor, QueryResult, Result, Value};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

/// An executor wrapper that logs every query for assertions.
///
/// With an inner executor, queries are forwarded and their results logged.
/// Without one, results are taken from a queue of canned responses; an empty
/// queue answers with an empty result.
#[derive(Debug, Clone, Default)]
pub struct LoggingExecutor {
    inner: Option<Arc<dyn Executor>>,

    /// Shared with every clone and with [`ExecLog`] handles
    queries: Arc<Mutex<Vec<ExecutedQuery>>>,

    responses: Arc<Mutex<VecDeque<Result<QueryResult>>>>,
}

impl LoggingExecutor {
    /// A stub executor answering from canned responses.
    pub fn stub() -> Self {
        Self::default()
    }

    pub fn wrap(inner: impl Executor + 'static) -> Self {
        Self {
            inner: Some(Arc::new(inner)),
            ..Self::default()
        }
    }

    /// Queues the result of the next unanswered query.
    pub fn respond(&self, result: QueryResult) -> &Self {
        self.responses
            .lock()
            .expect("Failed to acquire responses lock")
            .push_back(Ok(result));
        self
    }

    /// Queues a failure for the next unanswered query.
    pub fn fail(&self, err: quarry::Error) -> &Self {
        self.responses
            .lock()
            .expect("Failed to acquire responses lock")
            .push_back(Err(err));
        self
    }

    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.queries.clone())
    }

    fn next_response(&self) -> Result<QueryResult> {
        self.responses
            .lock()
            .expect("Failed to acquire responses lock")
            .pop_front()
            .unwrap_or_else(|| Ok(QueryResult::default()))
    }
}

#[async_trait]
impl Executor for LoggingExecutor {
    async fn query(&self, text: &str, params: &[Value]) -> Result<QueryResult> {
        let result = match &self.inner {
            Some(inner) => inner.query(text, params).await,
            None => self.next_response(),
        };

        self.queries
            .lock()
            .expect("Failed to acquire query log lock")
            .push(ExecutedQuery {
                text: text.to_string(),
                params: params.to_vec(),
                result: result.as_ref().ok().cloned(),
            });

        result
    }
}
