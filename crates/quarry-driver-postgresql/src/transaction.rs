use quarry_core::{async_trait, Error, Executor, QueryResult, Result, Value};
use std::fmt;

/// An open transaction.
///
/// The handle is an [`Executor`]: pass it to repository calls that must run
/// inside the transaction. Dropping it without calling [`commit`] rolls the
/// transaction back.
///
/// [`commit`]: Transaction::commit
pub struct Transaction<'a> {
    inner: tokio_postgres::Transaction<'a>,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(inner: tokio_postgres::Transaction<'a>) -> Self {
        Self { inner }
    }

    pub async fn commit(self) -> Result<()> {
        tracing::debug!("commit transaction");
        self.inner.commit().await.map_err(Error::driver)
    }

    pub async fn rollback(self) -> Result<()> {
        tracing::debug!("rollback transaction");
        self.inner.rollback().await.map_err(Error::driver)
    }

    /// Starts a nested transaction backed by a savepoint.
    pub async fn savepoint(&mut self, name: &str) -> Result<Transaction<'_>> {
        let inner = self.inner.savepoint(name).await.map_err(Error::driver)?;
        Ok(Transaction::new(inner))
    }
}

#[async_trait]
impl<'a> Executor for Transaction<'a> {
    async fn query(&self, text: &str, params: &[Value]) -> Result<QueryResult> {
        crate::query(&self.inner, text, params).await
    }
}

impl fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction").finish_non_exhaustive()
    }
}
