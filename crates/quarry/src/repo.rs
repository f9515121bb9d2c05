use crate::{
    db, err,
    resource::{self, SelectOptions},
    Executor, ListResult, Model, PageOptions, QueryResult, Record, Result, Template, Value,
};

use std::marker::PhantomData;

/// CRUD operations for one [`Model`], run on a borrowed executor.
///
/// Every call goes to the executor the repo was created with. To take part
/// in a transaction, rebind the repo with [`Repo::with`]:
///
/// ```ignore
/// let tx = pg.transaction().await?;
/// db.repo::<Image>().with(&tx).add_one(&image).await?;
/// tx.commit().await?;
/// ```
pub struct Repo<'e, M> {
    executor: &'e dyn Executor,
    _model: PhantomData<fn() -> M>,
}

impl<'e, M: Model> Repo<'e, M> {
    pub fn new(executor: &'e dyn Executor) -> Self {
        Repo {
            executor,
            _model: PhantomData,
        }
    }

    /// The same repo running on `executor` instead.
    pub fn with<'x>(&self, executor: &'x dyn Executor) -> Repo<'x, M> {
        Repo::new(executor)
    }

    /// Inserts every item in a single statement. Returns the number of rows
    /// inserted.
    pub async fn add(&self, items: &[M]) -> Result<u64> {
        let rows = items
            .iter()
            .map(M::to_row)
            .collect::<Result<Vec<Record>>>()?;

        match resource::insert(M::TABLE, &rows) {
            Some(query) => Ok(self.run(&query).await?.row_count),
            None => Ok(0),
        }
    }

    pub async fn add_one(&self, item: &M) -> Result<()> {
        self.add(std::slice::from_ref(item)).await?;
        Ok(())
    }

    pub async fn get_by_id(&self, id: impl Into<Value>) -> Result<Option<M>> {
        let res = self.run(&resource::select_by_id(M::TABLE, id)).await?;
        res.rows.first().map(|row| self.load(row)).transpose()
    }

    /// Like [`get_by_id`](Self::get_by_id), but a missing row is an error.
    pub async fn find_by_id(&self, id: impl Into<Value>) -> Result<M> {
        let id = id.into();
        match self.get_by_id(id.clone()).await? {
            Some(item) => Ok(item),
            None => Err(crate::Error::record_not_found(format!(
                "table={} id={id:?}",
                M::TABLE
            ))),
        }
    }

    pub async fn get_many_by_ids<I>(&self, ids: I) -> Result<Vec<M>>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let ids: Vec<Value> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let res = self.run(&resource::select_by_ids(M::TABLE, ids)).await?;
        self.load_all(&res)
    }

    /// One page of items in table order, plus the total count.
    pub async fn list(&self, page: PageOptions) -> Result<ListResult<M>> {
        self.list_with(SelectOptions::new(M::TABLE), page).await
    }

    /// One page of items ordered by `order_by`, plus the total count.
    pub async fn list_ordered(
        &self,
        order_by: Template,
        page: PageOptions,
    ) -> Result<ListResult<M>> {
        self.list_with(SelectOptions::new(M::TABLE).order_by(order_by), page)
            .await
    }

    async fn list_with(
        &self,
        options: SelectOptions<'_>,
        page: PageOptions,
    ) -> Result<ListResult<M>> {
        let query = resource::select(options.limit(page.limit).skip(page.skip));
        let items = self.load_all(&self.run(&query).await?)?;
        let count = self.count().await?;

        Ok(ListResult { items, count })
    }

    /// Items matching `filter`, a condition over the `x` table alias.
    pub async fn find(&self, filter: Template) -> Result<Vec<M>> {
        let query = resource::select(SelectOptions::new(M::TABLE).filter(filter));
        self.load_all(&self.run(&query).await?)
    }

    pub async fn count(&self) -> Result<u64> {
        let res = self.run(&resource::count(M::TABLE)).await?;

        let mut row = res
            .rows
            .into_iter()
            .next()
            .ok_or_else(|| err!("count query for `{}` returned no rows", M::TABLE))?;

        let count: i64 = row.take("count")?;
        u64::try_from(count).map_err(|_| err!("negative count {count} for `{}`", M::TABLE))
    }

    /// Applies application-side `updates` to one row.
    ///
    /// Fields are renamed through the model's mapping first; when nothing is
    /// left to write, no statement is issued.
    pub async fn update_by_id(&self, id: impl Into<Value>, updates: &Record) -> Result<()> {
        let columns = M::mapping().to_db(updates);

        if let Some(query) = resource::update_by_id(M::TABLE, id, &columns) {
            self.run(&query).await?;
        } else {
            tracing::trace!(table = M::TABLE, "update has no mapped columns; skipping");
        }

        Ok(())
    }

    pub async fn remove_by_id(&self, id: impl Into<Value>) -> Result<()> {
        self.run(&resource::delete_by_id(M::TABLE, id)).await?;
        Ok(())
    }

    async fn run(&self, query: &Template) -> Result<QueryResult> {
        db::run(self.executor, query).await
    }

    fn load(&self, row: &Record) -> Result<M> {
        M::from_row(row).map_err(|err| err.context(format!("failed to load `{}` row", M::TABLE)))
    }

    fn load_all(&self, res: &QueryResult) -> Result<Vec<M>> {
        res.rows.iter().map(|row| self.load(row)).collect()
    }
}

impl<M> Clone for Repo<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Repo<'_, M> {}

impl<M> std::fmt::Debug for Repo<'_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repo")
            .field("executor", &self.executor)
            .finish()
    }
}

impl crate::Db {
    /// A repository for `M` on this handle's executor.
    pub fn repo<M: Model>(&self) -> Repo<'_, M> {
        Repo::new(&**self.executor())
    }
}
