//! Query factories shared by every resource table.
//!
//! Each factory renders a complete statement. Table names are spliced in as
//! literal text and must come from trusted code; every value is bound.
//! Queries alias the table as `x`, so filters and orderings refer to columns
//! as `x.<column>`.

use crate::{Record, Value};
use quarry_sql::{and_equal, group_array, insert_array, raw, set_map, sql, Template};

/// Options for [`select`].
#[derive(Debug, Clone, Default)]
pub struct SelectOptions<'a> {
    pub table: &'a str,

    /// Rendered inside `WHERE (...)`.
    pub filter: Option<Template>,

    /// Rendered after `ORDER BY`.
    pub order_by: Option<Template>,

    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

impl<'a> SelectOptions<'a> {
    pub fn new(table: &'a str) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    pub fn filter(mut self, filter: Template) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order_by(mut self, order_by: Template) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }
}

/// `INSERT` of one or more database rows.
///
/// The column list comes from the first row. Every row contributes its values
/// in that column order; a column the row lacks is bound as `NULL` and keys
/// the first row does not have are not written. Returns `None` when there is
/// nothing to insert.
pub fn insert(table: &str, rows: &[Record]) -> Option<Template> {
    let first = rows.first()?;
    let columns: Vec<&str> = first.keys().collect();

    let values = rows.iter().map(|row| {
        columns
            .iter()
            .map(|column| row.get(column).cloned().unwrap_or_default())
            .collect::<Vec<Value>>()
    });

    Some(sql!(
        "INSERT INTO " {raw(table)} " (" {raw(columns.join(", "))} ") VALUES " {insert_array(values)} ";"
    ))
}

/// `SELECT x.* FROM <table> x` with optional filter, ordering and paging.
pub fn select(options: SelectOptions<'_>) -> Template {
    let mut query = Template::builder();
    query.push_sql("SELECT x.* FROM ");
    query.push_arg(raw(options.table));
    query.push_sql(" x");

    if let Some(filter) = options.filter {
        query.push_sql(" WHERE (");
        query.push_arg(filter);
        query.push_sql(")");
    }

    if let Some(order_by) = options.order_by {
        query.push_sql(" ORDER BY ");
        query.push_arg(order_by);
    }

    if let Some(limit) = options.limit {
        query.push_sql(" LIMIT ");
        query.push_arg(bound(limit));
    }

    if let Some(skip) = options.skip {
        query.push_sql(" OFFSET ");
        query.push_arg(bound(skip));
    }

    query.push_sql(";");
    query.build()
}

/// Number of distinct ids in `table`, returned in a column named `count`.
pub fn count(table: &str) -> Template {
    sql!("SELECT COUNT(DISTINCT x.id) AS count FROM " {raw(table)} " x;")
}

/// The row with the given id, if any.
pub fn select_by_id(table: &str, id: impl Into<Value>) -> Template {
    let id: Value = id.into();
    select(SelectOptions::new(table).filter(sql!("x.id = " {id})).limit(1))
}

/// Every row whose id is in `ids`.
///
/// An empty `ids` renders `IN ()`, which PostgreSQL rejects; callers check for
/// that case first.
pub fn select_by_ids<I>(table: &str, ids: I) -> Template
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    sql!("SELECT * FROM " {raw(table)} " WHERE id IN " {group_array(ids)} ";")
}

/// `UPDATE` of the given columns on one row. `None` when `updates` is empty.
pub fn update_by_id(table: &str, id: impl Into<Value>, updates: &Record) -> Option<Template> {
    if updates.is_empty() {
        return None;
    }

    let id: Value = id.into();
    Some(sql!(
        "UPDATE " {raw(table)} " SET " {set_map(updates)} " WHERE id = " {id} ";"
    ))
}

pub fn delete_by_id(table: &str, id: impl Into<Value>) -> Template {
    let mut filter = Record::new();
    filter.insert("id", id);

    sql!("DELETE FROM " {raw(table)} " WHERE (" {and_equal(&filter)} ");")
}

fn bound(n: u64) -> Value {
    Value::I64(i64::try_from(n).unwrap_or(i64::MAX))
}
