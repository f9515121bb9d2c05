//! Repository plumbing for SQL-backed resources.
//!
//! Queries are assembled with [`sql!`] templates, rows are renamed to and
//! from application records through a [`RootMapping`], and everything is
//! executed through a [`Db`] handle.

pub mod db;
pub use db::Db;

mod model;
pub use model::Model;

mod page;
pub use page::{ListResult, PageOptions, SortOrder};

mod repo;
pub use repo::Repo;

pub mod resource;

pub use quarry_core::{
    async_trait, bail, err, from_db,
    mapping::{self, Declaration, Direction},
    record, root_mapping, to_db, Error, Executor, Path, QueryResult, Record, Result, RootMapping,
    Value,
};

pub use quarry_sql::{
    and_equal, array_items, group_array, insert_array, join, raw, set_map, sql, Arg, Template,
};

#[cfg(feature = "postgresql")]
pub use quarry_driver_postgresql as postgresql;
