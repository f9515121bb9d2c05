//! Parameterized SQL assembled from literal fragments and bound arguments.
//!
//! ```
//! use quarry_sql::{group_array, sql};
//!
//! let ids = group_array(["foo", "bar"]);
//! let query = sql!("SELECT * FROM users WHERE name = " {"kek"} " AND id IN " {ids} ";");
//!
//! assert_eq!(query.text(), "SELECT * FROM users WHERE name = $1 AND id IN ($2, $3);");
//! assert_eq!(query.values().len(), 3);
//! ```

#[macro_use]
mod macros;

mod arg;
pub use arg::Arg;

mod builder;
pub use builder::Builder;

mod helpers;
pub use helpers::{and_equal, array_items, group_array, insert_array, join, raw, set_map};

mod placeholder;
pub use placeholder::Placeholder;

mod template;
pub use template::Template;

pub use quarry_core::{Error, Record, Result, Value};
