//! Declarative projection between application records and database rows.
//!
//! A mapping tree is declared once per entity, usually in a static, and then
//! used to rename keys in both directions:
//!
//! ```
//! use quarry_core::{mapping::{map, Declaration}, record, root_mapping, to_db, from_db};
//!
//! let mapping = root_mapping(
//!     &Declaration::new()
//!         .field("a", map("a_k"))
//!         .embedded("c", Declaration::new().field("d", map("c_d_k"))),
//! );
//!
//! let app = record! { "a" => "x", "c" => record! { "d" => 3 } };
//! let row = to_db(&mapping, &app);
//! assert_eq!(row, record! { "a_k" => "x", "c_d_k" => 3 });
//! assert_eq!(from_db(&mapping, &row), app);
//! ```

mod declaration;
pub use declaration::{ignore, map, only_from_db, only_to_db, Declaration, Entry, Leaf};

mod node;
pub use node::{embedded_mapping, root_mapping, EmbeddedMapping, FlatMapping, MappingNode, RootMapping};

mod project;
pub use project::{from_db, project, to_db};

mod projection_type;
pub use projection_type::ProjectionType;

/// Which way a record is being projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Application record to database row
    ToDb,

    /// Database row to application record
    FromDb,
}

impl Direction {
    pub fn is_from_db(self) -> bool {
        matches!(self, Direction::FromDb)
    }
}
