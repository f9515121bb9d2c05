pub mod driver;
pub use driver::{Executor, QueryResult};

mod error;
pub use error::{Error, IntoError};

pub mod mapping;
pub use mapping::{from_db, root_mapping, to_db, ProjectionType, RootMapping};

mod path;
pub use path::Path;

mod record;
pub use record::Record;

mod value;
pub use value::Value;

mod value_chrono;
mod value_json;

/// A Result type alias that uses Quarry's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
