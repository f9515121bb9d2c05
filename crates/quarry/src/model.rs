use crate::{Record, Result, RootMapping};

use serde::{de::DeserializeOwned, Serialize};

/// An application type stored as rows of one table.
///
/// Implementations name the table and the mapping between their fields and
/// its columns. Conversion to and from [`Record`] goes through serde by
/// default.
///
/// ```
/// use quarry::{mapping::map, root_mapping, Declaration, Model, RootMapping};
/// use serde::{Deserialize, Serialize};
/// use std::sync::LazyLock;
///
/// #[derive(Serialize, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// struct Image {
///     id: String,
///     image_url: String,
/// }
///
/// static IMAGE_MAPPING: LazyLock<RootMapping> = LazyLock::new(|| {
///     root_mapping(
///         &Declaration::new()
///             .field("id", map("id"))
///             .field("imageUrl", map("image_url")),
///     )
/// });
///
/// impl Model for Image {
///     const TABLE: &'static str = "images";
///
///     fn mapping() -> &'static RootMapping {
///         &IMAGE_MAPPING
///     }
/// }
/// ```
pub trait Model: Serialize + DeserializeOwned + Send + Sync {
    /// Table the model's rows live in. Spliced into queries as literal text.
    const TABLE: &'static str;

    /// Mapping between field names and column names.
    fn mapping() -> &'static RootMapping;

    /// Application-side record for `self`, keyed by field name.
    fn to_record(&self) -> Result<Record> {
        Record::from_serialize(self)
    }

    /// Rebuilds a model from an application-side record.
    fn from_record(record: Record) -> Result<Self> {
        record.deserialize_into()
    }

    /// Database row for `self`, keyed by column name.
    fn to_row(&self) -> Result<Record> {
        Ok(Self::mapping().to_db(&self.to_record()?))
    }

    /// Rebuilds a model from a database row.
    fn from_row(row: &Record) -> Result<Self> {
        Self::from_record(Self::mapping().from_db(row))
    }
}
