use super::ProjectionType;
use crate::{Error, Path, Result};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// The declarative input to [`root_mapping`](super::root_mapping).
///
/// Keys are application field names. Each entry is either a leaf naming the
/// database column or a nested declaration for an embedded object whose
/// fields are flattened into columns of the same row.
///
/// Declarations also deserialize from the `{ "mapTo": ..., "type": ... }`
/// format:
///
/// ```json
/// { "a": { "mapTo": "a_k", "type": 1 }, "c": { "d": { "mapTo": "c_d_k", "type": 1 } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Declaration {
    entries: IndexMap<String, Entry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Leaf(Leaf),
    Embedded(Declaration),
}

/// A single field to column correspondence.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Database column name. Leaves with an empty name are dropped.
    pub map_to: String,

    /// `None` when the declaration carried an unrecognized type; such leaves
    /// project as [`ProjectionType::Ignore`].
    pub ty: Option<ProjectionType>,
}

/// An object is a leaf when it carries a string `mapTo` or a scalar `type`.
/// Anything else with object shape is an embedded declaration, which also
/// covers nested fields that happen to be called `type` or `mapTo`.
///
/// Leaves never fail to deserialize: a missing or unknown `type` becomes an
/// unrecognized type, a missing `mapTo` an empty column, and extra keys are
/// ignored. A value that is not an object at all is kept as an empty leaf so
/// that building the mapping drops it.
impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        use serde_json::Value as Json;

        let object = match Json::deserialize(deserializer)? {
            Json::Object(object) => object,
            _ => return Ok(Entry::Leaf(Leaf { map_to: String::new(), ty: None })),
        };

        let is_leaf = matches!(object.get("mapTo"), Some(Json::String(_)))
            || matches!(
                object.get("type"),
                Some(ty) if !ty.is_object() && !ty.is_array()
            );

        if is_leaf {
            return Ok(Entry::Leaf(Leaf {
                map_to: object
                    .get("mapTo")
                    .and_then(Json::as_str)
                    .unwrap_or_default()
                    .to_string(),
                ty: object
                    .get("type")
                    .and_then(Json::as_i64)
                    .and_then(ProjectionType::from_ordinal),
            }));
        }

        Declaration::deserialize(Json::Object(object))
            .map(Entry::Embedded)
            .map_err(serde::de::Error::custom)
    }
}

/// A leaf copied in both directions.
pub fn map(column: impl Into<String>) -> Leaf {
    Leaf::new(column, ProjectionType::Map)
}

/// A leaf written to the database but never read back.
pub fn only_to_db(column: impl Into<String>) -> Leaf {
    Leaf::new(column, ProjectionType::OnlyToDb)
}

/// A leaf read from the database but never written.
pub fn only_from_db(column: impl Into<String>) -> Leaf {
    Leaf::new(column, ProjectionType::OnlyFromDb)
}

/// A leaf excluded in both directions.
pub fn ignore() -> Leaf {
    Leaf::new("", ProjectionType::Ignore)
}

impl Leaf {
    pub fn new(column: impl Into<String>, ty: ProjectionType) -> Self {
        Self {
            map_to: column.into(),
            ty: Some(ty),
        }
    }

    /// Builds a leaf from a raw ordinal; unknown ordinals are kept as
    /// unrecognized.
    pub fn from_ordinal(column: impl Into<String>, ordinal: i64) -> Self {
        Self {
            map_to: column.into(),
            ty: ProjectionType::from_ordinal(ordinal),
        }
    }

    /// The projection applied to this leaf.
    pub fn projection(&self) -> ProjectionType {
        self.ty.unwrap_or(ProjectionType::Ignore)
    }
}

impl Declaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a leaf entry for the application field `key`.
    pub fn field(mut self, key: impl Into<String>, leaf: Leaf) -> Self {
        self.entries.insert(key.into(), Entry::Leaf(leaf));
        self
    }

    /// Adds an embedded object under the application field `key`.
    pub fn embedded(mut self, key: impl Into<String>, declaration: Declaration) -> Self {
        self.entries.insert(key.into(), Entry::Embedded(declaration));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Checks the declaration for entries that projection would silently drop.
    ///
    /// Projection itself never fails: leaves without a column or with an
    /// unrecognized type are skipped. Call this at startup to surface such
    /// entries instead. It also rejects two leaves writing the same column.
    pub fn verify(&self) -> Result<()> {
        let mut written = HashMap::new();
        self.verify_at(&Path::default(), &mut written)
    }

    fn verify_at(&self, prefix: &Path, written: &mut HashMap<String, Path>) -> Result<()> {
        for (key, entry) in &self.entries {
            let path = prefix.child(key.as_str());

            match entry {
                Entry::Embedded(nested) => nested.verify_at(&path, written)?,
                Entry::Leaf(leaf) => {
                    let Some(ty) = leaf.ty else {
                        return Err(Error::invalid_mapping(
                            path.to_string(),
                            "unrecognized projection type",
                        ));
                    };

                    if ty == ProjectionType::Ignore {
                        continue;
                    }

                    if leaf.map_to.is_empty() {
                        return Err(Error::invalid_mapping(
                            path.to_string(),
                            "missing column name",
                        ));
                    }

                    if ty.applies(super::Direction::ToDb) {
                        if let Some(other) = written.insert(leaf.map_to.clone(), path.clone()) {
                            return Err(Error::invalid_mapping(
                                path.to_string(),
                                format!("column `{}` is also written by `{other}`", leaf.map_to),
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
