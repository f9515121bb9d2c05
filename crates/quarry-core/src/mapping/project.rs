use super::{Direction, RootMapping};
use crate::Record;

/// Renames an application record into a database row.
pub fn to_db(mapping: &RootMapping, record: &Record) -> Record {
    project(mapping, record, Direction::ToDb)
}

/// Renames a database row into an application record, rebuilding embedded
/// objects.
pub fn from_db(mapping: &RootMapping, record: &Record) -> Record {
    project(mapping, record, Direction::FromDb)
}

/// Projects `record` through every leaf of `mapping` in `direction`.
///
/// A field is copied only when its source path is present in `record`;
/// missing fields never appear in the output, not even as `Null`.
pub fn project(mapping: &RootMapping, record: &Record, direction: Direction) -> Record {
    let mut out = Record::new();

    for flat in mapping.flatten() {
        let (source, target) = match direction {
            Direction::ToDb => (&flat.from_path, &flat.to_path),
            Direction::FromDb => (&flat.to_path, &flat.from_path),
        };

        if !flat.projection.applies(direction) {
            continue;
        }

        if let Some(value) = record.get_path(source) {
            out.set_path(target, value.clone());
        }
    }

    out
}

impl RootMapping {
    pub fn to_db(&self, record: &Record) -> Record {
        to_db(self, record)
    }

    pub fn from_db(&self, record: &Record) -> Record {
        from_db(self, record)
    }
}
