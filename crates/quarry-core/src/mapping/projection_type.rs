use super::Direction;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a mapped field participates in each projection direction.
///
/// The discriminants are the ordinals used by serialized declarations and
/// must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ProjectionType {
    /// Excluded in both directions
    Ignore = 0,

    /// Copied in both directions
    Map = 1,

    /// Written to the database, never read back
    OnlyToDb = 2,

    /// Read from the database, never written
    OnlyFromDb = 3,
}

impl ProjectionType {
    /// Looks up a projection type by its ordinal.
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Ignore),
            1 => Some(Self::Map),
            2 => Some(Self::OnlyToDb),
            3 => Some(Self::OnlyFromDb),
            _ => None,
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Returns `true` if a field of this type is copied when projecting in
    /// `direction`.
    pub fn applies(self, direction: Direction) -> bool {
        match self {
            Self::Ignore => false,
            Self::Map => true,
            Self::OnlyToDb => direction == Direction::ToDb,
            Self::OnlyFromDb => direction == Direction::FromDb,
        }
    }
}

impl Serialize for ProjectionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.ordinal())
    }
}

impl<'de> Deserialize<'de> for ProjectionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ordinal = i64::deserialize(deserializer)?;
        Self::from_ordinal(ordinal).ok_or_else(|| {
            serde::de::Error::custom(format_args!("unknown projection type {ordinal}"))
        })
    }
}
