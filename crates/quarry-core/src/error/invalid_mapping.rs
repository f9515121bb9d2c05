use super::Error;

/// Error when a mapping declaration fails strict verification.
///
/// This occurs when:
/// - A leaf has an empty column name
/// - A leaf carries an unrecognized projection type
/// - Two leaves write to the same column
///
/// Projection itself never raises this error; malformed leaves are dropped
/// silently unless the declaration is verified first.
#[derive(Debug)]
pub(super) struct InvalidMappingError {
    key: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidMappingError {}

impl core::fmt::Display for InvalidMappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping for `{}`: {}", self.key, self.message)
    }
}

impl Error {
    /// Creates an invalid mapping error for the application field `key`.
    pub fn invalid_mapping(key: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidMapping(InvalidMappingError {
            key: key.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid mapping error.
    pub fn is_invalid_mapping(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidMapping(_))
    }
}
