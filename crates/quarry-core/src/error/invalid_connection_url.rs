use super::Error;

/// Error when a connection URL does not parse or names a database no built-in
/// executor handles.
#[derive(Debug)]
pub(super) struct InvalidConnectionUrl {
    reason: Box<str>,
}

impl std::error::Error for InvalidConnectionUrl {}

impl core::fmt::Display for InvalidConnectionUrl {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("invalid connection URL: ")?;
        f.write_str(&self.reason)
    }
}

impl Error {
    /// Creates an invalid connection URL error. The reason should echo the
    /// offending URL.
    pub fn invalid_connection_url(reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidConnectionUrl(InvalidConnectionUrl {
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if `Db::connect` or an executor rejected the URL.
    pub fn is_invalid_connection_url(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidConnectionUrl(_))
    }
}
