use super::Error;

/// A failure reported by the client library behind an executor.
///
/// The library error is kept whole so callers can downcast it through
/// [`std::error::Error::source`].
#[derive(Debug)]
pub(super) struct DriverError {
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Prints the library error followed by its own causes, since
/// `tokio-postgres` keeps the server message in a source.
impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let causes = std::iter::successors(self.source.source(), |err| err.source());

        core::fmt::Display::fmt(&self.source, f)?;
        for cause in causes {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl Error {
    /// Wraps an error from an executor's client library.
    pub fn driver(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Driver(DriverError {
            source: Box::new(err),
        }))
    }

    pub fn is_driver(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Driver(_))
    }
}
