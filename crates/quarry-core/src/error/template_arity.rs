use super::Error;

/// Error when a template is assembled from a fragment list that does not
/// surround its arguments, i.e. `fragments != args + 1`.
#[derive(Debug)]
pub(super) struct TemplateArityError {
    fragments: usize,
    args: usize,
}

impl std::error::Error for TemplateArityError {}

impl core::fmt::Display for TemplateArityError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "template arity mismatch: {} fragments for {} arguments (expected {} fragments)",
            self.fragments,
            self.args,
            self.args + 1
        )
    }
}

impl Error {
    /// Creates a template arity error.
    pub fn template_arity(fragments: usize, args: usize) -> Error {
        Error::from(super::ErrorKind::TemplateArity(TemplateArityError {
            fragments,
            args,
        }))
    }

    /// Returns `true` if this error is a template arity error.
    pub fn is_template_arity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TemplateArity(_))
    }
}
