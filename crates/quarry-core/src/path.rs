use std::fmt;

/// A sequence of keys addressing a value inside nested records.
///
/// Application-side paths have more than one step when the field lives in an
/// embedded object, e.g. `c.d`; database-side paths are always one column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: Vec<String>,
}

impl Path {
    pub fn new(steps: Vec<String>) -> Self {
        Self { steps }
    }

    /// A path with a single step.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            steps: vec![key.into()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// The final step, if any.
    pub fn last(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }

    /// Returns a new path with `step` appended.
    pub fn child(&self, step: impl Into<String>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step.into());
        Self { steps }
    }

    /// Returns a new path with `prefix` in front of this one.
    pub fn prefixed(&self, prefix: &Path) -> Self {
        let mut steps = Vec::with_capacity(prefix.len() + self.len());
        steps.extend(prefix.steps.iter().cloned());
        steps.extend(self.steps.iter().cloned());
        Self { steps }
    }
}

impl From<&str> for Path {
    fn from(src: &str) -> Self {
        Path::key(src)
    }
}

impl From<String> for Path {
    fn from(src: String) -> Self {
        Path::key(src)
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(src: [&str; N]) -> Self {
        Path::new(src.iter().map(|step| step.to_string()).collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for step in &self.steps {
            write!(f, "{s}{step}")?;
            s = ".";
        }
        Ok(())
    }
}
