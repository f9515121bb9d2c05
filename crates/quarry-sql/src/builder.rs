use crate::{Arg, Template};

use quarry_core::Value;

/// Accumulates a template piece by piece.
///
/// Literal text and arguments can be pushed in any order; the builder keeps
/// one fragment on each side of every argument, so the result is always well
/// formed.
///
/// ```
/// use quarry_sql::Template;
///
/// let query = Template::builder()
///     .sql("SELECT * FROM users WHERE id = ")
///     .bind("foo")
///     .sql(" AND age < ")
///     .bind(21)
///     .build();
///
/// assert_eq!(query.text(), "SELECT * FROM users WHERE id = $1 AND age < $2");
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    fragments: Vec<String>,
    args: Vec<Arg>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            fragments: vec![String::new()],
            args: vec![],
        }
    }

    /// Appends literal SQL text.
    pub fn sql(mut self, literal: &str) -> Self {
        self.push_sql(literal);
        self
    }

    /// Binds a value as the next placeholder.
    pub fn bind(self, value: impl Into<Value>) -> Self {
        self.arg(Arg::Value(value.into()))
    }

    /// Splices in a nested template.
    pub fn push(self, template: Template) -> Self {
        self.arg(Arg::Template(template))
    }

    /// Appends any argument.
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.push_arg(arg);
        self
    }

    pub fn push_sql(&mut self, literal: &str) {
        if let Some(last) = self.fragments.last_mut() {
            last.push_str(literal);
        }
    }

    pub fn push_arg(&mut self, arg: impl Into<Arg>) {
        self.args.push(arg.into());
        self.fragments.push(String::new());
    }

    pub fn build(self) -> Template {
        Template::assemble(self.fragments, self.args)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
