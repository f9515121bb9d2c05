use crate::{Arg, Builder, Placeholder};

use quarry_core::{Error, Result, Value};
use serde::{ser::SerializeStruct, Serialize, Serializer};
use std::fmt;

/// Parameterized SQL text and its positional values.
///
/// `text` refers to `values[i]` as `$<i + 1>`. The fragments and arguments
/// the template was built from are retained so the template can be nested
/// inside another one: the parent re-walks them with its own placeholder
/// counter rather than pasting `text`, which keeps numbering monotonic across
/// the whole tree.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
    values: Vec<Value>,
    raw: Raw,
}

#[derive(Debug, Clone)]
struct Raw {
    /// Literal text before, between and after each argument.
    fragments: Vec<String>,

    args: Vec<Arg>,

    /// The placeholder that would follow the last one rendered.
    next_placeholder: Placeholder,
}

impl Template {
    /// Builds a template from `fragments.len() == args.len() + 1` fragments
    /// interleaved with `args`.
    ///
    /// Any other fragment count is an error: the numbering of whatever text
    /// would come out of it is meaningless.
    pub fn from_parts(fragments: Vec<String>, args: Vec<Arg>) -> Result<Template> {
        if fragments.len() != args.len() + 1 {
            return Err(Error::template_arity(fragments.len(), args.len()));
        }

        Ok(Template::assemble(fragments, args))
    }

    /// A template of literal text with no parameters.
    ///
    /// Use this to splice trusted identifiers such as table names into a
    /// query. Nothing is escaped.
    pub fn raw(text: impl Into<String>) -> Template {
        Template::assemble(vec![text.into()], vec![])
    }

    /// A template of literal text joined from `fragments`, with no parameters.
    pub fn raw_parts<I, S>(fragments: I) -> Template
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = fragments
            .into_iter()
            .fold(String::new(), |mut acc, fragment| {
                acc.push_str(fragment.as_ref());
                acc
            });
        Template::raw(text)
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Callers guarantee `fragments.len() == args.len() + 1`.
    pub(crate) fn assemble(fragments: Vec<String>, args: Vec<Arg>) -> Template {
        debug_assert_eq!(fragments.len(), args.len() + 1);

        let mut text = String::new();
        let mut values = Vec::new();
        let next_placeholder = render(
            &fragments,
            &args,
            Placeholder::FIRST,
            &mut text,
            &mut values,
        );

        Template {
            text,
            values,
            raw: Raw {
                fragments,
                args,
                next_placeholder,
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.text, self.values)
    }

    /// Returns `true` if the template renders no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The number of placeholders the template binds.
    pub fn param_count(&self) -> usize {
        self.raw.next_placeholder.0 - 1
    }

    pub fn fragments(&self) -> &[String] {
        &self.raw.fragments
    }

    pub fn args(&self) -> &[Arg] {
        &self.raw.args
    }
}

/// Appends `fragments` and `args` to `text`/`values`, numbering placeholders
/// from `counter`. Returns the next unused placeholder.
fn render(
    fragments: &[String],
    args: &[Arg],
    mut counter: Placeholder,
    text: &mut String,
    values: &mut Vec<Value>,
) -> Placeholder {
    use std::fmt::Write;

    for (index, fragment) in fragments.iter().enumerate() {
        text.push_str(fragment);

        match args.get(index) {
            // Trailing fragment
            None => {}
            Some(Arg::Template(nested)) => {
                counter = render(
                    &nested.raw.fragments,
                    &nested.raw.args,
                    counter,
                    text,
                    values,
                );
            }
            Some(Arg::Value(value)) => {
                // Writing to a `String` cannot fail
                let _ = write!(text, "{counter}");
                values.push(value.clone());
                counter = counter.next();
            }
        }
    }

    counter
}

/// Templates compare by rendered output, not by how they were composed.
impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.values == other.values
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Serializes as `{ "text": ..., "values": [...] }`, the shape PostgreSQL
/// clients accept as a query config.
impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Template", 2)?;
        state.serialize_field("text", &self.text)?;
        state.serialize_field("values", &self.values)?;
        state.end()
    }
}
