use crate::Template;

use chrono::{DateTime, NaiveDateTime, Utc};
use quarry_core::{Record, Value};
use uuid::Uuid;

/// One argument slot of a template.
///
/// A value is bound as the next placeholder; a nested template is spliced in
/// and renumbered to continue the enclosing sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(Value),
    Template(Template),
}

impl From<Template> for Arg {
    fn from(src: Template) -> Self {
        Self::Template(src)
    }
}

impl From<&Template> for Arg {
    fn from(src: &Template) -> Self {
        Self::Template(src.clone())
    }
}

macro_rules! impl_from_value {
    ( $($t:ty),+ ) => {
        $(
            impl From<$t> for Arg {
                fn from(src: $t) -> Self {
                    Self::Value(src.into())
                }
            }
        )+
    };
}

impl_from_value!(
    Value,
    Record,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    String,
    &String,
    &str,
    Uuid,
    DateTime<Utc>,
    NaiveDateTime
);

impl From<&Value> for Arg {
    fn from(src: &Value) -> Self {
        Self::Value(src.clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Arg {
    fn from(src: Vec<T>) -> Self {
        Self::Value(src.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Arg {
    fn from(src: Option<T>) -> Self {
        Self::Value(src.into())
    }
}
