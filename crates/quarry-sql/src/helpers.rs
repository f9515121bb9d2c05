use crate::{Arg, Template};

use quarry_core::{Record, Value};

/// Literal SQL text with no parameters. Nothing is escaped.
pub fn raw(text: impl Into<String>) -> Template {
    Template::raw(text)
}

/// Joins arguments with `separator`, wrapped in `open` and `close`.
///
/// Every composition helper is a call to this: it produces one fragment per
/// gap, so arity always holds.
pub fn join<I>(open: &str, separator: &str, close: &str, args: I) -> Template
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    let args: Vec<Arg> = args.into_iter().map(Into::into).collect();

    let mut fragments = Vec::with_capacity(args.len() + 1);
    fragments.push(open.to_string());
    for _ in 1..args.len() {
        fragments.push(separator.to_string());
    }
    if args.is_empty() {
        fragments[0].push_str(close);
    } else {
        fragments.push(close.to_string());
    }

    Template::assemble(fragments, args)
}

/// `(v1, v2, ...)` with each value bound; `()` when empty.
pub fn group_array<I>(values: I) -> Template
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    join("(", ", ", ")", values.into_iter().map(|v| Arg::Value(v.into())))
}

/// `ARRAY[v1, v2, ...]` with each value bound.
pub fn array_items<I>(values: I) -> Template
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    join("ARRAY[", ", ", "]", values.into_iter().map(|v| Arg::Value(v.into())))
}

/// `(r1c1, r1c2), (r2c1, r2c2), ...` for a multi-row `VALUES` list.
pub fn insert_array<I, R>(rows: I) -> Template
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: Into<Value>,
{
    join("", ", ", "", rows.into_iter().map(group_array))
}

/// `col1 = $a, col2 = $b, ...` in record order.
///
/// Keys are spliced in as trusted literal text; values are bound.
pub fn set_map(fields: &Record) -> Template {
    join("", ", ", "", assignments(fields))
}

/// `col1 = $a AND col2 = $b ...` in record order, for `WHERE` clauses.
pub fn and_equal(fields: &Record) -> Template {
    join("", " AND ", "", assignments(fields))
}

fn assignments(fields: &Record) -> impl Iterator<Item = Template> + '_ {
    fields.iter().map(|(column, value)| {
        Template::assemble(
            vec![String::new(), " = ".to_string(), String::new()],
            vec![Arg::Template(raw(column.as_str())), Arg::Value(value.clone())],
        )
    })
}
