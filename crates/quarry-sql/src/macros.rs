/// Builds a [`Template`](crate::Template) from string literals and braced
/// arguments.
///
/// String literals are copied into the text as-is. Each `{expr}` becomes an
/// argument: values are bound as placeholders, templates are nested.
///
/// ```
/// use quarry_sql::{raw, sql};
///
/// let table = raw("users");
/// let query = sql!("UPDATE " {table} " SET name = " {"bar"} " WHERE id = " {7} ";");
///
/// assert_eq!(query.text(), "UPDATE users SET name = $1 WHERE id = $2;");
/// ```
#[macro_export]
macro_rules! sql {
    ( $($tt:tt)* ) => {
        $crate::__sql_munch!($crate::Template::builder(); $($tt)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sql_munch {
    ( $builder:expr; ) => {
        $builder.build()
    };
    ( $builder:expr; $lit:literal $($rest:tt)* ) => {
        $crate::__sql_munch!($builder.sql($lit); $($rest)*)
    };
    ( $builder:expr; { $arg:expr } $($rest:tt)* ) => {
        $crate::__sql_munch!($builder.arg($arg); $($rest)*)
    };
}
