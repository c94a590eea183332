#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        kind: $kind:expr,
        pattern: $pat:literal
        $(, shape: $shape:expr)?
        , prod: |$caps:ident : &Captures| -> $ret_ty:ty $body:block
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            kind: $kind,
            pattern: $crate::regex!($pat),
            shape: { 0 $(| $shape)? },
            production: Box::new(move |$caps: &regex::Captures<'_>| -> $ret_ty { $body }),
        }
    }};
}
