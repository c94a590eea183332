pub(crate) mod literal;
