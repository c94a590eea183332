//! Literal classification rules.

pub mod helpers;
pub mod rules;

#[cfg(test)]
mod tests;
