//! Error types produced while locating and applying environment files.

mod constructors;
mod types;

pub use types::RenvError;

/// Result alias used throughout the crate.
pub type RenvResult<T> = Result<T, RenvError>;

#[cfg(test)]
mod tests;
