//! Test helpers shared across crates in the renv workspace.
//!
//! - [`env`] serialises process environment mutation and restores
//!   variables through RAII guards.
//! - [`cwd`] does the same for the working directory.
//! - [`tree`] builds throwaway project directory trees containing
//!   environment files.

pub mod cwd;
pub mod env;
pub mod tree;

pub use tree::ProjectTree;
