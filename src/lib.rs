// Declare modules for the library build
pub mod checks;
pub mod cli;
pub mod error;
pub mod manifest;
pub mod models;

pub use models::{Constraint, ManifestKind, Requirement};
