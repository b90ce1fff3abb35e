mod kind;
mod requirement;

pub use kind::ManifestKind;
pub use requirement::{Constraint, Requirement, canonicalize_name};
