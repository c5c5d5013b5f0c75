//! Schema-driven attribute typing

pub mod project;
pub mod value;

pub use project::project_attributes;
pub use value::{Attribute, AttributeValue};
