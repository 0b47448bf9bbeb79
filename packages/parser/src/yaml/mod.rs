//! YAML output generation for parsed documents.

mod writer;

pub use writer::{generate_yaml, parse_yaml};
