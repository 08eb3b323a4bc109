//! Definition source parsing.
//!
//! - [`scanner`] classifies top-level declarations and builds the model
//! - [`annotation`] decodes routing payloads and validator tags
//! - [`type_parser`] resolves field and parameter types

pub mod annotation;
pub mod scanner;
pub mod type_parser;

pub use scanner::Scanner;
pub use type_parser::TypeParser;
