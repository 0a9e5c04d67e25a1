//! Go code generator for enum schemas.
//!
//! Plain enums become a `string`-based type with one constant per variant;
//! tagged unions become a struct pairing a discriminant with a payload.
//! Serialization methods are emitted for each enabled [`Backend`].

mod backend;
mod generator;
mod literal;
mod plain;
mod tagged;

pub mod ast;

pub use backend::Backend;
pub use generator::{GenerateOptions, Generator};
pub use literal::quote;
pub use plain::PlainEnumGenerator;
pub use tagged::TaggedUnionGenerator;

use enumgen_codegen::{Vars, template};

/// Render a line template, turning template defects into reports.
pub(crate) fn fill(source: &str, vars: &Vars) -> eyre::Result<String> {
    Ok(template::render(source, vars)?)
}
