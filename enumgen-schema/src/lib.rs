//! TOML enum schema parsing and validation.
//!
//! A schema is a table of enum definitions keyed by enum name:
//!
//! ```toml
//! [Color]
//! default = "Red"
//! variants = { Red = "red", Green = "green" }
//!
//! [Shape]
//! constraint = "ShapeKind"
//! variants = { Circle = "CircleData", None = "null" }
//! ```
//!
//! A definition with a `constraint` is a tagged union whose discriminant is
//! the named enum; every other definition is a plain string enum.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod definition;
mod error;
mod parse;
mod validate;

use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

pub use definition::{EnumDefinition, EnumKind, NULL_PAYLOAD, Payload};
pub use error::{Error, Result};
pub use parse::{parse_str, parse_str_with_filename};
pub use validate::{GO_KEYWORDS, is_go_keyword, validate_identifier};

/// Root of an enum schema: every enum definition keyed by its name.
///
/// Iteration follows source order; code generation sorts explicitly through
/// [`Schema::sorted_names`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    enums: IndexMap<String, EnumDefinition>,
}

impl Schema {
    /// Look up a definition by enum name.
    pub fn get(&self, name: &str) -> Option<&EnumDefinition> {
        self.enums.get(name)
    }

    /// Definitions in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnumDefinition)> {
        self.enums.iter().map(|(name, def)| (name.as_str(), def))
    }

    /// Enum names in lexicographic (byte) order.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.enums.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Whether any definition is a tagged union.
    pub fn has_tagged_unions(&self) -> bool {
        self.enums.values().any(EnumDefinition::is_tagged_union)
    }

    /// Whether any definition is a plain enum.
    pub fn has_plain_enums(&self) -> bool {
        self.enums.values().any(|def| !def.is_tagged_union())
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

impl FromStr for Schema {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_str(s)
    }
}
