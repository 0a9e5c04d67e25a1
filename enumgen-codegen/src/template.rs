//! Placeholder substitution for line-level code templates.
//!
//! Placeholders are written `${name}`; `$$` produces a literal `$`. A
//! template is parsed once into literal and placeholder segments and then
//! rendered in a single pass: substituted values are copied verbatim and are
//! never scanned for placeholders again, so a value that happens to contain
//! `${other}` comes out unchanged.
//!
//! ```
//! use enumgen_codegen::template::{Template, Vars};
//!
//! let template = Template::parse("case ${type}${name}:").unwrap();
//! let vars = Vars::new().set("type", "Color").set("name", "Red");
//! assert_eq!(template.render(&vars).unwrap(), "case ColorRed:");
//! ```

use indexmap::IndexMap;
use thiserror::Error;

/// Errors raised while parsing or rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated placeholder starting at byte {offset}")]
    Unterminated { offset: usize },

    #[error("invalid placeholder name '{name}' at byte {offset}")]
    InvalidName { name: String, offset: usize },

    #[error("stray '$' at byte {offset}; write '$$' for a literal dollar sign")]
    StrayDollar { offset: usize },

    #[error("no value supplied for placeholder '{name}'")]
    MissingValue { name: String },
}

/// Replacement values keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vars {
    values: IndexMap<String, String>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source` into segments.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(pos) = rest.find('$') {
            literal.push_str(&rest[..pos]);
            let at = offset + pos;
            let tail = &rest[pos + 1..];

            if let Some(after) = tail.strip_prefix('$') {
                literal.push('$');
                offset = at + 2;
                rest = after;
                continue;
            }

            let Some(inner) = tail.strip_prefix('{') else {
                return Err(TemplateError::StrayDollar { offset: at });
            };
            let Some(end) = inner.find('}') else {
                return Err(TemplateError::Unterminated { offset: at });
            };

            let name = &inner[..end];
            if !is_placeholder_name(name) {
                return Err(TemplateError::InvalidName {
                    name: name.to_string(),
                    offset: at,
                });
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(name.to_string()));

            // "${" + name + "}"
            let consumed = 2 + end + 1;
            offset = at + consumed;
            rest = &rest[pos + consumed..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            match segment {
                Segment::Placeholder(name) if !names.contains(&name.as_str()) => {
                    names.push(name);
                }
                _ => {}
            }
        }
        names
    }

    /// Substitute every placeholder with its value from `vars`.
    ///
    /// Values not referenced by the template are ignored.
    pub fn render(&self, vars: &Vars) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = vars
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingValue { name: name.clone() })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Parse and render `source` in one step.
pub fn render(source: &str, vars: &Vars) -> Result<String, TemplateError> {
    Template::parse(source)?.render(vars)
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
