//! Go type declarations.

use enumgen_codegen::{CodeBuilder, CodeFragment, Renderable};

/// A defined type: `type <name> <underlying>`.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    name: String,
    underlying: String,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, underlying: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            underlying: underlying.into(),
        }
    }
}

impl Renderable for TypeDecl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(format!(
            "type {} {}",
            self.name, self.underlying
        ))]
    }
}

/// A field in a Go struct, with optional struct tags.
#[derive(Debug, Clone)]
pub struct StructField {
    name: String,
    ty: String,
    tags: Vec<(String, String)>,
}

impl StructField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            tags: Vec::new(),
        }
    }

    /// Add a struct tag, e.g. `tag("json", "type")` renders `json:"type"`.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }

    fn render(&self) -> String {
        if self.tags.is_empty() {
            return format!("{} {}", self.name, self.ty);
        }
        let tags = self
            .tags
            .iter()
            .map(|(key, value)| format!("{}:\"{}\"", key, value))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {} `{}`", self.name, self.ty, tags)
    }
}

/// A struct type declaration.
#[derive(Debug, Clone)]
pub struct StructType {
    name: String,
    fields: Vec<StructField>,
}

impl StructType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: StructField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::go();
        builder.emit(self);
        builder.finish()
    }
}

impl Renderable for StructType {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::braced(
            format!("type {} struct {{", self.name),
            self.fields
                .iter()
                .map(|field| CodeFragment::Line(field.render()))
                .collect(),
        )]
    }
}
