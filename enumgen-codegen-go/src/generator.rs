use enumgen_codegen::format::separate_blocks;
use enumgen_schema::{EnumKind, Schema};
use eyre::{Result, WrapErr};
use tracing::{debug, warn};

use crate::{
    Backend, PlainEnumGenerator, TaggedUnionGenerator,
    ast::{GoFile, Import},
};

/// Top-level declarations separated by a blank line in the final output.
const BLOCK_KEYWORDS: &[&str] = &["type", "func"];

/// User-facing generation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Go package clause of the generated file.
    pub package: String,
    /// Emit `encoding/json` methods.
    pub enable_json: bool,
    /// Emit `gopkg.in/mgo.v2/bson` methods.
    pub enable_bson: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            package: "main".to_string(),
            enable_json: false,
            enable_bson: false,
        }
    }
}

impl GenerateOptions {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    pub fn with_json(mut self, enable: bool) -> Self {
        self.enable_json = enable;
        self
    }

    pub fn with_bson(mut self, enable: bool) -> Self {
        self.enable_bson = enable;
        self
    }

    /// Enabled backends, in emission order.
    pub fn backends(&self) -> Vec<Backend> {
        [
            (Backend::Json, self.enable_json),
            (Backend::Bson, self.enable_bson),
        ]
        .into_iter()
        .filter_map(|(backend, enabled)| enabled.then_some(backend))
        .collect()
    }
}

/// Go code generator producing a single source file from a schema.
pub struct Generator<'a> {
    schema: &'a Schema,
    options: GenerateOptions,
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema, options: GenerateOptions) -> Self {
        Self { schema, options }
    }

    /// The minimal import set for the generated file.
    pub fn imports(&self) -> Vec<Import> {
        let backends = self.options.backends();
        let has_tagged = self.schema.has_tagged_unions();
        let mut imports = Vec::new();

        if has_tagged && backends.iter().any(|b| b.compares_raw_bytes()) {
            imports.push(Import::new("bytes"));
        }
        if self.schema.has_plain_enums() || (has_tagged && !backends.is_empty()) {
            imports.push(Import::new("errors"));
        }
        imports.extend(backends.iter().map(|b| Import::new(b.import_path())));

        imports
    }

    /// Generate the complete Go source file.
    pub fn generate(&self) -> Result<String> {
        let backends = self.options.backends();
        debug!(
            package = %self.options.package,
            enums = self.schema.len(),
            backends = ?backends,
            "generating Go source"
        );

        let mut file = GoFile::new(&self.options.package).imports(self.imports());

        for name in self.schema.sorted_names() {
            let Some(def) = self.schema.get(name) else {
                continue;
            };

            let fragments = match def.kind() {
                EnumKind::Plain => {
                    debug!(enum_name = name, "generating plain enum");
                    PlainEnumGenerator::new(name, def).generate(&backends)
                }
                EnumKind::TaggedUnion { constraint } => {
                    debug!(enum_name = name, constraint, "generating tagged union");
                    if def.default().is_some() {
                        warn!(enum_name = name, "default is ignored for tagged unions");
                    }
                    TaggedUnionGenerator::new(name, constraint, def).generate(&backends)
                }
            }
            .wrap_err_with(|| format!("failed to generate enum '{}'", name))?;

            file = file.decl(fragments);
        }

        Ok(separate_blocks(&file.render(), BLOCK_KEYWORDS))
    }
}
