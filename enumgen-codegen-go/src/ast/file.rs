//! Go source file: package clause, imports, and declarations.

use enumgen_codegen::{CodeBuilder, CodeFragment, Indent, Renderable};

/// An import path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Import {
    path: String,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Standard library paths have no dot in their first element.
    pub fn is_std(&self) -> bool {
        self.path
            .split('/')
            .next()
            .is_some_and(|first| !first.contains('.'))
    }

    fn quoted(&self) -> String {
        format!("\"{}\"", self.path)
    }
}

/// A structured representation of a Go source file.
///
/// Imports are deduplicated and sorted, standard library first, third-party
/// packages in a second group, the way `goimports` lays them out.
/// Declarations are rendered back to back; spacing between them is left to
/// a formatting pass.
#[derive(Debug, Clone)]
pub struct GoFile {
    package: String,
    imports: Vec<Import>,
    decls: Vec<Vec<CodeFragment>>,
}

impl GoFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: Vec::new(),
            decls: Vec::new(),
        }
    }

    pub fn import(mut self, import: Import) -> Self {
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
        self
    }

    pub fn imports(self, imports: impl IntoIterator<Item = Import>) -> Self {
        imports.into_iter().fold(self, GoFile::import)
    }

    /// Add a top-level declaration.
    pub fn decl(mut self, node: impl Renderable) -> Self {
        self.decls.push(node.to_fragments());
        self
    }

    fn import_fragments(&self) -> Vec<CodeFragment> {
        let mut stdlib: Vec<&Import> = self.imports.iter().filter(|i| i.is_std()).collect();
        let mut third_party: Vec<&Import> = self.imports.iter().filter(|i| !i.is_std()).collect();
        stdlib.sort();
        third_party.sort();

        if let ([only], []) | ([], [only]) = (stdlib.as_slice(), third_party.as_slice()) {
            return vec![CodeFragment::Line(format!("import {}", only.quoted()))];
        }

        let mut body: Vec<CodeFragment> = stdlib
            .iter()
            .map(|import| CodeFragment::Line(import.quoted()))
            .collect();
        if !stdlib.is_empty() && !third_party.is_empty() {
            body.push(CodeFragment::Blank);
        }
        body.extend(
            third_party
                .iter()
                .map(|import| CodeFragment::Line(import.quoted())),
        );

        vec![CodeFragment::Block {
            header: "import (".to_string(),
            body,
            close: Some(")".to_string()),
        }]
    }

    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new(Indent::GO);
        builder.emit(self);
        builder.finish()
    }
}

impl Renderable for GoFile {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = vec![CodeFragment::Line(format!("package {}", self.package))];

        if !self.imports.is_empty() {
            fragments.push(CodeFragment::Blank);
            fragments.extend(self.import_fragments());
        }

        for decl in &self.decls {
            fragments.extend(decl.iter().cloned());
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TypeDecl;

    #[test]
    fn test_package_only() {
        assert_eq!(GoFile::new("main").render(), "package main\n");
    }

    #[test]
    fn test_single_import() {
        let code = GoFile::new("enums").import(Import::new("errors")).render();
        assert_eq!(code, "package enums\n\nimport \"errors\"\n");
    }

    #[test]
    fn test_import_groups() {
        let code = GoFile::new("main")
            .import(Import::new("gopkg.in/mgo.v2/bson"))
            .import(Import::new("errors"))
            .import(Import::new("encoding/json"))
            .import(Import::new("errors"))
            .render();
        assert_eq!(
            code,
            "package main\n\nimport (\n\t\"encoding/json\"\n\t\"errors\"\n\n\t\"gopkg.in/mgo.v2/bson\"\n)\n"
        );
    }

    #[test]
    fn test_decls_follow_imports() {
        let code = GoFile::new("main")
            .import(Import::new("errors"))
            .decl(TypeDecl::new("A", "string"))
            .decl(TypeDecl::new("B", "string"))
            .render();
        assert_eq!(
            code,
            "package main\n\nimport \"errors\"\ntype A string\ntype B string\n"
        );
    }

    #[test]
    fn test_is_std() {
        assert!(Import::new("encoding/json").is_std());
        assert!(Import::new("bytes").is_std());
        assert!(!Import::new("gopkg.in/mgo.v2/bson").is_std());
    }
}
