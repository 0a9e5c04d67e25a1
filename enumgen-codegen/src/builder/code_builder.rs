//! Indented text assembly.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates source lines at a tracked nesting depth.
///
/// ```
/// use enumgen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::go();
/// builder.line("func main() {");
/// builder.nested(|b| {
///     b.line("println(\"hello\")");
/// });
/// builder.line("}");
///
/// assert_eq!(builder.finish(), "func main() {\n\tprintln(\"hello\")\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    out: String,
    depth: usize,
    indent: Indent,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            indent,
        }
    }

    /// Tab-indented, as `gofmt` lays out Go.
    pub fn go() -> Self {
        Self::new(Indent::GO)
    }

    /// Write `text` on its own line. Empty text produces an empty line with
    /// no indentation.
    pub fn line(&mut self, text: &str) -> &mut Self {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.indent.write_to(&mut self.out);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    /// Run `write` one level deeper than the current depth.
    pub fn nested(&mut self, write: impl FnOnce(&mut Self)) -> &mut Self {
        self.depth += 1;
        write(self);
        self.depth -= 1;
        self
    }

    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        self.fragments(node.to_fragments());
        self
    }

    fn fragments(&mut self, fragments: Vec<CodeFragment>) {
        for fragment in fragments {
            self.fragment(fragment);
        }
    }

    fn fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(text) => {
                self.line(&text);
            }
            CodeFragment::Blank => {
                self.line("");
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.line(&header);
                self.nested(|b| b.fragments(body));
                if let Some(close) = close {
                    self.line(&close);
                }
            }
            CodeFragment::Indent(body) => {
                self.nested(|b| b.fragments(body));
            }
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn finish(self) -> String {
        self.out
    }
}
