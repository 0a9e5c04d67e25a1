//! Fragments: the intermediate form between AST nodes and text.
//!
//! Nodes describe their layout as a tree of fragments and never write to the
//! output directly; [`CodeBuilder`](super::CodeBuilder) decides indentation.

/// One piece of generated layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeFragment {
    /// Text on its own line at the current depth.
    Line(String),
    /// An empty line.
    Blank,
    /// `header`, then `body` one level deeper, then `close` (if any) back at
    /// the header's depth.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// Fragments one level deeper than their surroundings.
    Indent(Vec<CodeFragment>),
}

impl CodeFragment {
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }

    /// A block closed by `}`, the shape of every Go body.
    pub fn braced(header: impl Into<String>, body: Vec<CodeFragment>) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close: Some("}".to_string()),
        }
    }

    pub fn indent(body: Vec<CodeFragment>) -> Self {
        Self::Indent(body)
    }
}

/// Anything that can describe itself as fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl Renderable for Vec<CodeFragment> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.clone()
    }
}
