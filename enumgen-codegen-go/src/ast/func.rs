//! Go method builder.

use enumgen_codegen::{CodeBuilder, CodeFragment, Renderable};

/// Method receiver, e.g. `(e Color)` or `(e *Color)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    name: String,
    ty: String,
    pointer: bool,
}

impl Receiver {
    /// Value receiver: the method works on a copy.
    pub fn value(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            pointer: false,
        }
    }

    /// Pointer receiver: the method may mutate the receiver.
    pub fn pointer(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            pointer: true,
        }
    }

    fn render(&self) -> String {
        let star = if self.pointer { "*" } else { "" };
        format!("({} {}{})", self.name, star, self.ty)
    }
}

/// Builder for Go methods.
///
/// The signature is everything after `func` and the receiver, e.g.
/// `MarshalJSON() ([]byte, error)`.
#[derive(Debug, Clone)]
pub struct Func {
    receiver: Receiver,
    signature: String,
    body: Vec<CodeFragment>,
}

impl Func {
    pub fn method(receiver: Receiver, signature: impl Into<String>) -> Self {
        Self {
            receiver,
            signature: signature.into(),
            body: Vec::new(),
        }
    }

    /// Add a line to the function body.
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::Line(line.into()));
        self
    }

    /// Add a nested node (switch, if, ...) to the function body.
    pub fn push(mut self, node: impl Renderable) -> Self {
        self.body.extend(node.to_fragments());
        self
    }

    fn header(&self) -> String {
        format!("func {} {} {{", self.receiver.render(), self.signature)
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::go();
        builder.emit(self);
        builder.finish()
    }
}

impl Renderable for Func {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::braced(self.header(), self.body.clone())]
    }
}
