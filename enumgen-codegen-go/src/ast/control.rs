//! Go `switch` and `if` statements.

use enumgen_codegen::{CodeBuilder, CodeFragment, Renderable};

/// One `case` clause.
#[derive(Debug, Clone)]
pub struct Case {
    label: String,
    body: Vec<CodeFragment>,
}

impl Case {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: Vec::new(),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::Line(line.into()));
        self
    }

    /// Add a nested node (e.g. an `if`) to the clause body.
    pub fn push(mut self, node: impl Renderable) -> Self {
        self.body.extend(node.to_fragments());
        self
    }
}

/// A `switch` statement. Clauses are rendered at the `switch` keyword's
/// level, their bodies one level deeper.
#[derive(Debug, Clone)]
pub struct Switch {
    subject: String,
    cases: Vec<Case>,
    default: Option<Vec<CodeFragment>>,
}

impl Switch {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            cases: Vec::new(),
            default: None,
        }
    }

    pub fn case(mut self, case: Case) -> Self {
        self.cases.push(case);
        self
    }

    pub fn cases(self, cases: impl IntoIterator<Item = Case>) -> Self {
        cases.into_iter().fold(self, Switch::case)
    }

    pub fn default(mut self, body: Vec<CodeFragment>) -> Self {
        self.default = Some(body);
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::go();
        builder.emit(self);
        builder.finish()
    }
}

fn clause(label: String, body: &[CodeFragment]) -> Vec<CodeFragment> {
    let mut fragments = vec![CodeFragment::Line(label)];
    if !body.is_empty() {
        fragments.push(CodeFragment::indent(body.to_vec()));
    }
    fragments
}

impl Renderable for Switch {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = vec![CodeFragment::Line(format!("switch {} {{", self.subject))];
        for case in &self.cases {
            fragments.extend(clause(format!("case {}:", case.label), &case.body));
        }
        if let Some(body) = &self.default {
            fragments.extend(clause("default:".to_string(), body));
        }
        fragments.push(CodeFragment::line("}"));
        fragments
    }
}

/// An `if` statement without `else`.
#[derive(Debug, Clone)]
pub struct If {
    condition: String,
    body: Vec<CodeFragment>,
}

impl If {
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            body: Vec::new(),
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::Line(line.into()));
        self
    }
}

impl Renderable for If {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::braced(
            format!("if {} {{", self.condition),
            self.body.clone(),
        )]
    }
}
