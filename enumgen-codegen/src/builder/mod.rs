//! Layout primitives shared by language generators.
//!
//! AST nodes implement [`Renderable`] and lower to [`CodeFragment`]s;
//! a [`CodeBuilder`] turns fragments into text using an [`Indent`] style.

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
