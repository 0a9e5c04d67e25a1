//! Shared code generation primitives for enumgen.
//!
//! This crate is language-agnostic. The Go generator in
//! `enumgen-codegen-go` builds on top of it.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented output assembly (CodeBuilder, CodeFragment, Renderable)
//! - [`template`] - `${name}` placeholder substitution
//! - [`format`] - Cosmetic passes over finished source text

pub mod builder;
pub mod format;
pub mod template;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use template::{Template, TemplateError, Vars};
