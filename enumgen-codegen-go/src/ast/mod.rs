//! Go AST builders for declarations, functions, and control flow.
//!
//! Each node implements [`Renderable`](enumgen_codegen::Renderable) and is
//! rendered with tab indentation, as `gofmt` would.

mod control;
mod decls;
mod file;
mod func;

pub use control::{Case, If, Switch};
pub use decls::{StructField, StructType, TypeDecl};
pub use file::{GoFile, Import};
pub use func::{Func, Receiver};
