//! # Compiler Module
//!
//! Code emission for the route table: turns compiled
//! [`ModuleMeta`](crate::manifest::ModuleMeta) values into dispatcher
//! source files.
//!
//! ## Overview
//!
//! ```text
//! Manifest → manifest::build_modules → Template Rendering → Generated Mirrors
//! ```
//!
//! For every module with a usable scheme/host pair the compiler emits:
//! - one primary dispatcher `Mirror_<scheme>_<host>` holding the handler
//!   instance and the path→thunk mapping, built once in `new()`;
//! - one forwarding dispatcher per alias scheme, owning the primary
//!   instance and delegating `invoke` verbatim;
//! - a `mod.rs` placing every mirror under a single namespace module.
//!
//! Templates are Askama files under `templates/`:
//! - `mirror.rs.txt` - primary dispatcher
//! - `alias.rs.txt` - forwarding dispatcher
//! - `mod.rs.txt` - namespace declarations
//!
//! Emission failures (name collisions, write errors) are build
//! diagnostics: the offending file is skipped, the batch continues.

mod project;
mod templates;

pub use project::*;
pub use templates::*;
