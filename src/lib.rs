//! # mirror-router
//!
//! **mirror-router** routes string-addressed requests
//! (`scheme://host/path`) to handler methods declared on ordinary Rust
//! structs, without the caller knowing which struct or method implements
//! a route. Everything is driven by a declarative route manifest: a
//! build-time compiler turns the manifest into lightweight dispatcher
//! source files, and a small runtime delivers results back to a
//! designated execution context regardless of which thread produced them.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`manifest`]** - Route manifest parsing and compilation
//! - **[`compiler`]** - Code generator that emits mirror dispatchers
//! - **[`dispatcher`]** - Runtime invocation contract shared by every
//!   generated mirror
//! - **[`keys`]** - Key normalization shared by compiler and runtime
//! - **[`promise`]** - Single-use result channel with context-affine
//!   delivery
//! - **[`linter`]** - Manifest linting for silently-skipped declarations
//! - **[`cli`]** - Command-line interface for the generator
//!
//! ### Code Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(mirror-router-gen)
//!     participant Manifest as manifest::load_manifest
//!     participant Build as manifest::build_modules
//!     participant Templates as compiler::templates
//!     participant FS as File System
//!
//!     User->>CLI: mirror-router-gen generate<br/>--manifest routes.yaml
//!     CLI->>Manifest: load_manifest("routes.yaml")
//!     Manifest->>Build: build_modules(&doc)
//!     Build->>Build: skip malformed modules,<br/>lowercase hosts and path keys,<br/>split scheme aliases
//!     Build-->>CLI: Vec<ModuleMeta>
//!     CLI->>Templates: render mirror.rs.txt per module
//!     Templates-->>CLI: primary dispatcher source
//!     CLI->>Templates: render alias.rs.txt per alias scheme
//!     Templates-->>CLI: forwarding dispatcher source
//!     CLI->>FS: write src/mirrors/*.rs + mod.rs
//!     CLI-->>User: ✅ Generated mirrors
//! ```
//!
//! ### Dispatch Flow
//!
//! A generated mirror holds its handler instance and an immutable
//! mapping built once in its constructor. `invoke(path, params)` looks
//! up the call thunk under `<key>_METHOD`, splits the serialized
//! parameter-name string stored under `<key>_ARGS`, resolves each name
//! through the caller's [`ParamSource`](dispatcher::ParamSource) and
//! performs exactly one handler invocation. Unknown paths fail with
//! [`RouteNotFound`](dispatcher::DispatchError::RouteNotFound); argument
//! binding failures and handler errors surface as
//! [`Invocation`](dispatcher::DispatchError::Invocation) failures.
//!
//! Outcomes travel back through a [`Promise`](promise::Promise): armed
//! with at most one resolve and one reject callback, settled exactly
//! once, delivered on the designated execution context whether or not
//! the producer ran there.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --bin mirror-router-gen -- generate --manifest routes.yaml
//! ```
//!
//! A manifest declares handler modules and their routes:
//!
//! ```yaml
//! name: demo
//! modules:
//!   - handler: crate::handlers::MediaHandlers
//!     scheme: app|web
//!     host: media
//!     routes:
//!       - path: /openViewer
//!         method: open_viewer
//!         params:
//!           - name: url
//!             ty: String
//! ```
//!
//! This emits `Mirror_app_media` (the dispatcher) and `Mirror_web_media`
//! (a forwarder), both answering `invoke("/openviewer", &params)` by
//! calling `MediaHandlers::open_viewer(url)`.
//!
//! Handler types implement `Default` (the no-argument constructor the
//! mirror uses) and route methods return `anyhow::Result<()>`:
//!
//! ```rust,ignore
//! #[derive(Default)]
//! pub struct MediaHandlers;
//!
//! impl MediaHandlers {
//!     pub fn open_viewer(&self, url: String) -> anyhow::Result<()> {
//!         // ...
//!         Ok(())
//!     }
//! }
//! ```

pub mod cli;
pub mod compiler;
pub mod dispatcher;
pub mod keys;
pub mod linter;
pub mod manifest;
pub mod promise;

pub use dispatcher::{DispatchError, Mirror, ParamSource};
pub use manifest::{load_manifest, ManifestDoc, ModuleMeta, ParamMeta, RouteMeta};
pub use promise::{Completer, ExecutionContext, MainLoop, Promise};
