//! # CLI Module
//!
//! Command-line interface for the mirror-router code generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Compile a route manifest and emit the mirror dispatchers:
//!
//! ```bash
//! mirror-router-gen generate --manifest routes.yaml --output src/mirrors
//! ```
//!
//! Options:
//! - `--manifest <FILE>` - Path to the route manifest (required)
//! - `--output <DIR>` - Output directory (default: `src/mirrors`)
//! - `--force` - Overwrite existing files without prompting
//! - `--dry-run` - Show what would change without writing files
//!
//! ### `lint`
//!
//! Report what the tolerant compiler would silently skip or overwrite:
//!
//! ```bash
//! mirror-router-gen lint --manifest routes.yaml --fail-on-error
//! ```

mod commands;

pub use commands::{run_cli, Cli, Commands};
