use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for mirror-router
///
/// Provides commands for generating dispatcher code from a route
/// manifest and for linting manifests before generation.
#[derive(Parser)]
#[command(name = "mirror-router")]
#[command(about = "mirror-router CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for mirror-router
#[derive(Subcommand)]
pub enum Commands {
    /// Generate mirror dispatchers from a route manifest
    Generate {
        /// Path to the route manifest file (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Output directory for generated mirrors (default: src/mirrors)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing files without prompting
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Perform a dry run: show what would change without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Lint a route manifest
    ///
    /// Checks the manifest for declarations the tolerant compiler would
    /// silently skip or overwrite:
    /// - modules with an empty handler/scheme/host
    /// - method name casing (must be snake_case)
    /// - duplicate path keys within a module
    /// - generated-name collisions across modules
    Lint {
        /// Path to the route manifest file (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The manifest cannot be loaded or parsed
/// - The output directory cannot be prepared
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            manifest,
            output,
            force,
            dry_run,
        } => {
            let out_dir = crate::compiler::generate_mirrors(
                manifest.as_path(),
                output.as_deref(),
                *force,
                *dry_run,
            )?;
            if !*dry_run {
                if let Err(e) = crate::compiler::format_generated(&out_dir) {
                    eprintln!("rustfmt failed: {e}");
                }
            }
            Ok(())
        }
        Commands::Lint {
            manifest,
            fail_on_error,
            errors_only,
        } => {
            let issues = crate::linter::lint_manifest(manifest.as_path())?;

            if *errors_only {
                let errors: Vec<_> = issues
                    .iter()
                    .filter(|i| i.severity == crate::linter::LintSeverity::Error)
                    .cloned()
                    .collect();
                crate::linter::print_lint_issues(&errors);
                if *fail_on_error && !errors.is_empty() {
                    crate::linter::fail_if_errors(&errors);
                }
            } else {
                crate::linter::print_lint_issues(&issues);
                if *fail_on_error {
                    crate::linter::fail_if_errors(&issues);
                }
            }

            Ok(())
        }
    }
}
