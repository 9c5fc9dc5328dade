//! # Manifest Linter Module
//!
//! Lints a route manifest for issues the tolerant compiler would
//! otherwise swallow silently.
//!
//! ## Checks Performed
//!
//! 1. **Skipped modules** - empty handler, scheme or host means the
//!    compiler emits nothing for the module
//! 2. **Method casing** - method names must be snake_case
//! 3. **Duplicate path keys** - the later declaration silently overwrites
//!    the earlier one in the generated mapping
//! 4. **Duplicate alias schemes** - repeated schemes in one expression
//! 5. **Empty parameter names** - unreachable at dispatch time
//! 6. **Mirror name collisions** - two modules resolving to the same
//!    generated name; only the first is emitted
//!
//! The linter is a visibility layer, not a gate: generation stays
//! permissive regardless of what is reported here.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::keys::{mirror_class_name, normalize_key};
use crate::manifest::{read_manifest, ModuleDecl, SCHEME_DELIMITER};

static SNAKE_CASE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid regex")
});


/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Error - the manifest declares something that cannot work
    Error,
    /// Warning - legal but probably not what the author meant
    Warning,
    /// Info - best practice suggestion
    Info,
}

impl std::fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "ERROR"),
            LintSeverity::Warning => write!(f, "WARNING"),
            LintSeverity::Info => write!(f, "INFO"),
        }
    }
}

/// A lint issue found in a route manifest
#[derive(Debug, Clone)]
pub struct LintIssue {
    /// Where the issue occurred (e.g. `module:media`, `route:/open`)
    pub location: String,
    pub severity: LintSeverity,
    /// Issue kind slug (e.g. `duplicate_path`, `method_casing`)
    pub kind: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl LintIssue {
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Lint a route manifest file.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed
pub fn lint_manifest(manifest_path: &Path) -> anyhow::Result<Vec<LintIssue>> {
    let doc = read_manifest(manifest_path)?;
    let mut issues = Vec::new();

    let mut mirror_names: HashMap<String, String> = HashMap::new();
    for module in &doc.modules {
        lint_module(&mut issues, module, &mut mirror_names);
    }

    Ok(issues)
}

fn lint_module(
    issues: &mut Vec<LintIssue>,
    module: &ModuleDecl,
    mirror_names: &mut HashMap<String, String>,
) {
    let location = format!("module:{}", display_name(module));

    if module.handler.is_empty() || module.scheme.is_empty() || module.host.is_empty() {
        issues.push(
            LintIssue::new(
                location.clone(),
                LintSeverity::Warning,
                "module_skipped",
                "module has an empty handler, scheme or host and will be skipped",
            )
            .with_suggestion("fill in handler, scheme and host to emit a dispatcher"),
        );
        return;
    }

    let schemes: Vec<&str> = module
        .scheme
        .split(SCHEME_DELIMITER)
        .filter(|s| !s.is_empty())
        .collect();
    let mut seen_schemes = HashSet::new();
    for scheme in &schemes {
        if !seen_schemes.insert(*scheme) {
            issues.push(LintIssue::new(
                location.clone(),
                LintSeverity::Warning,
                "duplicate_scheme",
                format!("scheme `{scheme}` appears more than once in the expression"),
            ));
        }
        let class = mirror_class_name(scheme, &normalize_key(&module.host));
        if let Some(other) = mirror_names.insert(class.clone(), location.clone()) {
            issues.push(
                LintIssue::new(
                    location.clone(),
                    LintSeverity::Error,
                    "name_collision",
                    format!("generated name `{class}` collides with {other}"),
                )
                .with_suggestion("only the first module with this name is emitted"),
            );
        }
    }

    let mut seen_paths: HashMap<String, String> = HashMap::new();
    for route in &module.routes {
        let route_location = format!("{location}/route:{}", route.path);

        let Some(method) = route.method.as_deref().filter(|m| !m.is_empty()) else {
            if !route.path.is_empty() {
                issues.push(LintIssue::new(
                    route_location,
                    LintSeverity::Warning,
                    "missing_method",
                    "route has no method name and will be ignored",
                ));
            }
            continue;
        };
        if route.path.is_empty() {
            issues.push(LintIssue::new(
                route_location,
                LintSeverity::Warning,
                "missing_path",
                "route has no path and will be ignored",
            ));
            continue;
        }

        if !SNAKE_CASE.is_match(method) {
            issues.push(
                LintIssue::new(
                    route_location.clone(),
                    LintSeverity::Error,
                    "method_casing",
                    format!("method name `{method}` is not snake_case"),
                )
                .with_suggestion(format!("rename to `{}`", to_snake_case(method))),
            );
        }

        for param in &route.params {
            if param.name.is_empty() {
                issues.push(LintIssue::new(
                    route_location.clone(),
                    LintSeverity::Error,
                    "empty_param_name",
                    "parameter has an empty name and can never be resolved",
                ));
            }
        }

        let key = normalize_key(&route.path);
        if let Some(earlier) = seen_paths.insert(key.clone(), method.to_string()) {
            issues.push(
                LintIssue::new(
                    route_location,
                    LintSeverity::Warning,
                    "duplicate_path",
                    format!("path key `{key}` already bound to `{earlier}`; the later declaration overwrites it"),
                )
                .with_suggestion("rename one of the paths if both methods should stay reachable"),
            );
        }
    }
}

fn display_name(module: &ModuleDecl) -> String {
    if module.host.is_empty() && module.scheme.is_empty() {
        module.handler.clone()
    } else {
        format!("{}_{}", module.scheme, module.host)
    }
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Print lint issues to stderr in a compact, greppable format.
pub fn print_lint_issues(issues: &[LintIssue]) {
    for issue in issues {
        eprintln!(
            "[{}] {} {}: {}",
            issue.severity, issue.kind, issue.location, issue.message
        );
        if let Some(suggestion) = &issue.suggestion {
            eprintln!("    hint: {suggestion}");
        }
    }
}

/// Exit the process with a failure code if any issue is an error.
pub fn fail_if_errors(issues: &[LintIssue]) {
    let errors = issues
        .iter()
        .filter(|i| i.severity == LintSeverity::Error)
        .count();
    if errors > 0 {
        eprintln!("{errors} lint error(s) found");
        std::process::exit(1);
    }
}
