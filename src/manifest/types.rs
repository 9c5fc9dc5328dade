use serde::Deserialize;

use crate::keys::mirror_class_name;

/// Alias delimiter inside a module's scheme expression (`"app|web"`).
pub const SCHEME_DELIMITER: char = '|';

/// Top-level route manifest document as written by the user.
///
/// The manifest is the declarative metadata surface: one entry per handler
/// module, each carrying the module-level `{scheme, host}` pair and the
/// method-level path declarations.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestDoc {
    /// Display name of the routed application; used for the project slug.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modules: Vec<ModuleDecl>,
}

/// One declared handler module.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleDecl {
    /// Full Rust path of the handler type (e.g. `crate::handlers::MediaHandlers`).
    #[serde(default)]
    pub handler: String,
    /// Scheme expression; may alias several schemes with `|`.
    #[serde(default)]
    pub scheme: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub routes: Vec<RouteDecl>,
}

/// One declared route method inside a module.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDecl {
    /// Path key the method answers to (e.g. `/openViewer`).
    #[serde(default)]
    pub path: String,
    /// Name of the handler method; declarations without one are ignored.
    pub method: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
}

/// One declared method parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    /// Declared Rust type, used to bind the value inside the call thunk.
    #[serde(default = "default_param_ty")]
    pub ty: String,
}

fn default_param_ty() -> String {
    "serde_json::Value".to_string()
}

/// Compiled route-table entry for one module, ready for emission.
///
/// Derived from a [`ModuleDecl`] by [`build_modules`](super::build_modules);
/// never mutated afterwards and discarded once code emission is done.
#[derive(Debug, Clone)]
pub struct ModuleMeta {
    pub handler_path: String,
    /// All schemes the module answers to; the first is the primary.
    pub schemes: Vec<String>,
    /// Host, already normalized to lowercase.
    pub host: String,
    /// Route entries in declaration order. Duplicate path keys are kept
    /// as-is: the emitted constructor inserts them in order and the later
    /// one wins in the built mapping.
    pub routes: Vec<RouteMeta>,
}

impl ModuleMeta {
    /// Scheme before the first alias delimiter.
    #[must_use]
    pub fn primary_scheme(&self) -> &str {
        &self.schemes[0]
    }

    /// Every scheme after the first.
    #[must_use]
    pub fn alias_schemes(&self) -> &[String] {
        &self.schemes[1..]
    }

    /// Generated struct name for the primary dispatcher.
    #[must_use]
    pub fn primary_mirror_name(&self) -> String {
        mirror_class_name(self.primary_scheme(), &self.host)
    }

    /// Last segment of the handler path (the type identifier itself).
    #[must_use]
    pub fn handler_type(&self) -> &str {
        self.handler_path
            .rsplit("::")
            .next()
            .unwrap_or(&self.handler_path)
    }
}

/// Compiled unit for one route method.
#[derive(Debug, Clone)]
pub struct RouteMeta {
    /// Lowercased table key.
    pub path_key: String,
    pub method_name: String,
    /// Ordered declared parameters.
    pub params: Vec<ParamMeta>,
}

impl RouteMeta {
    /// Comma-joined parameter names, stored alongside the call thunk so
    /// the runtime can re-derive argument order without re-inspecting the
    /// declaration. Empty for zero-parameter routes, a bare name for
    /// single-parameter routes.
    #[must_use]
    pub fn arg_names(&self) -> String {
        self.params
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone)]
pub struct ParamMeta {
    pub name: String,
    pub ty: String,
}
