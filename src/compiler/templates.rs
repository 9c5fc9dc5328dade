use askama::Template;
use std::fs;
use std::path::Path;

use crate::manifest::{ModuleMeta, ParamMeta, RouteMeta};

/// One route entry as seen by the mirror template.
#[derive(Debug, Clone)]
pub struct RouteContext {
    /// Lowercased table key.
    pub path_key: String,
    /// Handler method to bind.
    pub method_name: String,
    /// Comma-joined parameter names stored under the ARGS key.
    pub arg_names: String,
    /// Ordered parameters for the call thunk bindings.
    pub params: Vec<ParamContext>,
}

#[derive(Debug, Clone)]
pub struct ParamContext {
    pub name: String,
    pub ty: String,
}

/// Template data for one primary dispatcher source file.
#[derive(Template)]
#[template(path = "mirror.rs.txt", escape = "none")]
pub struct MirrorTemplateData {
    /// Generated struct name (`Mirror_<scheme>_<host>`).
    pub mirror_name: String,
    /// Primary scheme, verbatim.
    pub scheme: String,
    /// Host, already lowercased.
    pub host: String,
    /// Full Rust path of the handler type.
    pub handler_path: String,
    /// Bare handler type identifier.
    pub handler_type: String,
    /// Route entries in declaration order. Duplicate path keys stay in
    /// order so the later insert wins in the built mapping.
    pub routes: Vec<RouteContext>,
}

impl MirrorTemplateData {
    /// Build the template context for a module's primary dispatcher.
    #[must_use]
    pub fn from_module(module: &ModuleMeta) -> Self {
        MirrorTemplateData {
            mirror_name: module.primary_mirror_name(),
            scheme: module.primary_scheme().to_string(),
            host: module.host.clone(),
            handler_path: module.handler_path.clone(),
            handler_type: module.handler_type().to_string(),
            routes: module.routes.iter().map(route_context).collect(),
        }
    }
}

fn route_context(route: &RouteMeta) -> RouteContext {
    RouteContext {
        path_key: route.path_key.clone(),
        method_name: route.method_name.clone(),
        arg_names: route.arg_names(),
        params: route
            .params
            .iter()
            .map(|ParamMeta { name, ty }| ParamContext {
                name: name.clone(),
                ty: ty.clone(),
            })
            .collect(),
    }
}

/// Template data for one forwarding dispatcher source file.
#[derive(Template)]
#[template(path = "alias.rs.txt", escape = "none")]
pub struct AliasTemplateData {
    /// Generated struct name for the alias scheme.
    pub alias_name: String,
    /// Alias scheme, verbatim.
    pub scheme: String,
    pub host: String,
    /// Module file of the primary dispatcher this alias forwards to.
    pub primary_module: String,
    /// Struct name of the primary dispatcher.
    pub primary_name: String,
}

/// One `pub mod`/`pub use` pair in the generated namespace module.
#[derive(Debug, Clone)]
pub struct ModEntry {
    pub module: String,
    pub class: String,
}

/// Template data for the generated `mod.rs`.
#[derive(Template)]
#[template(path = "mod.rs.txt", escape = "none")]
pub struct ModRsTemplateData {
    pub entries: Vec<ModEntry>,
}

/// Write a primary dispatcher file.
///
/// Existing files are left alone unless `force` is set.
///
/// # Errors
///
/// Returns an error if template rendering or file writing fails
pub fn write_mirror(path: &Path, data: &MirrorTemplateData, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        println!("⚠️  Skipping existing mirror file: {path:?}");
        return Ok(());
    }
    fs::write(path, data.render()?)?;
    println!("✅ Generated mirror: {path:?}");
    Ok(())
}

/// Write a forwarding dispatcher file.
///
/// # Errors
///
/// Returns an error if template rendering or file writing fails
pub fn write_alias(path: &Path, data: &AliasTemplateData, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        println!("⚠️  Skipping existing alias file: {path:?}");
        return Ok(());
    }
    fs::write(path, data.render()?)?;
    println!("✅ Generated alias: {path:?}");
    Ok(())
}

/// Write the `mod.rs` declaring every emitted mirror (internal helper).
///
/// # Errors
///
/// Returns an error if file writing fails
pub(crate) fn write_mod_rs(dir: &Path, entries: &[ModEntry]) -> anyhow::Result<()> {
    let path = dir.join("mod.rs");
    let rendered = ModRsTemplateData {
        entries: entries.to_vec(),
    }
    .render()?;
    fs::write(path.clone(), rendered)?;
    println!("✅ Updated mod.rs for mirrors → {path:?}");
    Ok(())
}
