use tracing::debug;

use super::types::{
    ManifestDoc, ModuleDecl, ModuleMeta, ParamMeta, RouteDecl, RouteMeta, SCHEME_DELIMITER,
};
use crate::keys::normalize_key;

/// Compile raw manifest declarations into the in-memory route table.
///
/// Pure pass over the document: no I/O, no global state. Malformed
/// declarations are skipped rather than reported as errors so one bad
/// module never blocks emission for the others.
#[must_use]
pub fn build_modules(doc: &ManifestDoc) -> Vec<ModuleMeta> {
    doc.modules.iter().filter_map(build_module).collect()
}

fn build_module(decl: &ModuleDecl) -> Option<ModuleMeta> {
    if decl.handler.is_empty() {
        debug!(host = %decl.host, "skipping module without a handler type");
        return None;
    }
    // Empty scheme or host: the module is skipped entirely.
    if decl.scheme.is_empty() || decl.host.is_empty() {
        debug!(handler = %decl.handler, "skipping module with empty scheme or host");
        return None;
    }

    let schemes: Vec<String> = decl
        .scheme
        .split(SCHEME_DELIMITER)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if schemes.is_empty() {
        debug!(handler = %decl.handler, scheme = %decl.scheme, "scheme expression has no usable schemes");
        return None;
    }

    let routes = decl.routes.iter().filter_map(build_route).collect();

    Some(ModuleMeta {
        handler_path: decl.handler.clone(),
        schemes,
        host: normalize_key(&decl.host),
        routes,
    })
}

fn build_route(decl: &RouteDecl) -> Option<RouteMeta> {
    // Declarations without a path descriptor or a method name are ignored.
    if decl.path.is_empty() {
        return None;
    }
    let method_name = match &decl.method {
        Some(m) if !m.is_empty() => m.clone(),
        _ => {
            debug!(path = %decl.path, "skipping route without a method name");
            return None;
        }
    };

    let params = decl
        .params
        .iter()
        .map(|p| ParamMeta {
            name: p.name.clone(),
            ty: p.ty.clone(),
        })
        .collect();

    Some(RouteMeta {
        path_key: normalize_key(&decl.path),
        method_name,
        params,
    })
}
