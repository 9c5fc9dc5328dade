use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::templates::{
    write_alias, write_mirror, write_mod_rs, AliasTemplateData, MirrorTemplateData, ModEntry,
};
use crate::keys::{mirror_class_name, mirror_module_name};
use crate::manifest::{load_manifest, ModuleMeta};

/// Compile a route manifest and emit one dispatcher file per
/// (module, scheme) pair plus the namespace `mod.rs`.
///
/// Emission is all-or-nothing per file: a collision or write failure for
/// one mirror is reported and that file skipped while the rest of the
/// batch proceeds. Returns the output directory.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or the output
/// directory cannot be prepared; per-file failures are diagnostics only.
pub fn generate_mirrors(
    manifest_path: &Path,
    output: Option<&Path>,
    force: bool,
    dry_run: bool,
) -> anyhow::Result<PathBuf> {
    let (modules, slug) = load_manifest(manifest_path)?;
    let out_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Path::new("src").join("mirrors"));
    if !dry_run {
        fs::create_dir_all(&out_dir)?;
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for module in &modules {
        emit_module(module, &out_dir, force, dry_run, &mut seen, &mut entries);
    }

    if dry_run {
        println!(
            "dry run: {} mirror file(s) for `{slug}` would land in {out_dir:?}",
            entries.len()
        );
    } else {
        write_mod_rs(&out_dir, &entries)?;
    }
    Ok(out_dir)
}

fn emit_module(
    module: &ModuleMeta,
    out_dir: &Path,
    force: bool,
    dry_run: bool,
    seen: &mut HashSet<String>,
    entries: &mut Vec<ModEntry>,
) {
    let class = module.primary_mirror_name();
    let file_mod = mirror_module_name(module.primary_scheme(), &module.host);

    // Name collision with an earlier module: skip the whole module (the
    // aliases would otherwise forward to someone else's dispatcher).
    if !seen.insert(file_mod.clone()) {
        warn!(class = %class, "unable to write same name, skipping module");
        return;
    }

    if dry_run {
        println!("would generate mirror: {file_mod}.rs");
    } else {
        let data = MirrorTemplateData::from_module(module);
        if let Err(e) = write_mirror(&out_dir.join(format!("{file_mod}.rs")), &data, force) {
            warn!(class = %class, error = %e, "failed to write mirror, continuing");
            return;
        }
    }
    entries.push(ModEntry {
        module: file_mod.clone(),
        class: class.clone(),
    });

    for scheme in module.alias_schemes() {
        let alias_class = mirror_class_name(scheme, &module.host);
        let alias_mod = mirror_module_name(scheme, &module.host);
        if !seen.insert(alias_mod.clone()) {
            warn!(class = %alias_class, "unable to write same name, skipping alias");
            continue;
        }

        if dry_run {
            println!("would generate alias: {alias_mod}.rs");
        } else {
            let data = AliasTemplateData {
                alias_name: alias_class.clone(),
                scheme: scheme.clone(),
                host: module.host.clone(),
                primary_module: file_mod.clone(),
                primary_name: class.clone(),
            };
            if let Err(e) = write_alias(&out_dir.join(format!("{alias_mod}.rs")), &data, force) {
                warn!(class = %alias_class, error = %e, "failed to write alias, continuing");
                continue;
            }
        }
        entries.push(ModEntry {
            module: alias_mod,
            class: alias_class,
        });
    }
}

/// Run rustfmt over the emitted files.
///
/// # Errors
///
/// Returns an error if rustfmt cannot be spawned or reports failure
pub fn format_generated(dir: &Path) -> anyhow::Result<()> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map(|e| e == "rs").unwrap_or(false) {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Ok(());
    }
    let status = std::process::Command::new("rustfmt")
        .args(&files)
        .status()?;
    if !status.success() {
        anyhow::bail!("rustfmt failed");
    }
    Ok(())
}
