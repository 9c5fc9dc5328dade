use std::path::Path;

use super::build::build_modules;
use super::types::{ManifestDoc, ModuleMeta};

/// Load a route manifest and compile it into module metadata.
///
/// The file format is chosen by extension: `.yaml`/`.yml` parse as YAML,
/// anything else as JSON. Returns the compiled modules plus the project
/// slug derived from the manifest name.
pub fn load_manifest(file_path: &Path) -> anyhow::Result<(Vec<ModuleMeta>, String)> {
    let doc = read_manifest(file_path)?;
    let slug = slugify(&doc.name);
    let modules = build_modules(&doc);
    Ok((modules, slug))
}

/// Parse a manifest file without compiling it. Used by the linter, which
/// needs to see the raw declarations the compiler would skip.
pub fn read_manifest(file_path: &Path) -> anyhow::Result<ManifestDoc> {
    let content = std::fs::read_to_string(file_path)?;
    let is_yaml = file_path
        .extension()
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);
    let doc: ManifestDoc = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(doc)
}

fn slugify(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .replace(|c: char| !c.is_ascii_alphanumeric(), "_")
        .trim_matches('_')
        .to_string();
    if slug.is_empty() {
        "mirrors".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Media Library"), "media_library");
        assert_eq!(slugify("  "), "mirrors");
        assert_eq!(slugify("App-2.0"), "app_2_0");
    }
}
