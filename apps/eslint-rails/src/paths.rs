//! Target path normalization and the per-segment descendant test.
//!
//! A user may pass `widgets/form`, `app/assets/javascripts/widgets/form`
//! or an absolute path that already points inside the asset root. All
//! three end up as the same absolute target. Nothing here touches the
//! filesystem beyond a directory check, so a missing path is not an error:
//! it simply selects no assets later on.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Extension appended to extensionless file targets.
pub const DEFAULT_EXTENSION: &str = ".js";

/// Resolve `raw` to an absolute path under `project_root/asset_root`.
///
/// - A leading `asset_root/` prefix (or the absolute asset root) is stripped
///   before re-rooting, so normalizing an already-normalized path is a no-op.
/// - When the result is not an existing directory and carries no extension,
///   `.js` is appended to the file name.
pub fn normalize_target(raw: &str, project_root: &Path, asset_root: &str) -> PathBuf {
    let abs_root = project_root.join(asset_root);
    let rest = strip_asset_root(raw, &abs_root, asset_root);
    if rest.as_os_str().is_empty() {
        return abs_root;
    }
    let target = abs_root.join(&rest);
    if !target.is_dir() && target.extension().is_none() {
        let mut with_ext: OsString = target.into_os_string();
        with_ext.push(DEFAULT_EXTENSION);
        return PathBuf::from(with_ext);
    }
    target
}

fn strip_asset_root(raw: &str, abs_root: &Path, asset_root: &str) -> PathBuf {
    let raw_path = Path::new(raw);
    if raw_path.is_absolute() {
        if let Ok(rest) = raw_path.strip_prefix(abs_root) {
            return rest.to_path_buf();
        }
        return raw_path.to_path_buf();
    }
    let root = asset_root.trim_end_matches('/');
    if raw.trim_end_matches('/') == root {
        return PathBuf::new();
    }
    match raw.strip_prefix(root).and_then(|r| r.strip_prefix('/')) {
        Some(rest) => PathBuf::from(rest),
        None => PathBuf::from(raw),
    }
}

/// True when `candidate`'s leading segments equal all of `target`'s segments.
///
/// Comparison is per path segment, so `a/bc.js` is not a descendant of
/// `a/b` even though the strings share a prefix. A path equal to the
/// target counts as its own descendant.
pub fn is_descendant(target: &Path, candidate: &Path) -> bool {
    let target_segments: Vec<Component<'_>> = target.components().collect();
    let leading: Vec<Component<'_>> = candidate
        .components()
        .take(target_segments.len())
        .collect();
    leading == target_segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const ROOT: &str = "app/assets/javascripts";

    #[test]
    fn test_relative_input_is_rerooted_with_default_extension() {
        let dir = tempdir().unwrap();
        let out = normalize_target("widgets/form", dir.path(), ROOT);
        assert_eq!(out, dir.path().join(ROOT).join("widgets/form.js"));
    }

    #[test]
    fn test_asset_root_prefix_is_stripped() {
        let dir = tempdir().unwrap();
        let out = normalize_target("app/assets/javascripts/widgets/form.es6", dir.path(), ROOT);
        assert_eq!(out, dir.path().join(ROOT).join("widgets/form.es6"));
    }

    #[test]
    fn test_existing_directory_keeps_no_extension() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(ROOT).join("components")).unwrap();
        let out = normalize_target("components", dir.path(), ROOT);
        assert_eq!(out, dir.path().join(ROOT).join("components"));
    }

    #[test]
    fn test_empty_input_targets_whole_asset_root() {
        let dir = tempdir().unwrap();
        let out = normalize_target("", dir.path(), ROOT);
        assert_eq!(out, dir.path().join(ROOT));
        let out = normalize_target(ROOT, dir.path(), ROOT);
        assert_eq!(out, dir.path().join(ROOT));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(ROOT).join("components/widget")).unwrap();
        for raw in ["components/widget", "lib/util", "app/assets/javascripts/x.jsx", ""] {
            let once = normalize_target(raw, dir.path(), ROOT);
            let twice = normalize_target(once.to_str().unwrap(), dir.path(), ROOT);
            assert_eq!(once, twice, "input {raw:?}");
        }
    }

    #[test]
    fn test_descendant_is_segment_based() {
        let target = Path::new("a/b");
        assert!(is_descendant(target, Path::new("a/b/c.js")));
        assert!(is_descendant(target, Path::new("a/b")));
        assert!(!is_descendant(target, Path::new("a/bc.js")));
        assert!(!is_descendant(target, Path::new("a")));
        assert!(!is_descendant(target, Path::new("x/a/b/c.js")));
    }

    #[test]
    fn test_descendant_absolute_paths() {
        let target = Path::new("/srv/app/assets/javascripts/components");
        assert!(is_descendant(
            target,
            Path::new("/srv/app/assets/javascripts/components/deep/x.js")
        ));
        assert!(!is_descendant(
            target,
            Path::new("/srv/app/assets/javascripts/components2/x.js")
        ));
    }
}
