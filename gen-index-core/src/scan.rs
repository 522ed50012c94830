//! Target-directory resolution and recursive filesystem scanning.

use std::fs;
use std::path::{Component, Path};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::ResolvedConfig;
use crate::error::TaskError;

/// Rewrite platform separators to forward slashes.
pub fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Lexically resolve `rel` against `base` (no symlink traversal): absolute
/// inputs stand alone, `.` and `..` components collapse, separators are
/// normalized to forward slashes.
pub fn resolve_path(base: &str, rel: &str) -> String {
    let rel_path = Path::new(rel);
    let joined = if rel_path.is_absolute() {
        rel_path.to_path_buf()
    } else {
        Path::new(base).join(rel_path)
    };
    let joined = if joined.is_absolute() {
        joined
    } else {
        std::env::current_dir().unwrap_or_default().join(joined)
    };

    let mut parts: Vec<String> = Vec::new();
    let mut prefix = String::new();
    for component in joined.components() {
        match component {
            Component::Prefix(p) => prefix = p.as_os_str().to_string_lossy().into_owned(),
            Component::RootDir => {}
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(seg) => parts.push(seg.to_string_lossy().into_owned()),
        }
    }
    normalize_slashes(&format!("{}/{}", prefix, parts.join("/")))
}

/// Path relative to `dir`, or the path unchanged when it is not below `dir`
/// (hooks may inject foreign paths).
pub fn relative_to(dir: &str, path: &str) -> String {
    if let Some(rest) = path.strip_prefix(dir) {
        if rest.is_empty() {
            return String::new();
        }
        if let Some(rest) = rest.strip_prefix('/') {
            return rest.to_string();
        }
    }
    path.to_string()
}

/// Extension token of a path, leading dot included (`.ts`); empty when the
/// file name has none. Dotfiles (`.env`) count as extensionless.
pub fn ext_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_string(),
        _ => String::new(),
    }
}

/// Resolve the target directory from `cwd` and `input`, create it (and
/// parents) if absent, and rewrite `cwd` in place to the absolute,
/// normalized target path. Creation must succeed before scanning.
pub fn ensure_target_dir(config: &mut ResolvedConfig) -> Result<(), TaskError> {
    let dir = resolve_path(&config.cwd, &config.input);
    fs::create_dir_all(&dir).map_err(|source| TaskError::DirCreate {
        path: dir.clone(),
        source,
    })?;
    debug!(target_dir = %dir, "target directory ensured");
    config.cwd = dir;
    Ok(())
}

/// Enumerate every descendant (files and directories, hidden entries
/// included) of the resolved target directory, in scanner-native order.
/// Scan options override the built-in defaults key by key.
pub fn scan(config: &ResolvedConfig) -> Result<Vec<String>, TaskError> {
    let dir = &config.cwd;
    let options = &config.scan;
    let absolute = options.absolute.unwrap_or(true);
    let include_hidden = options.include_hidden.unwrap_or(true);

    let mut walker = WalkDir::new(dir)
        .min_depth(1)
        .follow_links(options.follow_links.unwrap_or(false));
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut paths = Vec::new();
    let entries = walker.into_iter().filter_entry(|entry| {
        include_hidden
            || !entry
                .file_name()
                .to_string_lossy()
                .starts_with('.')
    });
    for entry in entries {
        let entry = entry.map_err(|source| TaskError::Scan {
            path: dir.clone(),
            source,
        })?;
        let file_type = entry.file_type();
        if config.only_files == Some(true) && !file_type.is_file() {
            continue;
        }
        if config.only_directories == Some(true) && !file_type.is_dir() {
            continue;
        }
        let full = normalize_slashes(&entry.path().to_string_lossy());
        if absolute {
            paths.push(full);
        } else {
            paths.push(relative_to(dir, &full));
        }
    }
    Ok(paths)
}

/// Output-file resolution: runs after discovery, before filtering. An unset
/// `out_file` derives as `index` plus the extension of the first discovered
/// path; either way the result is rewritten in place as an absolute,
/// normalized path under the target directory.
pub fn resolve_out_file(config: &mut ResolvedConfig, paths: &[String]) {
    let out = match config.out_file.take() {
        Some(f) => f,
        None => format!(
            "index{}",
            paths.first().map(|p| ext_of(p)).unwrap_or_default()
        ),
    };
    config.out_file = Some(resolve_path(&config.cwd, &out));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_joins_and_collapses() {
        assert_eq!(resolve_path("/a/b", "src"), "/a/b/src");
        assert_eq!(resolve_path("/a/b", "../c"), "/a/c");
        assert_eq!(resolve_path("/a/b", "./c/./d"), "/a/b/c/d");
        assert_eq!(resolve_path("/a/b", "/abs/x"), "/abs/x");
    }

    #[test]
    fn relative_to_requires_separator_boundary() {
        assert_eq!(relative_to("/a/b", "/a/b/x/y"), "x/y");
        assert_eq!(relative_to("/a/b", "/a/bc/x"), "/a/bc/x");
        assert_eq!(relative_to("/a/b", "/a/b"), "");
    }

    #[test]
    fn ext_of_matches_extname_semantics() {
        assert_eq!(ext_of("/dir/index.ts"), ".ts");
        assert_eq!(ext_of("/dir/a.spec.ts"), ".ts");
        assert_eq!(ext_of("/dir/Makefile"), "");
        assert_eq!(ext_of("/dir/.env"), "");
        assert_eq!(ext_of("/dir/trailing."), ".");
    }
}
