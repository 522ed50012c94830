//! Include/exclude filtering, self-exclusion of the output file, and
//! extension stripping.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::config::{Pattern, ResolvedConfig};
use crate::error::TaskError;
use crate::scan::{relative_to, resolve_path};

/// A compiled criteria set: matches when any glob or regex matches.
struct CompiledSet {
    globs: Option<GlobSet>,
    regexes: Vec<regex::Regex>,
}

impl CompiledSet {
    fn matches(&self, rel: &str) -> bool {
        self.globs.as_ref().is_some_and(|g| g.is_match(rel))
            || self.regexes.iter().any(|r| r.is_match(rel))
    }

    fn is_empty(&self) -> bool {
        self.globs.is_none() && self.regexes.is_empty()
    }
}

fn compile(patterns: &[Pattern]) -> Result<CompiledSet, TaskError> {
    let mut builder = GlobSetBuilder::new();
    let mut any_glob = false;
    let mut regexes = Vec::new();
    for pattern in patterns {
        match pattern {
            Pattern::Glob(glob) => {
                // `*` must not cross a path separator, so a top-level
                // pattern like `*.ts` does not match `sub/c.ts`
                let compiled = GlobBuilder::new(glob)
                    .literal_separator(true)
                    .build()
                    .map_err(|e| TaskError::Pattern {
                        pattern: glob.clone(),
                        message: e.to_string(),
                    })?;
                builder.add(compiled);
                any_glob = true;
            }
            Pattern::Regex(re) => regexes.push(re.clone()),
        }
    }
    let globs = if any_glob {
        Some(builder.build().map_err(|e| TaskError::Pattern {
            pattern: String::new(),
            message: e.to_string(),
        })?)
    } else {
        None
    };
    Ok(CompiledSet { globs, regexes })
}

/// Apply include/exclude rules and self-exclusion, then strip the output
/// extension from every retained path unless `preserve_ext_name` is set.
///
/// A path is retained iff the include criteria match (an absent or empty
/// `include` means match-all) and no exclude criterion matches; the
/// resolved output file is
/// always dropped regardless of patterns. Stripping removes the first
/// occurrence of the extension token from the whole path string — this is
/// deliberately not path-suffix-aware, matching the original behavior.
pub fn filter_paths(
    config: &ResolvedConfig,
    paths: Vec<String>,
    ext_name: &str,
) -> Result<Vec<String>, TaskError> {
    let include = config
        .include
        .as_deref()
        .map(compile)
        .transpose()?
        .filter(|set| !set.is_empty());
    let exclude = config.exclude.as_deref().map(compile).transpose()?;
    let out_file = config.out_file.as_deref().unwrap_or_default();
    let dir = &config.cwd;

    let mut retained = Vec::new();
    for path in paths {
        let absolute = resolve_path(dir, &path);
        if absolute == out_file {
            continue;
        }
        let rel = relative_to(dir, &absolute);
        if let Some(include) = &include {
            if !include.matches(&rel) {
                continue;
            }
        }
        if let Some(exclude) = &exclude {
            if exclude.matches(&rel) {
                continue;
            }
        }
        retained.push(path);
    }

    if !config.preserve_ext_name && !ext_name.is_empty() {
        retained = retained
            .into_iter()
            .map(|p| p.replacen(ext_name, "", 1))
            .collect();
    }
    Ok(retained)
}
