//! Accepted config shapes and their normalization into fully-defaulted
//! per-directory task configs. Normalization never fails: shape handling
//! happens here once so no later stage branches on config form.

use std::env;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::TaskError;
use crate::hooks::Hooks;
use crate::scan::normalize_slashes;

/// One include/exclude criterion: a glob-style string or a regex, matched
/// against the path relative to the target directory.
#[derive(Clone, Debug)]
pub enum Pattern {
    Glob(String),
    Regex(regex::Regex),
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Glob(s.to_string())
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::Glob(s)
    }
}

impl From<regex::Regex> for Pattern {
    fn from(re: regex::Regex) -> Self {
        Pattern::Regex(re)
    }
}

/// Key-by-key overrides for the recursive scan. Unset fields fall back to
/// the built-in defaults (`absolute = true`, `include_hidden = true`).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanOptions {
    pub absolute: Option<bool>,
    pub include_hidden: Option<bool>,
    pub follow_links: Option<bool>,
    pub max_depth: Option<usize>,
}

/// Generates one source line from a module reference.
pub type GenCode = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Receives a task's normalized error. Must not panic; whether the batch
/// continues afterwards is decided by `exit_when_error`, not by this handler.
pub type ErrorHandler = Arc<dyn Fn(&TaskError) + Send + Sync>;

/// Options shared by both config shapes. Every field optional so shared
/// defaults and per-entry overrides merge field-by-field (entry wins).
#[derive(Clone, Default)]
pub struct CommonOptions {
    pub cwd: Option<String>,
    pub out_file: Option<String>,
    pub include: Option<Vec<Pattern>>,
    pub exclude: Option<Vec<Pattern>>,
    pub only_files: Option<bool>,
    pub only_directories: Option<bool>,
    pub preserve_ext_name: Option<bool>,
    pub allow_empty: Option<bool>,
    pub scan: Option<ScanOptions>,
    pub gen_code: Option<GenCode>,
    pub insert_final_newline: Option<bool>,
    pub exit_when_error: Option<bool>,
    pub on_error: Option<ErrorHandler>,
    pub hooks: Option<Hooks>,
}

impl std::fmt::Debug for CommonOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommonOptions")
            .field("cwd", &self.cwd)
            .field("out_file", &self.out_file)
            .field("include", &self.include)
            .field("exclude", &self.exclude)
            .field("only_files", &self.only_files)
            .field("only_directories", &self.only_directories)
            .field("preserve_ext_name", &self.preserve_ext_name)
            .field("allow_empty", &self.allow_empty)
            .field("scan", &self.scan)
            .field("gen_code", &self.gen_code.as_ref().map(|_| ".."))
            .field("insert_final_newline", &self.insert_final_newline)
            .field("exit_when_error", &self.exit_when_error)
            .field("on_error", &self.on_error.as_ref().map(|_| ".."))
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl CommonOptions {
    /// Merge `shared` underneath `self`: entry-specific keys win.
    fn merged_over(self, shared: &CommonOptions) -> CommonOptions {
        CommonOptions {
            cwd: self.cwd.or_else(|| shared.cwd.clone()),
            out_file: self.out_file.or_else(|| shared.out_file.clone()),
            include: self.include.or_else(|| shared.include.clone()),
            exclude: self.exclude.or_else(|| shared.exclude.clone()),
            only_files: self.only_files.or(shared.only_files),
            only_directories: self.only_directories.or(shared.only_directories),
            preserve_ext_name: self.preserve_ext_name.or(shared.preserve_ext_name),
            allow_empty: self.allow_empty.or(shared.allow_empty),
            scan: self.scan.or_else(|| shared.scan.clone()),
            gen_code: self.gen_code.or_else(|| shared.gen_code.clone()),
            insert_final_newline: self.insert_final_newline.or(shared.insert_final_newline),
            exit_when_error: self.exit_when_error.or(shared.exit_when_error),
            on_error: self.on_error.or_else(|| shared.on_error.clone()),
            hooks: self.hooks.or_else(|| shared.hooks.clone()),
        }
    }
}

/// Config for a single target directory.
#[derive(Clone, Debug, Default)]
pub struct DirConfig {
    /// Directory to scan, resolved against `cwd`.
    pub input: String,
    pub options: CommonOptions,
}

impl DirConfig {
    pub fn new(input: impl Into<String>) -> Self {
        DirConfig {
            input: input.into(),
            options: CommonOptions::default(),
        }
    }
}

/// An entry of the shared-defaults form: a bare directory string or a
/// partial per-directory config.
#[derive(Clone, Debug)]
pub enum DirEntry {
    Path(String),
    Config(DirConfig),
}

/// The accepted config union: an ordered list of single-directory configs,
/// or shared defaults applied to a list of `dirs` entries.
#[derive(Clone, Debug)]
pub enum RawConfig {
    List(Vec<DirConfig>),
    Shared {
        defaults: CommonOptions,
        dirs: Vec<DirEntry>,
    },
}

/// A single-directory config with every optional field defaulted. Owned
/// exclusively by one task; `cwd` and `out_file` are rewritten in place
/// (absolute, normalized) during resolution.
#[derive(Clone)]
pub struct ResolvedConfig {
    pub cwd: String,
    pub input: String,
    pub out_file: Option<String>,
    pub include: Option<Vec<Pattern>>,
    pub exclude: Option<Vec<Pattern>>,
    pub only_files: Option<bool>,
    pub only_directories: Option<bool>,
    pub preserve_ext_name: bool,
    pub allow_empty: bool,
    pub scan: ScanOptions,
    pub gen_code: GenCode,
    pub insert_final_newline: bool,
    pub exit_when_error: bool,
    pub on_error: ErrorHandler,
    pub hooks: Hooks,
}

/// Flatten the accepted config shapes into an ordered list of
/// fully-defaulted task configs, preserving declaration order.
pub fn normalize(raw: RawConfig) -> Vec<ResolvedConfig> {
    let entries: Vec<DirConfig> = match raw {
        RawConfig::List(list) => list,
        RawConfig::Shared { defaults, dirs } => dirs
            .into_iter()
            .map(|entry| {
                let cfg = match entry {
                    DirEntry::Path(input) => DirConfig::new(input),
                    DirEntry::Config(cfg) => cfg,
                };
                DirConfig {
                    input: cfg.input,
                    options: cfg.options.merged_over(&defaults),
                }
            })
            .collect(),
    };
    entries.into_iter().map(apply_defaults).collect()
}

fn apply_defaults(cfg: DirConfig) -> ResolvedConfig {
    let o = cfg.options;
    ResolvedConfig {
        cwd: o.cwd.unwrap_or_else(default_cwd),
        input: cfg.input,
        out_file: o.out_file,
        include: o.include,
        exclude: o.exclude,
        only_files: o.only_files,
        only_directories: o.only_directories,
        preserve_ext_name: o.preserve_ext_name.unwrap_or(false),
        allow_empty: o.allow_empty.unwrap_or(true),
        scan: o.scan.unwrap_or_default(),
        gen_code: o.gen_code.unwrap_or_else(default_gen_code),
        insert_final_newline: o.insert_final_newline.unwrap_or(true),
        exit_when_error: o.exit_when_error.unwrap_or(true),
        on_error: o.on_error.unwrap_or_else(default_on_error),
        hooks: o.hooks.unwrap_or_default(),
    }
}

fn default_cwd() -> String {
    env::current_dir()
        .map(|p| normalize_slashes(&p.to_string_lossy()))
        .unwrap_or_else(|_| ".".to_string())
}

/// The default re-export generator: `export * from './<module>'`.
pub fn default_gen_code() -> GenCode {
    Arc::new(|module| format!("export * from './{module}'"))
}

fn default_on_error() -> ErrorHandler {
    Arc::new(|err| tracing::error!(error = %err, "generation task failed"))
}
