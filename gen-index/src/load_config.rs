//! `load_config`: parses the user-facing YAML config and adapts it into the
//! core [`RawConfig`] union.
//!
//! This is the only place untrusted YAML is parsed and mapped to the typed
//! domain config — the adapter layer decoupling the input schema from the
//! core. Keys use camelCase (`outFile`, `preserveExtName`, ...). Function-
//! valued options (`genCode`, `onError`, `hooks`) are programmatic-only and
//! keep their defaults when configs come from a file; YAML pattern strings
//! are glob-style (regex patterns are programmatic-only).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{error, info};

use gen_index_core::config::{
    CommonOptions, DirConfig, DirEntry, Pattern, RawConfig, ScanOptions,
};

/// A pattern field accepts a single string or a list of strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_patterns(self) -> Vec<Pattern> {
        match self {
            OneOrMany::One(s) => vec![Pattern::Glob(s)],
            OneOrMany::Many(list) => list.into_iter().map(Pattern::Glob).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CommonSection {
    cwd: Option<String>,
    out_file: Option<String>,
    include: Option<OneOrMany>,
    exclude: Option<OneOrMany>,
    only_files: Option<bool>,
    only_directories: Option<bool>,
    preserve_ext_name: Option<bool>,
    allow_empty: Option<bool>,
    glob: Option<ScanOptions>,
    insert_final_newline: Option<bool>,
    exit_when_error: Option<bool>,
}

impl CommonSection {
    fn into_options(self) -> CommonOptions {
        CommonOptions {
            cwd: self.cwd,
            out_file: self.out_file,
            include: self.include.map(OneOrMany::into_patterns),
            exclude: self.exclude.map(OneOrMany::into_patterns),
            only_files: self.only_files,
            only_directories: self.only_directories,
            preserve_ext_name: self.preserve_ext_name,
            allow_empty: self.allow_empty,
            scan: self.glob,
            insert_final_newline: self.insert_final_newline,
            exit_when_error: self.exit_when_error,
            ..CommonOptions::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct DirSection {
    input: String,
    #[serde(flatten)]
    common: CommonSection,
}

impl DirSection {
    fn into_config(self) -> DirConfig {
        DirConfig {
            input: self.input,
            options: self.common.into_options(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntrySection {
    Path(String),
    Config(DirSection),
}

#[derive(Debug, Deserialize)]
struct SharedSection {
    #[serde(flatten)]
    common: CommonSection,
    dirs: Vec<EntrySection>,
}

/// The accepted file shapes: a sequence of dir configs, or a mapping with
/// shared defaults plus `dirs`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigFile {
    List(Vec<DirSection>),
    Shared(SharedSection),
}

/// Load a YAML config file and adapt it into the core config union.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RawConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "loading configuration from file");

    let content = fs::read_to_string(path_ref).with_context(|| {
        error!(config_path = ?path_ref, "failed to read config file");
        format!("failed to read config file {}", path_ref.display())
    })?;

    let parsed: ConfigFile = serde_yaml::from_str(&content).with_context(|| {
        error!(config_path = ?path_ref, "failed to parse config YAML");
        format!("failed to parse config YAML {}", path_ref.display())
    })?;

    let raw = match parsed {
        ConfigFile::List(sections) => {
            RawConfig::List(sections.into_iter().map(DirSection::into_config).collect())
        }
        ConfigFile::Shared(shared) => RawConfig::Shared {
            defaults: shared.common.into_options(),
            dirs: shared
                .dirs
                .into_iter()
                .map(|entry| match entry {
                    EntrySection::Path(input) => DirEntry::Path(input),
                    EntrySection::Config(section) => DirEntry::Config(section.into_config()),
                })
                .collect(),
        },
    };
    info!(config_path = ?path_ref, "configuration parsed");
    Ok(raw)
}
