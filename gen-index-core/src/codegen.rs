//! Code generation and content assembly.

use crate::config::ResolvedConfig;
use crate::scan::relative_to;

/// One generated line per retained path: the module reference is the path
/// relative to the target directory (posix separators), fed through the
/// configured `gen_code` callback.
pub fn generate_codes(config: &ResolvedConfig, paths: &[String]) -> Vec<String> {
    paths
        .iter()
        .map(|path| (config.gen_code)(&relative_to(&config.cwd, path)))
        .collect()
}

/// Join generated lines with a single newline. With `insert_final_newline`
/// set, append exactly one newline unless the joined string already ends in
/// one (a trailing `\r\n` counts). No other normalization.
pub fn assemble_content(config: &ResolvedConfig, codes: &[String]) -> String {
    let mut content = codes.join("\n");
    if config.insert_final_newline && !content.ends_with('\n') {
        content.push('\n');
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{normalize, DirConfig, RawConfig, ResolvedConfig};
    use std::sync::Arc;

    fn resolved_for(dir: &str) -> ResolvedConfig {
        let mut cfg = normalize(RawConfig::List(vec![DirConfig::new(dir)]))
            .pop()
            .expect("one config");
        cfg.cwd = dir.to_string();
        cfg
    }

    #[test]
    fn codes_use_relative_module_paths() {
        let cfg = resolved_for("/proj/src");
        let codes = generate_codes(
            &cfg,
            &["/proj/src/a".to_string(), "/proj/src/nested/b".to_string()],
        );
        assert_eq!(
            codes,
            vec!["export * from './a'", "export * from './nested/b'"]
        );
    }

    #[test]
    fn custom_gen_code_callback_is_applied() {
        let mut cfg = resolved_for("/proj/src");
        cfg.gen_code = Arc::new(|module| format!("module.exports.{module} = require('./{module}')"));
        let codes = generate_codes(&cfg, &["/proj/src/a".to_string()]);
        assert_eq!(codes, vec!["module.exports.a = require('./a')"]);
    }

    #[test]
    fn final_newline_appended_exactly_once() {
        let cfg = resolved_for("/proj/src");
        assert_eq!(assemble_content(&cfg, &["a".into(), "b".into()]), "a\nb\n");
        assert_eq!(assemble_content(&cfg, &["a\n".into()]), "a\n");
        assert_eq!(assemble_content(&cfg, &["a\r\n".into()]), "a\r\n");
        assert_eq!(assemble_content(&cfg, &[]), "\n");
    }

    #[test]
    fn no_final_newline_leaves_join_untouched() {
        let mut cfg = resolved_for("/proj/src");
        cfg.insert_final_newline = false;
        assert_eq!(assemble_content(&cfg, &["a".into(), "b".into()]), "a\nb");
        assert_eq!(assemble_content(&cfg, &[]), "");
    }
}
