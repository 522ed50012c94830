//! TaskRunner: the strictly sequential stage machine for one directory.
//!
//! Stages run in a fixed order with no branching back: ensure target dir →
//! scan → resolve out-file → `configureResolved` → compute extension →
//! filter → `pathsResolved` → empty check → generate codes →
//! `codesGenerated` → assemble content → `contentGenerated` →
//! `beforeWrite` → write → `afterWrite`. Any stage error aborts the
//! remaining stages for this task only; the hook bus is dropped on every
//! exit path.

use std::fs;

use tracing::{debug, info};

use crate::codegen::{assemble_content, generate_codes};
use crate::config::ResolvedConfig;
use crate::error::TaskError;
use crate::filter::filter_paths;
use crate::hooks::{Event, ExecutionContext, HookBus};
use crate::scan::{ensure_target_dir, ext_of, resolve_out_file, scan};

/// Run the full pipeline for one resolved config. The write stage fully
/// overwrites the target file (no append, no atomic rename, no backup).
pub async fn run_task(mut config: ResolvedConfig) -> Result<(), TaskError> {
    ensure_target_dir(&mut config)?;
    let paths = scan(&config)?;
    resolve_out_file(&mut config, &paths);
    debug!(
        target_dir = %config.cwd,
        out_file = config.out_file.as_deref().unwrap_or_default(),
        discovered = paths.len(),
        "scan complete"
    );

    let hooks = HookBus::from_registrations(&config.hooks);
    let mut ctx = ExecutionContext {
        config,
        paths,
        codes: Vec::new(),
        content: None,
        ext_name: None,
    };

    hooks.emit(Event::ConfigureResolved, &mut ctx).await?;

    // Computed exactly once; reused for both filtering and stripping.
    let ext_name = ext_of(ctx.config.out_file.as_deref().unwrap_or_default());
    ctx.ext_name = Some(ext_name.clone());

    let discovered = std::mem::take(&mut ctx.paths);
    ctx.paths = filter_paths(&ctx.config, discovered, &ext_name)?;
    hooks.emit(Event::PathsResolved, &mut ctx).await?;

    if !ctx.config.allow_empty && ctx.paths.is_empty() {
        info!(target_dir = %ctx.config.cwd, "no paths retained and empty output disallowed, skipping write");
        hooks.emit(Event::Empty, &mut ctx).await?;
        return Ok(());
    }

    ctx.codes = generate_codes(&ctx.config, &ctx.paths);
    hooks.emit(Event::CodesGenerated, &mut ctx).await?;

    ctx.content = Some(assemble_content(&ctx.config, &ctx.codes));
    hooks.emit(Event::ContentGenerated, &mut ctx).await?;

    hooks.emit(Event::BeforeWrite, &mut ctx).await?;
    let out_file = ctx.config.out_file.clone().unwrap_or_default();
    let content = ctx.content.clone().unwrap_or_default();
    fs::write(&out_file, &content).map_err(|source| TaskError::Write {
        path: out_file.clone(),
        source,
    })?;
    info!(out_file = %out_file, lines = ctx.codes.len(), "index file written");
    hooks.emit(Event::AfterWrite, &mut ctx).await?;

    Ok(())
}
