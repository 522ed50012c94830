use thiserror::Error;

/// Error raised by a hook handler. Boxed so handlers can surface anything
/// (same convention as the hook trait itself: callers only need `Display`).
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong inside a single task's pipeline.
///
/// Any of these aborts the remaining stages for that task only; the batch
/// decides via `exit_when_error` whether later tasks still run.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to create target directory {path}: {source}")]
    DirCreate {
        path: String,
        source: std::io::Error,
    },
    #[error("directory scan failed under {path}: {source}")]
    Scan {
        path: String,
        source: walkdir::Error,
    },
    #[error("invalid include/exclude pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("hook handler for `{event}` failed: {source}")]
    Hook {
        event: &'static str,
        source: HookError,
    },
}

/// Batch-level outcome when a task failure ends the whole run.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A task failed with `exit_when_error` set; remaining entries were
    /// abandoned. The binary maps this to a nonzero exit status.
    #[error("generation aborted after task for `{input}` failed: {source}")]
    Aborted { input: String, source: TaskError },
}
