//! Batch orchestration: normalize the accepted config union, then run one
//! task per directory strictly in declaration order. Later tasks may depend
//! on files earlier tasks just wrote, so tasks never run in parallel.

use tracing::{error, info};

use crate::config::{normalize, RawConfig};
use crate::error::BatchError;
use crate::task::run_task;

/// Entry point: generate index files for every configured directory.
///
/// Each task failure — including one raised inside a hook handler — is
/// passed to that config's `on_error` handler. With `exit_when_error` set
/// (the default) the batch aborts immediately and the error propagates to
/// the caller; otherwise the batch continues with the next config. No
/// retries, no error aggregation.
pub async fn generate(config: RawConfig) -> Result<(), BatchError> {
    let tasks = normalize(config);
    info!(tasks = tasks.len(), "starting index generation batch");

    for task_config in tasks {
        let input = task_config.input.clone();
        let exit_when_error = task_config.exit_when_error;
        let on_error = task_config.on_error.clone();

        if let Err(err) = run_task(task_config).await {
            (on_error)(&err);
            if exit_when_error {
                error!(input = %input, "task failed, abandoning remaining entries");
                return Err(BatchError::Aborted { input, source: err });
            }
            info!(input = %input, "task failed, continuing with next entry");
        }
    }
    Ok(())
}
