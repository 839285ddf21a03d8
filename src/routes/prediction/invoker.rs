//! Runs the external prediction component as a child process.
//!
//! Children are spawned per invocation but gated by a semaphore, so at most
//! `workers` run at once and the rest queue. Each child is driven on its own
//! task which reports through a oneshot channel; the caller therefore sees
//! exactly one outcome per invocation. A child whose caller stops waiting, or
//! which outlives the configured timeout, is killed and its permit released.

use super::models::{PredictionInputs, PredictionResult};
use crate::config::Config;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::sync::{Semaphore, oneshot};
use tracing::{debug, error, warn};

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to launch prediction component `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("prediction worker pool is closed")]
    PoolClosed,

    #[error("prediction worker stopped without reporting")]
    WorkerLost,
}

#[derive(Clone)]
pub struct PredictionInvoker {
    program: String,
    leading_args: Vec<String>,
    workers: Arc<Semaphore>,
    timeout: Option<Duration>,
}

impl PredictionInvoker {
    pub fn new(program: impl Into<String>, leading_args: Vec<String>, workers: usize) -> Self {
        Self {
            program: program.into(),
            leading_args,
            workers: Arc::new(Semaphore::new(workers.max(1))),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        let timeout = (config.prediction_timeout_secs > 0)
            .then(|| Duration::from_secs(config.prediction_timeout_secs));
        Self::new(
            &config.prediction_program,
            config.prediction_args.clone(),
            config.prediction_workers,
        )
        .with_timeout(timeout)
    }

    /// Runs the component with the four inputs. Only a failure to start the
    /// process is an error; bad output degrades to a `Failed` result.
    pub async fn predict(&self, inputs: PredictionInputs) -> Result<PredictionResult, LaunchError> {
        let permit = self
            .workers
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| LaunchError::PoolClosed)?;

        let args = inputs.to_args();
        debug!(program = %self.program, ?args, "Launching prediction component");

        let child = Command::new(&self.program)
            .args(&self.leading_args)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| {
                error!(
                    program = %self.program,
                    error = %source,
                    "Failed to launch prediction component"
                );
                LaunchError::Spawn {
                    program: self.program.clone(),
                    source,
                }
            })?;

        let timeout = self.timeout;
        let (mut done, outcome) = oneshot::channel();
        tokio::spawn(async move {
            let _permit = permit;
            tokio::select! {
                // Dropping `collect` drops the child, which kills it
                _ = done.closed() => {
                    warn!("Prediction caller went away, stopping component");
                }
                result = collect(child, timeout) => {
                    let _ = done.send(result);
                }
            }
        });

        outcome.await.map_err(|_| LaunchError::WorkerLost)
    }
}

async fn collect(child: Child, timeout: Option<Duration>) -> PredictionResult {
    let waited = match timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(waited) => waited,
            Err(_) => {
                warn!(timeout_secs = limit.as_secs_f64(), "Prediction component timed out");
                return PredictionResult::unavailable();
            }
        },
        None => child.wait_with_output().await,
    };
    let output = match waited {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, "Failed to collect prediction output");
            return PredictionResult::unavailable();
        }
    };

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        warn!(stderr = %stderr.trim(), "Prediction component wrote to stderr");
    }
    if !output.status.success() {
        warn!(status = %output.status, "Prediction component exited unsuccessfully");
    }

    let result = PredictionResult::from_stdout(&output.stdout);
    if let PredictionResult::Failed { error } = &result {
        warn!(
            error = %error,
            stdout = %String::from_utf8_lossy(&output.stdout).trim(),
            "Prediction unavailable"
        );
    }
    result
}
