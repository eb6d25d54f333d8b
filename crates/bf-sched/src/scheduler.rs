//! Run scheduler: submission surface and worker lifecycle.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use bf_core::State;
use bf_model::{Model, ModelError};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::worker::{worker_loop, RunRequest, WorkerShared};

/// Options for a static (equilibrium sweep) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticOptions {
    /// Parameter/attribute swept as the x-axis (e.g. `catch` or `effort`).
    pub independent_variable: String,
    pub min: f64,
    pub max: f64,
    /// Steps each equilibrium run executes before its result is trusted.
    pub convergence_time: usize,
}

/// Requested run mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunMode {
    /// Time-stepped trajectory.
    Dynamic,
    /// Equilibrium sweep over an independent variable.
    Static(StaticOptions),
}

/// Which worker produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunModeKind {
    Dynamic,
    Static,
}

/// A finished run: a state snapshot tagged with the mode that produced it.
///
/// Delivered at most once per accepted request and never mutated by the
/// producer afterwards.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub mode: RunModeKind,
    pub state: State,
}

pub(crate) type ResultCallback = Arc<dyn Fn(RunResult) + Send + Sync>;
pub(crate) type ErrorCallback = Arc<dyn Fn(ModelError) + Send + Sync>;

struct WorkerHandle {
    shared: Arc<WorkerShared>,
    handle: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    fn spawn(
        kind: RunModeKind,
        thread_name: &str,
        on_result: ResultCallback,
        on_error: ErrorCallback,
    ) -> Self {
        let shared = Arc::new(WorkerShared::new());
        let worker_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name(thread_name.to_string())
            .spawn(move || worker_loop(kind, worker_shared, on_result, on_error))
            .expect("failed to spawn scheduler worker");
        Self {
            shared,
            handle: Some(handle),
        }
    }

    /// Replace any pending request (latest-wins) and wake the worker.
    fn submit(&self, request: RunRequest) {
        self.shared.park(request);
    }

    /// Discard any pending request and mark in-flight work superseded.
    fn cancel(&self) {
        self.shared.cancel();
    }

    fn shutdown(&mut self) {
        self.shared.begin_shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Background run scheduler with one persistent worker per mode.
///
/// At most one worker is actively running at a time: submitting to one mode
/// marks any in-flight run of the other mode for cancellation. The model
/// handed to [`RunScheduler::submit`] is cloned at submission, so the caller
/// may keep mutating its own live model without synchronization.
pub struct RunScheduler {
    dynamic_worker: WorkerHandle,
    static_worker: WorkerHandle,
}

impl RunScheduler {
    /// Create a scheduler delivering results through `on_result`.
    ///
    /// Run-aborting configuration errors are logged; use
    /// [`RunScheduler::with_error_handler`] to observe them.
    pub fn new<F>(on_result: F) -> Self
    where
        F: Fn(RunResult) + Send + Sync + 'static,
    {
        Self::with_error_handler(on_result, |error: ModelError| {
            warn!(%error, "model run aborted");
        })
    }

    /// Create a scheduler with an explicit handler for aborted runs.
    pub fn with_error_handler<F, E>(on_result: F, on_error: E) -> Self
    where
        F: Fn(RunResult) + Send + Sync + 'static,
        E: Fn(ModelError) + Send + Sync + 'static,
    {
        let on_result: ResultCallback = Arc::new(on_result);
        let on_error: ErrorCallback = Arc::new(on_error);
        Self {
            dynamic_worker: WorkerHandle::spawn(
                RunModeKind::Dynamic,
                "bf-dynamic",
                Arc::clone(&on_result),
                Arc::clone(&on_error),
            ),
            static_worker: WorkerHandle::spawn(
                RunModeKind::Static,
                "bf-static",
                on_result,
                on_error,
            ),
        }
    }

    /// Submit a run request. Never blocks.
    ///
    /// Latest-wins per mode: only the most recent pending request is ever
    /// honored, and a newer submission supersedes the in-flight run of
    /// either mode at its next step/sample boundary.
    pub fn submit(&self, model: &Model, steps: usize, mode: RunMode) {
        match mode {
            RunMode::Dynamic => {
                self.static_worker.cancel();
                self.dynamic_worker.submit(RunRequest {
                    model: model.clone(),
                    steps,
                    options: None,
                });
            }
            RunMode::Static(options) => {
                self.dynamic_worker.cancel();
                self.static_worker.submit(RunRequest {
                    model: model.clone(),
                    steps,
                    options: Some(options),
                });
            }
        }
    }
}

impl Drop for RunScheduler {
    fn drop(&mut self) {
        self.dynamic_worker.shutdown();
        self.static_worker.shutdown();
    }
}

impl std::fmt::Debug for RunScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunScheduler").finish_non_exhaustive()
    }
}
