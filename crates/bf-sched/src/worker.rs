//! Worker loop and run execution.

use std::sync::{Arc, Condvar, Mutex};

use bf_core::{linspace, State};
use bf_model::{Model, ModelResult};
use tracing::debug;

use crate::scheduler::{ErrorCallback, ResultCallback, RunModeKind, RunResult, StaticOptions};

/// Nudge applied to a collapsed sample's recorded independent value so the
/// sweep's x-axis stays monotone. Heuristic; only the ordering matters.
const COLLAPSE_EPSILON: f64 = 1e-6;

/// A run request parked in a worker's pending slot.
pub(crate) struct RunRequest {
    pub model: Model,
    pub steps: usize,
    /// Present for the static worker only.
    pub options: Option<StaticOptions>,
}

struct Slot {
    pending: Option<RunRequest>,
    shutdown: bool,
    /// Raised by a submission to the *other* mode; cleared in the same
    /// critical section that takes a pending request, so a cancellation can
    /// land either before pickup (the request is discarded) or after it
    /// (the flag survives to the next boundary check), never in between.
    cancel: bool,
}

/// State shared between a worker thread and the scheduler handle. All
/// transitions happen under the slot mutex.
pub(crate) struct WorkerShared {
    slot: Mutex<Slot>,
    wake: Condvar,
}

impl WorkerShared {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                pending: None,
                shutdown: false,
                cancel: false,
            }),
            wake: Condvar::new(),
        }
    }

    /// Park a request in the pending slot, replacing any unserved one, and
    /// wake the worker.
    pub fn park(&self, request: RunRequest) {
        let mut slot = self.slot.lock().expect("worker slot poisoned");
        slot.pending = Some(request);
        drop(slot);
        self.wake.notify_one();
    }

    /// Invalidate both the pending request and any in-flight run.
    pub fn cancel(&self) {
        let mut slot = self.slot.lock().expect("worker slot poisoned");
        slot.pending = None;
        slot.cancel = true;
    }

    /// Tell the worker to exit once it next checks the slot.
    pub fn begin_shutdown(&self) {
        let mut slot = self.slot.lock().expect("worker slot poisoned");
        slot.pending = None;
        slot.cancel = true;
        slot.shutdown = true;
        drop(slot);
        self.wake.notify_one();
    }

    /// Block until a request is parked or shutdown is requested. Taking the
    /// request and clearing the cancel flag form one critical section.
    pub fn next_request(&self) -> Option<RunRequest> {
        let mut slot = self.slot.lock().expect("worker slot poisoned");
        loop {
            if slot.shutdown {
                return None;
            }
            if let Some(request) = slot.pending.take() {
                slot.cancel = false;
                return Some(request);
            }
            slot = self.wake.wait(slot).expect("worker slot poisoned");
        }
    }

    /// True once a newer request has invalidated the in-flight run.
    fn superseded(&self) -> bool {
        let slot = self.slot.lock().expect("worker slot poisoned");
        slot.cancel || slot.pending.is_some()
    }
}

/// Persistent worker: sleeps until a request is parked, executes it, and
/// delivers the result unless the run was superseded along the way.
pub(crate) fn worker_loop(
    kind: RunModeKind,
    shared: Arc<WorkerShared>,
    on_result: ResultCallback,
    on_error: ErrorCallback,
) {
    loop {
        let Some(request) = shared.next_request() else {
            return;
        };
        debug!(?kind, steps = request.steps, "worker picked up run");

        let superseded = || shared.superseded();
        let outcome = match kind {
            RunModeKind::Dynamic => run_dynamic(request.model, request.steps, &superseded),
            RunModeKind::Static => {
                let options = request
                    .options
                    .expect("static worker request carries options");
                run_static(request.model, request.steps, &options, &superseded)
            }
        };

        match outcome {
            Ok(Some(state)) => {
                debug!(?kind, "run complete, delivering result");
                on_result(RunResult { mode: kind, state });
            }
            Ok(None) => debug!(?kind, "run superseded, result discarded"),
            Err(error) => on_error(error),
        }
    }
}

/// Advance the model `steps` time steps, checking for supersession at every
/// step boundary. `Ok(None)` means the run was abandoned.
pub(crate) fn run_dynamic(
    mut model: Model,
    steps: usize,
    superseded: &dyn Fn() -> bool,
) -> ModelResult<Option<State>> {
    for _ in 0..steps {
        if superseded() {
            return Ok(None);
        }
        model.run(1, false)?;
    }
    if superseded() {
        return Ok(None);
    }
    Ok(Some(model.state().clone()))
}

/// Sweep `steps` evenly spaced samples of the independent variable over
/// `[min, max]`, converging each to equilibrium, and accumulate the last
/// step of every attribute into a fresh output state.
pub(crate) fn run_static(
    mut model: Model,
    steps: usize,
    options: &StaticOptions,
    superseded: &dyn Fn() -> bool,
) -> ModelResult<Option<State>> {
    let variable = options.independent_variable.as_str();
    let samples = linspace(options.min, options.max, steps);

    let mut output = model.state().clone();
    output.reset();

    for (index, &sample) in samples.iter().enumerate() {
        if superseded() {
            return Ok(None);
        }

        // Pin the independent variable in both the initial state and the
        // parameter overrides, then run to convergence from scratch.
        model.reset();
        model.state_mut().seed(variable, sample)?;
        model.set_parameter(variable, sample);
        model.run(options.convergence_time, true)?;

        output.push_current_from(model.state())?;

        // A converged value under the requested sample means the stock
        // collapsed at this level; record it just above the previous sample
        // so the output's x-axis stays monotone.
        let converged = model.state().get(variable)?;
        if converged < sample && index > 0 {
            output.set(variable, samples[index - 1] + COLLAPSE_EPSILON)?;
        }
    }

    if superseded() {
        return Ok(None);
    }
    Ok(Some(output))
}
