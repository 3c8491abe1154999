//! Per-session shared state.

use std::sync::Arc;

use orrery_core::error::StepError;
use orrery_core::status::{SimulationStatus, StatusCell};
use orrery_core::traits::SimulationDefinition;
use orrery_core::tree::RuntimeTree;

/// Per-session state bundle: the simulation definition, the runtime
/// state tree, and the shared status cell.
///
/// The context is moved into the update thread when the scheduler is
/// spawned and recovered through
/// [`UpdateScheduler::join`](crate::UpdateScheduler::join). The tree
/// is exclusively owned: only the update thread's pipeline mutates it
/// while the session runs. The status cell is the one piece shared
/// with the outside — an external controller stops the session by
/// storing through its `Arc`.
#[derive(Debug)]
pub struct SessionContext {
    /// Static description of the simulation being run.
    pub definition: SimulationDefinition,
    /// Live simulation state.
    pub tree: RuntimeTree,
    status: Arc<StatusCell>,
    errors: Vec<StepError>,
}

impl SessionContext {
    /// Create an idle session around a definition and initial tree.
    pub fn new(definition: SimulationDefinition, tree: RuntimeTree) -> Self {
        Self {
            definition,
            tree,
            status: Arc::new(StatusCell::new(SimulationStatus::Idle)),
            errors: Vec::new(),
        }
    }

    /// Current session status.
    pub fn status(&self) -> SimulationStatus {
        self.status.load()
    }

    /// Handle to the shared status cell, for external controllers.
    pub fn status_cell(&self) -> Arc<StatusCell> {
        Arc::clone(&self.status)
    }

    /// Record a surfaced step failure.
    pub(crate) fn record_error(&mut self, error: StepError) {
        self.errors.push(error);
    }

    /// Step failures surfaced so far, in order of occurrence.
    pub fn errors(&self) -> &[StepError] {
        &self.errors
    }

    /// Drain the surfaced step failures.
    pub fn take_errors(&mut self) -> Vec<StepError> {
        std::mem::take(&mut self.errors)
    }
}
