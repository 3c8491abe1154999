//! User-facing scheduler handle: spawn, stop, join.

use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use orrery_core::status::{SimulationStatus, StatusCell};
use orrery_core::traits::{
    ExitMonitor, SceneSerializer, SimulatorStepper, StepGate, TimeExtractor, UpdateListener,
};

use crate::config::{ConfigError, SchedulerConfig};
use crate::session::SessionContext;
use crate::update_thread::UpdateThreadState;

// ── Error types ──────────────────────────────────────────────────

/// Errors from scheduler lifecycle operations.
#[derive(Debug)]
pub enum ScheduleError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The update thread could not be spawned.
    SpawnFailed {
        /// Description from the OS.
        reason: String,
    },
    /// The update thread panicked; the session is lost.
    ThreadPanicked,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid scheduler config: {e}"),
            Self::SpawnFailed { reason } => write!(f, "update thread spawn failed: {reason}"),
            Self::ThreadPanicked => write!(f, "update thread panicked"),
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for ScheduleError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── Collaborators ────────────────────────────────────────────────

/// The external collaborators the update loop drives, bundled for
/// [`UpdateScheduler::spawn`]. All of them move into the update
/// thread.
pub struct Collaborators {
    /// Advances every simulator by one unit step.
    pub stepper: Box<dyn SimulatorStepper>,
    /// Reports whether all simulators finished their current step.
    pub gate: Box<dyn StepGate>,
    /// Extracts the per-step delta time.
    pub time: Box<dyn TimeExtractor>,
    /// Produces the textual scene snapshot.
    pub serializer: Box<dyn SceneSerializer>,
    /// Performs termination-related callback side effects.
    pub exit: Box<dyn ExitMonitor>,
}

// ── UpdateScheduler ──────────────────────────────────────────────

/// Handle to one session's background update thread.
///
/// Spawning moves the [`SessionContext`] and collaborators into a
/// dedicated named thread running the update loop; the handle retains
/// only the shared status cell. [`stop`](Self::stop) requests a
/// cooperative stop that takes effect at the top of the next loop
/// check, and [`join`](Self::join) recovers the session.
#[derive(Debug)]
pub struct UpdateScheduler {
    status: Arc<StatusCell>,
    thread: Option<JoinHandle<SessionContext>>,
    request_id: String,
}

impl UpdateScheduler {
    /// Validate the configuration, mark the session running, and
    /// spawn its update thread.
    pub fn spawn(
        session: SessionContext,
        collaborators: Collaborators,
        listener: Box<dyn UpdateListener>,
        request_id: impl Into<String>,
        config: SchedulerConfig,
    ) -> Result<Self, ScheduleError> {
        config.validate()?;
        let request_id = request_id.into();
        let status = session.status_cell();
        status.store(SimulationStatus::Running);

        let state = UpdateThreadState::new(
            session,
            collaborators,
            listener,
            request_id.clone(),
            &config,
        );
        let thread = thread::Builder::new()
            .name("orrery-update".into())
            .spawn(move || state.run())
            .map_err(|e| ScheduleError::SpawnFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            status,
            thread: Some(thread),
            request_id,
        })
    }

    /// Identifier of the request that started this session.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Current session status (lock-free read).
    pub fn status(&self) -> SimulationStatus {
        self.status.load()
    }

    /// Handle to the shared status cell, for external controllers
    /// that manage the session lifecycle directly.
    pub fn status_cell(&self) -> Arc<StatusCell> {
        Arc::clone(&self.status)
    }

    /// Request a cooperative stop.
    ///
    /// Stores `Stopped` and unparks the update thread so a cadence
    /// wait ends immediately. The thread sends its one-shot stop
    /// notification and exits; stopping never interrupts a step in
    /// flight.
    pub fn stop(&self) {
        self.status.store(SimulationStatus::Stopped);
        if let Some(handle) = &self.thread {
            handle.thread().unpark();
        }
    }

    /// Wait for the update thread to exit and recover the session.
    pub fn join(mut self) -> Result<SessionContext, ScheduleError> {
        match self.thread.take() {
            Some(handle) => handle.join().map_err(|_| ScheduleError::ThreadPanicked),
            None => Err(ScheduleError::ThreadPanicked),
        }
    }
}

impl Drop for UpdateScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.thread.take() {
            self.status.store(SimulationStatus::Stopped);
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}
