//! The background update loop: cadence gating, pipeline sequencing,
//! and the stop notification.
//!
//! The update thread owns the [`SessionContext`] exclusively (moved in
//! via `thread::spawn`) and returns it when the loop exits, so the
//! owner recovers the final tree and any surfaced errors through the
//! `JoinHandle`. Only the shared status cell crosses the thread
//! boundary while the loop runs.

use std::time::{Duration, Instant};

use tracing::{debug, error};

use orrery_core::error::StepError;
use orrery_core::status::SimulationStatus;
use orrery_core::traits::UpdateListener;
use orrery_obs::flatten_particles;

use crate::config::SchedulerConfig;
use crate::dispatch::EventDispatcher;
use crate::scheduler::Collaborators;
use crate::session::SessionContext;
use crate::time::TimeAccumulator;

/// State held by the update thread's main loop.
pub(crate) struct UpdateThreadState {
    session: SessionContext,
    collaborators: Collaborators,
    listener: Box<dyn UpdateListener>,
    dispatcher: EventDispatcher,
    accumulator: TimeAccumulator,
    interval: Duration,
    last_update: Instant,
}

impl UpdateThreadState {
    pub fn new(
        session: SessionContext,
        collaborators: Collaborators,
        listener: Box<dyn UpdateListener>,
        request_id: String,
        config: &SchedulerConfig,
    ) -> Self {
        Self {
            session,
            collaborators,
            listener,
            dispatcher: EventDispatcher::new(config.protocol, request_id),
            accumulator: TimeAccumulator::new(),
            interval: config.update_interval(),
            last_update: Instant::now(),
        }
    }

    /// Main update loop. Runs until the status leaves `Running`.
    ///
    /// Consumes self and returns the [`SessionContext`] so the caller
    /// can recover it via `JoinHandle<SessionContext>`.
    pub fn run(mut self) -> SessionContext {
        loop {
            match self.session.status() {
                SimulationStatus::Running => {}
                SimulationStatus::Stopped => {
                    self.dispatcher.dispatch_stop(self.listener.as_ref());
                    break;
                }
                status => {
                    debug!(%status, "update loop exiting without stop notification");
                    break;
                }
            }

            // Throttle to the configured cadence. Parked rather than
            // slept so stop() can wake the thread immediately.
            let elapsed = self.last_update.elapsed();
            if elapsed < self.interval {
                std::thread::park_timeout(self.interval - elapsed);
                continue;
            }

            if let Err(e) = self.step() {
                // Surface to the owning session; the loop itself does
                // not retry and does not stop.
                error!(error = %e, "update step failed");
                self.session.record_error(e);
            }
            self.last_update = Instant::now();
            debug!(elapsed_ms = elapsed.as_millis() as u64, "updated");
        }

        self.session
    }

    /// One pass of the update pipeline.
    fn step(&mut self) -> Result<(), StepError> {
        // Simulators advance at the measured cadence regardless of the
        // gate outcome.
        self.collaborators
            .stepper
            .step(&mut self.session.tree)
            .map_err(|reason| StepError::VisitorFailed {
                stage: "stepper",
                reason,
            })?;

        if self.collaborators.gate.all_stepped(&self.session.definition)
            && self.session.status() == SimulationStatus::Running
        {
            let sample = self
                .collaborators
                .time
                .extract(&self.session.tree)
                .map_err(|reason| StepError::VisitorFailed {
                    stage: "time",
                    reason,
                })?;
            self.accumulator.accumulate(sample, &mut self.session.tree);

            let scene = self
                .collaborators
                .serializer
                .serialize(&self.session.tree)
                .map_err(|reason| StepError::VisitorFailed {
                    stage: "serializer",
                    reason,
                })?;
            let particles = flatten_particles(&self.session.tree)?;

            self.collaborators.exit.scan(&self.session.tree);

            // An unchanged scene (None) produces no event at all.
            if let Some(scene) = scene {
                self.dispatcher
                    .dispatch_update(self.listener.as_ref(), scene, particles);
            }
        } else if self.session.status() == SimulationStatus::Stopped {
            // Status flipped mid-step. The loop head will observe it
            // too; the stop latch keeps the notification one-shot.
            self.dispatcher.dispatch_stop(self.listener.as_ref());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::event::SimulationEvent;
    use orrery_core::traits::SimulationDefinition;
    use orrery_core::tree::RuntimeTree;
    use orrery_test_utils::{
        particle, ConstTimeExtractor, CountingSerializer, CountingStepper, FailingStepper,
        NullExitMonitor, RecordingExitMonitor, RecordingListener, SharedGate,
    };

    fn state_with(gate: SharedGate, listener: RecordingListener) -> UpdateThreadState {
        let mut tree = RuntimeTree::new();
        tree.insert(particle("p1", 1.0, 1.0, 2.0, 3.0));
        let session = SessionContext::new(SimulationDefinition::default(), tree);
        session.status_cell().store(SimulationStatus::Running);
        UpdateThreadState::new(
            session,
            Collaborators {
                stepper: Box::new(CountingStepper::new()),
                gate: Box::new(gate),
                time: Box::new(ConstTimeExtractor::new(0.1, "ms")),
                serializer: Box::new(CountingSerializer::new()),
                exit: Box::new(NullExitMonitor),
            },
            Box::new(listener),
            "req-1".to_string(),
            &SchedulerConfig::default(),
        )
    }

    #[test]
    fn closed_gate_steps_but_emits_nothing() {
        let listener = RecordingListener::new();
        let mut state = state_with(SharedGate::new(false), listener.clone());
        state.step().unwrap();
        state.step().unwrap();
        assert!(listener.events().is_empty());
        assert!(state.session.tree.global_time().is_none());
    }

    #[test]
    fn satisfied_steps_emit_start_then_update() {
        let listener = RecordingListener::new();
        let mut state = state_with(SharedGate::new(true), listener.clone());
        state.step().unwrap();
        state.step().unwrap();
        assert_eq!(
            listener.kinds(),
            [
                SimulationEvent::StartSimulation,
                SimulationEvent::SceneUpdate
            ]
        );
    }

    #[test]
    fn satisfied_step_accumulates_time() {
        let listener = RecordingListener::new();
        let mut state = state_with(SharedGate::new(true), listener);
        state.step().unwrap();
        state.step().unwrap();
        let time = state.session.tree.global_time().expect("time node");
        assert!((time.value - 0.2).abs() < 1e-12);
        assert_eq!(time.unit, "ms");
    }

    #[test]
    fn exit_monitor_runs_once_per_satisfied_step() {
        let listener = RecordingListener::new();
        let exit = RecordingExitMonitor::new();
        let gate = SharedGate::new(true);
        let mut state = state_with(gate.clone(), listener);
        state.collaborators.exit = Box::new(exit.clone());
        state.step().unwrap();
        gate.set_open(false);
        state.step().unwrap();
        assert_eq!(exit.scans(), 1);
    }

    #[test]
    fn stepper_failure_ends_the_pass_before_the_gate() {
        let listener = RecordingListener::new();
        let mut state = state_with(SharedGate::new(true), listener.clone());
        state.collaborators.stepper = Box::new(FailingStepper::new(0));
        let err = state.step().unwrap_err();
        assert!(matches!(
            err,
            StepError::VisitorFailed {
                stage: "stepper",
                ..
            }
        ));
        // Nothing downstream ran: no event, no time node.
        assert!(listener.events().is_empty());
        assert!(state.session.tree.global_time().is_none());
    }

    #[test]
    fn mid_step_stop_sends_one_notification() {
        let listener = RecordingListener::new();
        let gate = SharedGate::new(false);
        let mut state = state_with(gate, listener.clone());
        state.session.status_cell().store(SimulationStatus::Stopped);
        state.step().unwrap();
        state.step().unwrap();
        let kinds = listener.kinds();
        assert_eq!(kinds, [SimulationEvent::StopSimulation]);
    }
}
