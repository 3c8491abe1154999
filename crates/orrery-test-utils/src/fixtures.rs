//! Reusable collaborator fixtures.
//!
//! Standard mock collaborators for update-loop and flattener testing:
//!
//! - [`CountingStepper`] — counts steps, never fails.
//! - [`FailingStepper`] — fails deterministically after N calls.
//! - [`SharedGate`] — step-completion gate flipped from the test thread.
//! - [`ConstTimeExtractor`] — reports a fixed delta and unit.
//! - [`CountingSerializer`] / [`FailingSerializer`] — scene producers.
//! - [`NullExitMonitor`] / [`RecordingExitMonitor`] — exit scans.
//! - [`RecordingListener`] — captures the delivered event stream.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use orrery_core::error::VisitorError;
use orrery_core::event::{SimulationEvent, UpdateEvent, UpdatePayload};
use orrery_core::traits::{
    ExitMonitor, SceneSerializer, SimulationDefinition, SimulatorStepper, StepGate, TimeExtractor,
    TimeSample, UpdateListener,
};
use orrery_core::tree::{Node, ParticleNode, Point, RuntimeTree};

/// Build a particle node from loose values.
pub fn particle(id: &str, kind: f32, x: f64, y: f64, z: f64) -> Node {
    Node::Particle(ParticleNode::new(id, kind, Point::new(x, y, z)))
}

/// Counts how many times the tree was stepped, never fails.
#[derive(Clone, Default)]
pub struct CountingStepper {
    steps: Arc<AtomicUsize>,
}

impl CountingStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps performed so far.
    pub fn steps(&self) -> usize {
        self.steps.load(Ordering::SeqCst)
    }
}

impl SimulatorStepper for CountingStepper {
    fn step(&mut self, _tree: &mut RuntimeTree) -> Result<(), VisitorError> {
        self.steps.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Succeeds for the first `fail_after` calls, then fails every call.
///
/// Clones share the call counter, so a test can keep one handle and
/// hand the other to the scheduler.
#[derive(Clone)]
pub struct FailingStepper {
    fail_after: usize,
    calls: Arc<AtomicUsize>,
}

impl FailingStepper {
    pub fn new(fail_after: usize) -> Self {
        Self {
            fail_after,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of step calls so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SimulatorStepper for FailingStepper {
    fn step(&mut self, _tree: &mut RuntimeTree) -> Result<(), VisitorError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.fail_after {
            return Err(VisitorError::ExecutionFailed {
                reason: format!("scripted failure on call {call}"),
            });
        }
        Ok(())
    }
}

/// Step-completion gate controlled from the test thread.
///
/// Clones share the underlying flag, so a test can keep one handle and
/// hand the other to the scheduler.
#[derive(Clone)]
pub struct SharedGate {
    open: Arc<AtomicBool>,
}

impl SharedGate {
    pub fn new(open: bool) -> Self {
        Self {
            open: Arc::new(AtomicBool::new(open)),
        }
    }

    /// Flip the gate.
    pub fn set_open(&self, open: bool) {
        self.open.store(open, Ordering::SeqCst);
    }
}

impl StepGate for SharedGate {
    fn all_stepped(&self, _definition: &SimulationDefinition) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

/// Reports the same delta and unit on every extraction.
#[derive(Clone)]
pub struct ConstTimeExtractor {
    pub delta: f64,
    pub unit: String,
}

impl ConstTimeExtractor {
    pub fn new(delta: f64, unit: impl Into<String>) -> Self {
        Self {
            delta,
            unit: unit.into(),
        }
    }
}

impl TimeExtractor for ConstTimeExtractor {
    fn extract(&self, _tree: &RuntimeTree) -> Result<TimeSample, VisitorError> {
        Ok(TimeSample {
            delta: self.delta,
            unit: self.unit.clone(),
        })
    }
}

/// Produces a distinct scene string per call (`"scene-0"`, `"scene-1"`,
/// …), or `None` forever once [`CountingSerializer::silence`] is set.
#[derive(Clone, Default)]
pub struct CountingSerializer {
    calls: Arc<AtomicUsize>,
    silent: Arc<AtomicBool>,
}

impl CountingSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of serializations performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent call report an unchanged scene (`None`).
    pub fn silence(&self) {
        self.silent.store(true, Ordering::SeqCst);
    }

    /// Resume producing scenes.
    pub fn unsilence(&self) {
        self.silent.store(false, Ordering::SeqCst);
    }
}

impl SceneSerializer for CountingSerializer {
    fn serialize(&self, _tree: &RuntimeTree) -> Result<Option<String>, VisitorError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.silent.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(format!("scene-{call}")))
    }
}

/// Fails every serialization.
#[derive(Clone, Copy, Default)]
pub struct FailingSerializer;

impl SceneSerializer for FailingSerializer {
    fn serialize(&self, _tree: &RuntimeTree) -> Result<Option<String>, VisitorError> {
        Err(VisitorError::ExecutionFailed {
            reason: "scripted serializer failure".to_string(),
        })
    }
}

/// Exit monitor that does nothing.
#[derive(Clone, Copy, Default)]
pub struct NullExitMonitor;

impl ExitMonitor for NullExitMonitor {
    fn scan(&mut self, _tree: &RuntimeTree) {}
}

/// Exit monitor that counts its scans.
#[derive(Clone, Default)]
pub struct RecordingExitMonitor {
    scans: Arc<AtomicUsize>,
}

impl RecordingExitMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scans performed so far.
    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl ExitMonitor for RecordingExitMonitor {
    fn scan(&mut self, _tree: &RuntimeTree) {
        self.scans.fetch_add(1, Ordering::SeqCst);
    }
}

/// Captures every delivered event for later assertions.
///
/// Clones share the underlying buffer.
#[derive(Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<UpdateEvent>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events delivered so far, in order.
    pub fn events(&self) -> Vec<UpdateEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Kinds of the events delivered so far, in order.
    pub fn kinds(&self) -> Vec<SimulationEvent> {
        self.events.lock().unwrap().iter().map(|e| e.event).collect()
    }
}

impl UpdateListener for RecordingListener {
    fn update_ready(&self, event: SimulationEvent, request_id: &str, payload: UpdatePayload) {
        self.events.lock().unwrap().push(UpdateEvent {
            event,
            request_id: request_id.to_string(),
            payload,
        });
    }
}
