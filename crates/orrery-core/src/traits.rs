//! Trait seams for the external collaborators the update loop drives.
//!
//! The update thread owns boxed implementations of these traits; they
//! are `Send` because they cross into the background thread. Failures
//! are reported as [`VisitorError`] and propagate to the session —
//! the loop never swallows them.

use crate::error::VisitorError;
use crate::event::{SimulationEvent, UpdatePayload};
use crate::tree::RuntimeTree;

/// Static description of the simulation a session is running: which
/// sub-simulators exist. The step-completion gate inspects this, not
/// the live tree.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SimulationDefinition {
    /// Identifier of the simulation.
    pub id: String,
    /// Ids of the constituent simulators.
    pub simulators: Vec<String>,
}

/// Delta time reported for the most recent step.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSample {
    /// Elapsed simulated time for the step.
    pub delta: f64,
    /// Unit the delta was measured in.
    pub unit: String,
}

/// Advances every simulator in the tree by one unit step.
pub trait SimulatorStepper: Send {
    /// Perform one step over the whole tree.
    fn step(&mut self, tree: &mut RuntimeTree) -> Result<(), VisitorError>;
}

/// Reports whether every simulator named by the definition has
/// finished its current step.
pub trait StepGate: Send {
    /// `true` when all simulators have completed the current step.
    fn all_stepped(&self, definition: &SimulationDefinition) -> bool;
}

/// Extracts the per-step delta time and unit from the tree.
pub trait TimeExtractor: Send {
    /// Delta time for the most recent step.
    fn extract(&self, tree: &RuntimeTree) -> Result<TimeSample, VisitorError>;
}

/// Produces the textual scene snapshot sent to the observer.
pub trait SceneSerializer: Send {
    /// Serialize the tree, or return `None` if nothing changed.
    fn serialize(&self, tree: &RuntimeTree) -> Result<Option<String>, VisitorError>;
}

/// Scans the tree for terminal nodes and performs termination-related
/// callback side effects. Its outcome is not consumed by the loop.
pub trait ExitMonitor: Send {
    /// Scan the tree once per satisfied step.
    fn scan(&mut self, tree: &RuntimeTree);
}

/// Observer callback receiving the outbound event stream.
///
/// Events arrive in production order, exactly one per satisfied step.
pub trait UpdateListener: Send {
    /// Deliver one event to the observer.
    fn update_ready(&self, event: SimulationEvent, request_id: &str, payload: UpdatePayload);
}
