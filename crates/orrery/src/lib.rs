//! Orrery: the real-time update loop of an interactive simulation
//! server.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Orrery sub-crates. A background update thread steps a
//! running simulation at a bounded rate, accumulates global simulated
//! time, and pushes scene snapshots to a remote observer — either as
//! a textual scene or as a compact binary particle stream.
//!
//! # Quick start
//!
//! ```rust
//! use orrery::prelude::*;
//! use orrery::types::{Node, ParticleNode, Point};
//!
//! // Minimal collaborators: a stepper that marks work done, a gate
//! // that is always satisfied, and fixed time/scene producers.
//! struct Step;
//! impl SimulatorStepper for Step {
//!     fn step(&mut self, _tree: &mut RuntimeTree) -> Result<(), VisitorError> { Ok(()) }
//! }
//! struct Gate;
//! impl StepGate for Gate {
//!     fn all_stepped(&self, _def: &SimulationDefinition) -> bool { true }
//! }
//! struct Time;
//! impl TimeExtractor for Time {
//!     fn extract(&self, _tree: &RuntimeTree) -> Result<TimeSample, VisitorError> {
//!         Ok(TimeSample { delta: 0.1, unit: "ms".into() })
//!     }
//! }
//! struct Scene;
//! impl SceneSerializer for Scene {
//!     fn serialize(&self, _tree: &RuntimeTree) -> Result<Option<String>, VisitorError> {
//!         Ok(Some("scene".into()))
//!     }
//! }
//! struct Exit;
//! impl ExitMonitor for Exit {
//!     fn scan(&mut self, _tree: &RuntimeTree) {}
//! }
//!
//! let mut tree = RuntimeTree::new();
//! tree.insert(Node::Particle(ParticleNode::new("p1", 1.0, Point::new(1.0, 2.0, 3.0))));
//! let session = SessionContext::new(SimulationDefinition::default(), tree);
//!
//! let (listener, events) = ChannelListener::bounded(16);
//! let scheduler = UpdateScheduler::spawn(
//!     session,
//!     Collaborators {
//!         stepper: Box::new(Step),
//!         gate: Box::new(Gate),
//!         time: Box::new(Time),
//!         serializer: Box::new(Scene),
//!         exit: Box::new(Exit),
//!     },
//!     Box::new(listener),
//!     "request-1",
//!     SchedulerConfig { update_interval_ms: 1, ..Default::default() },
//! ).unwrap();
//!
//! // The first delivered event is always START_SIMULATION.
//! let first = events.recv().unwrap();
//! assert_eq!(first.event, SimulationEvent::StartSimulation);
//!
//! // Release the channel before the scheduler joins on drop; a full
//! // channel would otherwise hold the update thread in its last send.
//! scheduler.stop();
//! drop(events);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`orrery-core`).
///
/// The runtime state tree, physical quantities, session status, the
/// event protocol, the collaborator trait seams, and error types.
pub use orrery_core as types;

/// Particle extraction and wire encoding (`orrery-obs`).
///
/// [`obs::flatten_particles`] turns the tree into the flat `f64`
/// array carried by binary scene updates.
pub use orrery_obs as obs;

/// The update scheduler (`orrery-engine`).
///
/// [`engine::UpdateScheduler`] owns the background update thread;
/// [`engine::ChannelListener`] is the stock channel-backed observer.
pub use orrery_engine as engine;

/// Common imports for typical Orrery usage.
///
/// ```rust
/// use orrery::prelude::*;
/// ```
pub mod prelude {
    // Tree and session state
    pub use orrery_core::{PhysicalQuantity, RuntimeTree, SimulationStatus, StatusCell};

    // Collaborator seams
    pub use orrery_core::{
        ExitMonitor, SceneSerializer, SimulationDefinition, SimulatorStepper, StepGate,
        TimeExtractor, TimeSample, UpdateListener,
    };

    // Event protocol
    pub use orrery_core::{SimulationEvent, UpdateEvent, UpdatePayload};

    // Errors
    pub use orrery_core::{FlattenError, StepError, VisitorError};

    // Wire encoding
    pub use orrery_obs::flatten_particles;

    // Engine
    pub use orrery_engine::{
        ChannelListener, Collaborators, ConfigError, ProtocolMode, ScheduleError,
        SchedulerConfig, SessionContext, UpdateScheduler,
    };
}
