//! Core types and traits for the Orrery simulation update loop.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the runtime state tree, physical quantities, the session status
//! state machine, the observer event protocol, the collaborator trait
//! seams, and the error types used throughout the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod quantity;
pub mod status;
pub mod traits;
pub mod tree;

pub use error::{FlattenError, StepError, VisitorError};
pub use event::{SimulationEvent, UpdateEvent, UpdatePayload};
pub use quantity::PhysicalQuantity;
pub use status::{SimulationStatus, StatusCell};
pub use traits::{
    ExitMonitor, SceneSerializer, SimulationDefinition, SimulatorStepper, StepGate, TimeExtractor,
    TimeSample, UpdateListener,
};
pub use tree::{
    CompositeNode, Node, ParticleNode, Point, RuntimeTree, SimulatorNode, VariableNode,
    TIME_NODE_ID,
};
