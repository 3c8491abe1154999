//! Test utilities and mock collaborators for Orrery development.
//!
//! Provides mock implementations of the collaborator trait seams
//! ([`SimulatorStepper`], [`StepGate`], [`TimeExtractor`],
//! [`SceneSerializer`], [`ExitMonitor`], [`UpdateListener`]) plus a
//! small tree-building helper.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;

pub use fixtures::{
    particle, ConstTimeExtractor, CountingSerializer, CountingStepper, FailingSerializer,
    FailingStepper, NullExitMonitor, RecordingExitMonitor, RecordingListener, SharedGate,
};

// Re-export the traits so fixture users don't need a direct core path.
pub use orrery_core::traits::{
    ExitMonitor, SceneSerializer, SimulatorStepper, StepGate, TimeExtractor, UpdateListener,
};
