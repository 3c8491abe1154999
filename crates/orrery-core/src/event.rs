//! The observer event protocol.
//!
//! Each satisfied update step produces exactly one event for the
//! remote observer: a start notification carrying the first scene, a
//! scene update carrying either the textual scene or the binary-ready
//! particle array, or a one-shot stop notification with no payload.

use std::fmt;

/// Kind of an outbound observer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SimulationEvent {
    /// First successful update of a running session.
    StartSimulation,
    /// Any subsequent successful update.
    SceneUpdate,
    /// The session transitioned into the stopped state.
    StopSimulation,
}

impl fmt::Display for SimulationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartSimulation => "start_simulation",
            Self::SceneUpdate => "scene_update",
            Self::StopSimulation => "stop_simulation",
        };
        write!(f, "{name}")
    }
}

/// Payload attached to an observer event.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdatePayload {
    /// Textual scene snapshot.
    Scene(String),
    /// Flattened particle array, four entries per particle:
    /// `(encoded-id, x, y, z)` in traversal order.
    Particles(Vec<f64>),
    /// No payload (stop notifications).
    Empty,
}

/// One delivered observer notification: kind, originating request, and
/// payload. This is the unit carried by channel-backed listeners.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateEvent {
    /// Event kind.
    pub event: SimulationEvent,
    /// Identifier of the request that started the session.
    pub request_id: String,
    /// Event payload.
    pub payload: UpdatePayload,
}
