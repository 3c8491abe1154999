//! Session lifecycle status and its atomically shared cell.
//!
//! The status is written by an external controller (e.g. a stop command
//! arriving over the session's control surface) and read repeatedly by
//! the update thread. [`StatusCell`] gives both sides a synchronized
//! view; a reader may observe a stale value for at most one loop
//! iteration.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle phase of a simulation session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SimulationStatus {
    /// Session exists but has never been started.
    Idle = 0,
    /// The update loop is driving the simulation.
    Running = 1,
    /// Suspended by the controller; the update loop exits without a
    /// stop notification.
    Paused = 2,
    /// Stopped by the controller; the update loop sends a one-shot
    /// stop notification and exits.
    Stopped = 3,
}

impl SimulationStatus {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Running,
            2 => Self::Paused,
            3 => Self::Stopped,
            _ => Self::Idle,
        }
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        };
        write!(f, "{name}")
    }
}

/// Atomically shared [`SimulationStatus`].
///
/// One instance per session, shared via `Arc` between the controller
/// and the update thread. Acquire/release ordering guarantees that a
/// status transition published by the controller becomes visible to
/// the update thread on its next load.
#[derive(Debug)]
pub struct StatusCell(AtomicU8);

impl StatusCell {
    /// Create a cell holding `status`.
    pub fn new(status: SimulationStatus) -> Self {
        Self(AtomicU8::new(status as u8))
    }

    /// Read the current status.
    pub fn load(&self) -> SimulationStatus {
        SimulationStatus::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Publish a new status.
    pub fn store(&self, status: SimulationStatus) {
        self.0.store(status as u8, Ordering::Release);
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new(SimulationStatus::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_status() {
        for status in [
            SimulationStatus::Idle,
            SimulationStatus::Running,
            SimulationStatus::Paused,
            SimulationStatus::Stopped,
        ] {
            let cell = StatusCell::new(status);
            assert_eq!(cell.load(), status);
        }
    }

    #[test]
    fn store_overwrites() {
        let cell = StatusCell::new(SimulationStatus::Running);
        cell.store(SimulationStatus::Stopped);
        assert_eq!(cell.load(), SimulationStatus::Stopped);
    }

    #[test]
    fn visible_across_threads() {
        use std::sync::Arc;
        let cell = Arc::new(StatusCell::new(SimulationStatus::Running));
        let writer = Arc::clone(&cell);
        std::thread::spawn(move || writer.store(SimulationStatus::Stopped))
            .join()
            .unwrap();
        assert_eq!(cell.load(), SimulationStatus::Stopped);
    }
}
