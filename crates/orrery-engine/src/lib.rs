//! Update scheduler driving Orrery simulation sessions.
//!
//! Owns the background update thread that steps a running simulation
//! at a bounded rate, accumulates global time, and pushes scene
//! snapshots to a remote observer through the event protocol defined
//! in `orrery-core`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
mod dispatch;
pub mod listener;
pub mod scheduler;
pub mod session;
mod time;
mod update_thread;

pub use config::{ConfigError, ProtocolMode, SchedulerConfig};
pub use listener::ChannelListener;
pub use scheduler::{Collaborators, ScheduleError, UpdateScheduler};
pub use session::SessionContext;
