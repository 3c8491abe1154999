//! Particle extraction and wire encoding for Orrery scene updates.
//!
//! Flattens the particle nodes of a runtime state tree into the flat
//! `f64` array carried by binary scene-update events.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod flatten;

pub use flatten::{encode_particle_id, flatten_particles, NEGATING_KIND, ZERO_ID_SENTINEL};
