//! Flattening of particle nodes into the binary-ready wire array.
//!
//! Wire format, four `f64` entries per particle in traversal order:
//!
//! ```text
//! [encoded-id, x, y, z] × n_particles
//! ```
//!
//! The identifier channel is the digit run of the particle id parsed
//! as a number. Zero is substituted with the 0.5 sentinel so that the
//! sign overload below stays decodable: zero has no sign, and the
//! kind tag `2.1` is signalled by negating this same channel, so a
//! true zero id must remain distinguishable from "no sign applied".

use smallvec::SmallVec;

use orrery_core::error::FlattenError;
use orrery_core::tree::{Node, RuntimeTree};

/// Sentinel written to the identifier channel when the digit run of a
/// particle id parses to exactly zero.
pub const ZERO_ID_SENTINEL: f64 = 0.5;

/// Reserved kind tag whose presence negates the identifier channel.
/// Compared bit-for-bit, never with a tolerance.
pub const NEGATING_KIND: f32 = 2.1;

/// Flatten every particle in the tree into a flat `f64` array.
///
/// Visits particles in the tree's natural traversal order (depth
/// first, children in insertion order), appending
/// `(encoded-id, x, y, z)` per particle. The output length is always
/// four times the number of particles visited; no particle is skipped
/// or deduplicated.
///
/// Pure with respect to the tree: safe to call repeatedly.
pub fn flatten_particles(tree: &RuntimeTree) -> Result<Vec<f64>, FlattenError> {
    let mut out = Vec::new();
    for node in tree.root().children() {
        flatten_node(node, &mut out)?;
    }
    Ok(out)
}

fn flatten_node(node: &Node, out: &mut Vec<f64>) -> Result<(), FlattenError> {
    match node {
        Node::Particle(p) => {
            out.push(encode_particle_id(&p.id, p.kind)?);
            out.push(p.position.x);
            out.push(p.position.y);
            out.push(p.position.z);
        }
        Node::Composite(c) => {
            for child in c.children() {
                flatten_node(child, out)?;
            }
        }
        Node::Simulator(s) => {
            for child in s.children() {
                flatten_node(child, out)?;
            }
        }
        Node::Variable(_) => {}
    }
    Ok(())
}

/// Encode a particle identifier for the wire.
///
/// Strips every non-digit byte from `id` and parses the remaining
/// digit run as `f64`. An id with no digits is a
/// [`FlattenError::MalformedId`]. A result of exactly zero becomes
/// [`ZERO_ID_SENTINEL`]; a kind tag bit-equal to [`NEGATING_KIND`]
/// negates the result (after the sentinel substitution, so a zero id
/// of that kind encodes as −0.5).
pub fn encode_particle_id(id: &str, kind: f32) -> Result<f64, FlattenError> {
    let digits: SmallVec<[u8; 16]> = id.bytes().filter(|b| b.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(FlattenError::MalformedId { id: id.to_string() });
    }
    let mut encoded: f64 = String::from_utf8_lossy(&digits)
        .parse()
        .map_err(|_| FlattenError::MalformedId { id: id.to_string() })?;
    if encoded == 0.0 {
        encoded = ZERO_ID_SENTINEL;
    }
    // Exact sentinel match — tolerance would change which particles flip sign.
    if kind.to_bits() == NEGATING_KIND.to_bits() {
        encoded = -encoded;
    }
    Ok(encoded)
}
