//! The runtime state tree: the live hierarchical representation of a
//! running simulation.
//!
//! Node kinds form a closed enum rather than an open visitor hierarchy;
//! each consumer (flattener, time accumulator, serializer) walks the
//! tree with its own explicit traversal. Children are held in
//! insertion-ordered maps keyed by node id, so traversal order is
//! deterministic and re-inserting an existing child (the global time
//! node is rewritten every step) keeps its original position.

use indexmap::IndexMap;

use crate::quantity::PhysicalQuantity;

/// Reserved id of the global time node at the tree root.
pub const TIME_NODE_ID: &str = "time";

/// A position in 3D space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point {
    /// Create a point from its coordinates.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A particle: a leaf node with an identifier, a kind tag, and a
/// position. Immutable during a single step; simulators replace or
/// update particles between steps.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleNode {
    /// Identifier string, e.g. `"p12"`. The wire encoding keeps only
    /// its digits.
    pub id: String,
    /// Kind tag assigned by the owning simulator. The value `2.1` is
    /// reserved and changes the sign of the encoded identifier.
    pub kind: f32,
    /// Position at the end of the most recent step.
    pub position: Point,
}

impl ParticleNode {
    /// Create a particle node.
    pub fn new(id: impl Into<String>, kind: f32, position: Point) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
        }
    }
}

/// A named scalar variable holding a [`PhysicalQuantity`].
#[derive(Clone, Debug, PartialEq)]
pub struct VariableNode {
    /// Identifier string.
    pub id: String,
    /// Current value and unit.
    pub quantity: PhysicalQuantity,
}

impl VariableNode {
    /// Create a variable node.
    pub fn new(id: impl Into<String>, quantity: PhysicalQuantity) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// A grouping node with ordered children.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeNode {
    /// Identifier string.
    pub id: String,
    children: IndexMap<String, Node>,
}

impl CompositeNode {
    /// Create an empty composite.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: IndexMap::new(),
        }
    }

    /// Insert a child keyed by its id. Replacing an existing child
    /// keeps its position in the traversal order.
    pub fn insert(&mut self, node: Node) {
        self.children.insert(node.id().to_string(), node);
    }

    /// Look up a child by id.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.children.get(id)
    }

    /// Iterate children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the composite has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Default for CompositeNode {
    fn default() -> Self {
        Self::new("root")
    }
}

/// The live state of one sub-simulator, including whether it has
/// finished its current step.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatorNode {
    /// Identifier string, matching the simulation definition.
    pub id: String,
    /// Whether this simulator has completed its current step.
    pub stepped: bool,
    children: IndexMap<String, Node>,
}

impl SimulatorNode {
    /// Create a simulator node with no children, not yet stepped.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stepped: false,
            children: IndexMap::new(),
        }
    }

    /// Insert a child keyed by its id. Replacing an existing child
    /// keeps its position in the traversal order.
    pub fn insert(&mut self, node: Node) {
        self.children.insert(node.id().to_string(), node);
    }

    /// Look up a child by id.
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.children.get(id)
    }

    /// Iterate children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }
}

/// A node in the runtime state tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Grouping node.
    Composite(CompositeNode),
    /// Sub-simulator state.
    Simulator(SimulatorNode),
    /// Scalar variable.
    Variable(VariableNode),
    /// Particle leaf.
    Particle(ParticleNode),
}

impl Node {
    /// The node's identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::Composite(n) => &n.id,
            Self::Simulator(n) => &n.id,
            Self::Variable(n) => &n.id,
            Self::Particle(n) => &n.id,
        }
    }
}

/// The rooted runtime state tree, exclusively owned by its session.
///
/// Only the update thread mutates the tree while the session is
/// running; the global time node is the one piece of state the
/// scheduler itself writes each step.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RuntimeTree {
    root: CompositeNode,
}

impl RuntimeTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root composite.
    pub fn root(&self) -> &CompositeNode {
        &self.root
    }

    /// Mutable access to the root composite.
    pub fn root_mut(&mut self) -> &mut CompositeNode {
        &mut self.root
    }

    /// Insert a top-level node.
    pub fn insert(&mut self, node: Node) {
        self.root.insert(node);
    }

    /// Write the global time node at the root, replacing any previous
    /// value while keeping its position in the traversal order.
    pub fn set_global_time(&mut self, quantity: PhysicalQuantity) {
        self.root
            .insert(Node::Variable(VariableNode::new(TIME_NODE_ID, quantity)));
    }

    /// The global time quantity, if a step has written one.
    pub fn global_time(&self) -> Option<&PhysicalQuantity> {
        match self.root.get(TIME_NODE_ID) {
            Some(Node::Variable(v)) => Some(&v.quantity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order() {
        let mut tree = RuntimeTree::new();
        tree.insert(Node::Particle(ParticleNode::new("p1", 1.0, Point::default())));
        tree.insert(Node::Particle(ParticleNode::new("p2", 1.0, Point::default())));
        tree.insert(Node::Particle(ParticleNode::new("p3", 1.0, Point::default())));
        let ids: Vec<&str> = tree.root().children().map(Node::id).collect();
        assert_eq!(ids, ["p1", "p2", "p3"]);
    }

    #[test]
    fn global_time_round_trips() {
        let mut tree = RuntimeTree::new();
        assert!(tree.global_time().is_none());
        tree.set_global_time(PhysicalQuantity::new(0.25, "ms"));
        assert_eq!(tree.global_time(), Some(&PhysicalQuantity::new(0.25, "ms")));
    }

    #[test]
    fn rewriting_global_time_keeps_position() {
        let mut tree = RuntimeTree::new();
        tree.set_global_time(PhysicalQuantity::new(0.1, "ms"));
        tree.insert(Node::Particle(ParticleNode::new("p1", 1.0, Point::default())));
        tree.set_global_time(PhysicalQuantity::new(0.2, "ms"));
        let ids: Vec<&str> = tree.root().children().map(Node::id).collect();
        assert_eq!(ids, [TIME_NODE_ID, "p1"]);
        assert_eq!(tree.global_time().map(|q| q.value), Some(0.2));
    }

    #[test]
    fn replacing_a_child_keeps_position() {
        let mut composite = CompositeNode::new("group");
        composite.insert(Node::Particle(ParticleNode::new("a", 1.0, Point::default())));
        composite.insert(Node::Particle(ParticleNode::new("b", 1.0, Point::default())));
        composite.insert(Node::Particle(ParticleNode::new(
            "a",
            2.0,
            Point::new(1.0, 1.0, 1.0),
        )));
        let ids: Vec<&str> = composite.children().map(Node::id).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(composite.len(), 2);
    }
}
