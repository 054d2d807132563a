use super::bounds::Bounds;
use super::collide::collide_node;
use super::node::{Node, NodePosition};
use super::quadtree::Quadtree;

/// Receives the settled positions of every node once per frame.
///
/// Entries are keyed by id; an id missing from a frame no longer exists.
pub trait FrameSink {
    fn present(&mut self, frame: &[NodePosition]);
}

/// Clamp-then-collide relaxation pass run once per frame.
#[derive(Clone, Copy, Debug)]
pub struct LayoutStepper {
    bounds: Bounds,
}

impl LayoutStepper {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Clamps every node into the surface, then separates overlapping pairs.
    ///
    /// Every node takes a turn as the active collider, so pairs involving
    /// the first node get the same two-sided treatment as any other pair.
    pub fn step(&self, nodes: &mut [Node]) {
        for node in nodes.iter_mut() {
            node.position = self.bounds.clamp_point(node.position);
        }

        if nodes.len() < 2 {
            return;
        }

        let points = nodes.iter().map(|node| node.position).collect::<Vec<_>>();
        let index = Quadtree::build(&points);
        for active in 0..nodes.len() {
            collide_node(&index, nodes, active, self.bounds.radius);
        }
    }
}
