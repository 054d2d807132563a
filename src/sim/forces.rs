use eframe::egui::Vec2;

use super::node::Node;
use super::quadtree::{QuadNode, Quadtree};

pub const ALPHA_START: f32 = 0.1;
const ALPHA_DECAY: f32 = 0.99;
const ALPHA_MIN: f32 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
    pub center: Vec2,
    pub charge: f32,
    pub gravity: f32,
    pub friction: f32,
    pub theta: f32,
}

/// Cooling force layout: gravity toward the centre, Barnes-Hut charge,
/// and position Verlet integration with friction.
#[derive(Debug)]
pub struct ForceSimulation {
    params: ForceParams,
    alpha: f32,
}

impl ForceSimulation {
    pub fn new(params: ForceParams) -> Self {
        Self { params, alpha: 0.0 }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_settled(&self) -> bool {
        self.alpha <= 0.0
    }

    pub fn resume(&mut self) {
        self.alpha = ALPHA_START;
    }

    /// Advances one step. Returns `false` once the layout has cooled, in
    /// which case the nodes are untouched.
    pub fn tick(&mut self, nodes: &mut [Node]) -> bool {
        if self.is_settled() {
            return false;
        }

        self.alpha *= ALPHA_DECAY;
        if self.alpha < ALPHA_MIN {
            self.alpha = 0.0;
            return false;
        }

        self.apply_gravity(nodes);
        self.apply_charge(nodes);
        self.integrate(nodes);
        true
    }

    fn apply_gravity(&self, nodes: &mut [Node]) {
        let pull = self.alpha * self.params.gravity;
        if pull == 0.0 {
            return;
        }
        for node in nodes {
            node.position += (self.params.center - node.position) * pull;
        }
    }

    fn apply_charge(&self, nodes: &mut [Node]) {
        let strength = self.alpha * self.params.charge;
        if strength == 0.0 || nodes.len() < 2 {
            return;
        }

        let positions = nodes.iter().map(|node| node.position).collect::<Vec<_>>();
        let tree = Quadtree::build(&positions);
        let Some(root) = tree.root() else {
            return;
        };

        let theta_sq = self.params.theta * self.params.theta;
        for (index, node) in nodes.iter_mut().enumerate() {
            if node.pinned {
                continue;
            }
            let mut shift = Vec2::ZERO;
            accumulate_charge(root, index, &positions, strength, theta_sq, &mut shift);
            node.previous += shift;
        }
    }

    fn integrate(&self, nodes: &mut [Node]) {
        for node in nodes {
            if node.pinned {
                node.position = node.previous;
                continue;
            }
            let current = node.position;
            node.position += (current - node.previous) * self.params.friction;
            node.previous = current;
        }
    }
}

/// Charge acting on `positions[index]`, applied to its previous position.
///
/// A negative strength repels: the previous position is pulled toward the
/// other mass, so the implied velocity points away from it.
fn accumulate_charge(
    quad: &QuadNode,
    index: usize,
    positions: &[Vec2],
    strength: f32,
    theta_sq: f32,
    shift: &mut Vec2,
) {
    if quad.count == 0 {
        return;
    }

    let point = positions[index];

    if quad.is_leaf() {
        for &other in &quad.indices {
            if other == index {
                continue;
            }
            let delta = positions[other] - point;
            let distance_sq = delta.length_sq();
            if distance_sq > 0.0 {
                *shift -= delta * (strength / distance_sq);
            }
        }
        return;
    }

    let delta = quad.centroid - point;
    let distance_sq = delta.length_sq();
    let side = quad.bounds.side_length();
    let can_approximate = !quad.bounds.contains(point) && (side * side / theta_sq) < distance_sq;
    if can_approximate {
        *shift -= delta * (strength * quad.count as f32 / distance_sq);
        return;
    }

    for child in quad.children.iter().flatten() {
        accumulate_charge(child, index, positions, strength, theta_sq, shift);
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::sim::node::NodeId;

    fn params() -> ForceParams {
        ForceParams {
            center: vec2(150.0, 150.0),
            charge: -20_000.0,
            gravity: 0.5,
            friction: 0.9,
            theta: 0.8,
        }
    }

    fn node(id: u64, x: f32, y: f32) -> Node {
        Node {
            id: NodeId(id),
            position: vec2(x, y),
            previous: vec2(x, y),
            pinned: false,
        }
    }

    #[test]
    fn test_new_simulation_is_settled() {
        let mut simulation = ForceSimulation::new(params());
        let mut nodes = vec![node(0, 10.0, 10.0)];
        assert!(simulation.is_settled());
        assert!(!simulation.tick(&mut nodes));
        assert_eq!(nodes[0].position, vec2(10.0, 10.0));
    }

    #[test]
    fn test_alpha_cools_until_settled() {
        let mut simulation = ForceSimulation::new(params());
        simulation.resume();
        let mut nodes = vec![node(0, 150.0, 150.0)];

        let mut ticks = 0;
        while simulation.tick(&mut nodes) {
            ticks += 1;
            assert!(ticks < 1_000, "simulation never settled");
        }

        assert!(simulation.is_settled());
        assert_eq!(simulation.alpha(), 0.0);
        assert!(ticks > 200);
    }

    #[test]
    fn test_gravity_pulls_toward_center() {
        let mut simulation = ForceSimulation::new(params());
        simulation.resume();
        let mut nodes = vec![node(0, 50.0, 250.0)];
        let before = (nodes[0].position - params().center).length();
        simulation.tick(&mut nodes);
        let after = (nodes[0].position - params().center).length();
        assert!(after < before);
    }

    #[test]
    fn test_charge_pushes_pair_apart() {
        let mut simulation = ForceSimulation::new(ForceParams {
            gravity: 0.0,
            ..params()
        });
        simulation.resume();
        let mut nodes = vec![node(0, 140.0, 150.0), node(1, 160.0, 150.0)];
        simulation.tick(&mut nodes);
        assert!(nodes[0].position.x < 140.0);
        assert!(nodes[1].position.x > 160.0);
        assert!((nodes[0].position.y - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_coincident_nodes_stay_finite() {
        let mut simulation = ForceSimulation::new(params());
        simulation.resume();
        let mut nodes = vec![node(0, 150.0, 150.0), node(1, 150.0, 150.0)];
        simulation.tick(&mut nodes);
        for node in &nodes {
            assert!(node.position.x.is_finite() && node.position.y.is_finite());
        }
    }

    #[test]
    fn test_pinned_node_holds_position() {
        let mut simulation = ForceSimulation::new(params());
        simulation.resume();
        let mut nodes = vec![node(0, 100.0, 100.0), node(1, 120.0, 100.0)];
        nodes[0].pinned = true;
        simulation.tick(&mut nodes);
        assert_eq!(nodes[0].position, vec2(100.0, 100.0));
        assert_ne!(nodes[1].position, vec2(120.0, 100.0));
    }

    #[test]
    fn test_approximated_charge_is_close_to_exact() {
        let mut positions = Vec::new();
        for row in 0..5 {
            for column in 0..5 {
                positions.push(vec2(290.0 + column as f32 * 10.0, 290.0 + row as f32 * 10.0));
            }
        }
        positions.push(vec2(0.0, 0.0));
        let probe = positions.len() - 1;
        let tree = Quadtree::build(&positions);
        let root = tree.root().expect("root");

        let mut approximate = Vec2::ZERO;
        accumulate_charge(root, probe, &positions, -1.0, 0.64, &mut approximate);
        let mut exact = Vec2::ZERO;
        accumulate_charge(root, probe, &positions, -1.0, 0.0, &mut exact);

        assert!(exact.length() > 0.0);
        assert!((approximate - exact).length() / exact.length() < 0.05);
    }
}
