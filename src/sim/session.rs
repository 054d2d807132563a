use eframe::egui::{Vec2, vec2};
use log::{debug, trace};

use crate::config::SimulationConfig;
use crate::util::stable_unit_pair;

use super::forces::ForceSimulation;
use super::node::{NodeId, NodePosition, NodeSet};
use super::stepper::{FrameSink, LayoutStepper};

/// One interactive session: nodes, selection and the running layout.
#[derive(Debug)]
pub struct Session {
    config: SimulationConfig,
    nodes: NodeSet,
    selected: Option<NodeId>,
    forces: ForceSimulation,
    stepper: LayoutStepper,
}

impl Session {
    pub fn new(config: SimulationConfig) -> Self {
        let bounds = config.bounds();
        let mut session = Self {
            forces: ForceSimulation::new(config.force_params()),
            stepper: LayoutStepper::new(bounds),
            nodes: NodeSet::new(),
            selected: None,
            config,
        };

        for _ in 0..session.config.initial_nodes {
            let id = session.nodes.insert(Vec2::ZERO);
            let (x, y) = stable_unit_pair(id);
            let seeded = bounds.clamp_point(vec2(x * bounds.width, y * bounds.height));
            if let Some(node) = session.nodes.get_mut(id) {
                node.position = seeded;
                node.previous = seeded;
            }
        }

        session.restart();
        session
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn alpha(&self) -> f32 {
        self.forces.alpha()
    }

    pub fn is_settled(&self) -> bool {
        self.forces.is_settled()
    }

    pub fn add_node(&mut self, point: Vec2) -> NodeId {
        let target = if self.config.spawn_at_center {
            self.config.center()
        } else {
            point
        };
        let id = self.nodes.insert(self.stepper.bounds().clamp_point(target));
        debug!("added node {id} at ({:.1}, {:.1})", target.x, target.y);
        id
    }

    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if self.nodes.remove(id).is_none() {
            return false;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        debug!("removed node {id}");
        true
    }

    pub fn remove_selected(&mut self) -> Option<NodeId> {
        let id = self.selected?;
        self.remove_node(id).then_some(id)
    }

    /// Closest node whose circle contains `point`.
    pub fn node_at(&self, point: Vec2) -> Option<NodeId> {
        let radius = self.config.radius;
        self.nodes
            .iter()
            .filter_map(|node| {
                let distance = (node.position - point).length();
                (distance <= radius).then_some((node.id, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    pub fn toggle_selection(&mut self, id: NodeId) -> Option<NodeId> {
        if !self.nodes.contains(id) {
            return self.selected;
        }
        self.selected = if self.selected == Some(id) {
            None
        } else {
            Some(id)
        };
        debug!("selection is now {:?}", self.selected);
        self.selected
    }

    pub fn set_pinned(&mut self, id: NodeId, pinned: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.pinned = pinned;
        }
    }

    pub fn drag_to(&mut self, id: NodeId, point: Vec2) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.position = point;
            node.previous = point;
        }
    }

    pub fn restart(&mut self) {
        if self.forces.is_settled() {
            debug!("restarting layout with {} nodes", self.nodes.len());
        }
        self.forces.resume();
    }

    /// Runs one frame and hands the result to `sink`. Returns `false` once
    /// the layout has settled and nothing was presented.
    pub fn tick<S>(&mut self, sink: &mut S) -> bool
    where
        S: FrameSink + ?Sized,
    {
        let nodes = self.nodes.as_mut_slice();
        if !self.forces.tick(nodes) {
            trace!("layout settled");
            return false;
        }
        self.stepper.step(nodes);
        sink.present(&self.frame());
        true
    }

    pub fn frame(&self) -> Vec<NodePosition> {
        self.nodes.positions()
    }
}
