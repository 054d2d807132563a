use std::fmt;

use eframe::egui::Vec2;

/// Stable node identity. Never derived from position or storage index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Vec2,
    /// Position at the previous integration step; the velocity is implicit.
    pub previous: Vec2,
    /// Held in place by a drag; the integrator skips it.
    pub pinned: bool,
}

impl Node {
    fn at(id: NodeId, position: Vec2) -> Self {
        Self {
            id,
            position,
            previous: position,
            pinned: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePosition {
    pub id: NodeId,
    pub position: Vec2,
}

#[derive(Debug, Default)]
pub struct NodeSet {
    nodes: Vec<Node>,
    next_id: u64,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, position: Vec2) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(Node::at(id, position));
        id
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|node| node.id == id)?;
        Some(self.nodes.remove(index))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn as_mut_slice(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn positions(&self) -> Vec<NodePosition> {
        self.nodes
            .iter()
            .map(|node| NodePosition {
                id: node.id,
                position: node.position,
            })
            .collect()
    }
}
