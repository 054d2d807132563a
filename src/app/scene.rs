use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Vec2;

use crate::sim::{FrameSink, NodeId, NodePosition};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visual {
    pub position: Vec2,
    pub selected: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneChange {
    pub entered: Vec<NodeId>,
    pub exited: Vec<NodeId>,
}

impl SceneChange {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Visual elements bound to nodes by id.
///
/// Ids are issued in increasing order, so iterating by id draws newer
/// nodes on top of older ones.
#[derive(Debug, Default)]
pub struct Scene {
    visuals: BTreeMap<NodeId, Visual>,
    selected: Option<NodeId>,
    last_change: SceneChange,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, selected: Option<NodeId>) {
        self.selected = selected;
        for (id, visual) in &mut self.visuals {
            visual.selected = Some(*id) == selected;
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Visual> {
        self.visuals.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Visual)> {
        self.visuals.iter().map(|(id, visual)| (*id, visual))
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn last_change(&self) -> &SceneChange {
        &self.last_change
    }
}

impl FrameSink for Scene {
    fn present(&mut self, frame: &[NodePosition]) {
        let live = frame.iter().map(|entry| entry.id).collect::<BTreeSet<_>>();
        let mut change = SceneChange::default();

        self.visuals.retain(|id, _| {
            let keep = live.contains(id);
            if !keep {
                change.exited.push(*id);
            }
            keep
        });

        for entry in frame {
            let selected = self.selected == Some(entry.id);
            self.visuals
                .entry(entry.id)
                .and_modify(|visual| {
                    visual.position = entry.position;
                    visual.selected = selected;
                })
                .or_insert_with(|| {
                    change.entered.push(entry.id);
                    Visual {
                        position: entry.position,
                        selected,
                    }
                });
        }

        self.last_change = change;
    }
}
