use std::fmt;

use eframe::egui::Vec2;
use log::debug;

use crate::sim::{NodeId, Session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Delete,
    Backspace,
    Control,
}

/// Discrete input in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Vec2, ctrl: bool },
    PointerMove { position: Vec2 },
    PointerUp,
    KeyDown(KeyCode),
    KeyUp(KeyCode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    NodeSelected,
    Dragging,
    CtrlHeld,
}

impl fmt::Display for InteractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::NodeSelected => "node selected",
            Self::Dragging => "dragging",
            Self::CtrlHeld => "drag mode",
        };
        f.write_str(label)
    }
}

/// What the caller has to do after an event was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    None,
    /// Positions changed outside the simulation; keep it running.
    Reheat,
    /// Nodes or selection changed; rebind visuals and restart.
    Rerender,
}

#[derive(Debug, Default)]
pub struct InteractionController {
    ctrl_held: bool,
    dragging: Option<NodeId>,
    pressed_node: Option<NodeId>,
    last_key_down: Option<KeyCode>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, session: &Session) -> InteractionState {
        if self.dragging.is_some() {
            InteractionState::Dragging
        } else if self.ctrl_held {
            InteractionState::CtrlHeld
        } else if session.selected().is_some() {
            InteractionState::NodeSelected
        } else {
            InteractionState::Idle
        }
    }

    /// Node to enlarge under the pointer: only while a different node is
    /// held down.
    pub fn hover_highlight(&self, hovered: Option<NodeId>) -> Option<NodeId> {
        let held = self.dragging.or(self.pressed_node)?;
        hovered.filter(|&id| id != held)
    }

    pub fn handle(&mut self, session: &mut Session, event: InputEvent) -> Reaction {
        match event {
            InputEvent::PointerDown { position, ctrl } => {
                self.pointer_down(session, position, ctrl || self.ctrl_held)
            }
            InputEvent::PointerMove { position } => match self.dragging {
                Some(id) => {
                    session.drag_to(id, position);
                    Reaction::Reheat
                }
                None => Reaction::None,
            },
            InputEvent::PointerUp => self.pointer_up(session),
            InputEvent::KeyDown(key) => self.key_down(session, key),
            InputEvent::KeyUp(key) => {
                self.last_key_down = None;
                if key == KeyCode::Control {
                    self.ctrl_held = false;
                }
                Reaction::None
            }
        }
    }

    fn pointer_down(&mut self, session: &mut Session, position: Vec2, ctrl: bool) -> Reaction {
        let hit = session.node_at(position);

        if ctrl {
            let Some(id) = hit else {
                return Reaction::None;
            };
            session.set_pinned(id, true);
            self.dragging = Some(id);
            debug!("drag started on node {id}");
            return Reaction::Reheat;
        }

        match hit {
            Some(id) => {
                self.pressed_node = Some(id);
                session.toggle_selection(id);
            }
            None => {
                session.add_node(position);
            }
        }
        Reaction::Rerender
    }

    fn pointer_up(&mut self, session: &mut Session) -> Reaction {
        if let Some(id) = self.dragging.take() {
            session.set_pinned(id, false);
            debug!("drag released on node {id}");
        }

        if self.pressed_node.take().is_some() {
            Reaction::Rerender
        } else {
            Reaction::None
        }
    }

    fn key_down(&mut self, session: &mut Session, key: KeyCode) -> Reaction {
        // Only the first key-down counts until a key is released.
        if self.last_key_down.is_some() {
            return Reaction::None;
        }
        self.last_key_down = Some(key);

        match key {
            KeyCode::Control => {
                self.ctrl_held = true;
                Reaction::None
            }
            KeyCode::Delete | KeyCode::Backspace => {
                let Some(id) = session.remove_selected() else {
                    return Reaction::None;
                };
                if self.dragging == Some(id) {
                    self.dragging = None;
                }
                if self.pressed_node == Some(id) {
                    self.pressed_node = None;
                }
                Reaction::Rerender
            }
        }
    }
}
