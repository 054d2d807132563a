use eframe::egui::{self, Align, Context, Layout};
use log::debug;

use crate::config::SimulationConfig;
use crate::sim::{FrameSink, Session};

mod input;
mod interaction;
mod render_utils;
mod scene;
mod view;

use interaction::{InteractionController, Reaction};
use scene::Scene;

pub struct NodeBubblesApp {
    session: Session,
    controller: InteractionController,
    scene: Scene,
    ctrl_down: bool,
}

impl NodeBubblesApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: SimulationConfig) -> Self {
        let mut app = Self {
            session: Session::new(config),
            controller: InteractionController::new(),
            scene: Scene::new(),
            ctrl_down: false,
        };
        app.apply_reaction(Reaction::Rerender);
        app
    }

    fn apply_reaction(&mut self, reaction: Reaction) {
        apply_reaction(&mut self.session, &mut self.scene, reaction);
    }

    fn draw_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("node-bubbles");
            ui.separator();
            ui.label(format!("nodes: {}", self.session.nodes().len()));
            if self.session.nodes().is_empty() {
                ui.weak("click the surface to add a node");
            }
            let selected = self
                .session
                .selected()
                .map_or_else(|| "none".to_owned(), |id| id.to_string());
            ui.label(format!("selected: {selected}"));
            ui.label(format!("mode: {}", self.controller.state(&self.session)));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if self.session.is_settled() {
                    ui.label("settled");
                } else {
                    ui.label(format!("alpha {:.3}", self.session.alpha()));
                }
            });
        });
    }
}

/// Rebinds visuals to the current nodes and selection after a change.
fn apply_reaction(session: &mut Session, scene: &mut Scene, reaction: Reaction) {
    match reaction {
        Reaction::None => {}
        Reaction::Reheat => session.restart(),
        Reaction::Rerender => {
            session.restart();
            scene.select(session.selected());
            scene.present(&session.frame());
            let change = scene.last_change();
            if !change.is_empty() {
                debug!(
                    "scene rebound: {} entered, {} exited, {} drawn",
                    change.entered.len(),
                    change.exited.len(),
                    scene.len()
                );
            }
        }
    }
}

impl eframe::App for NodeBubblesApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("status_bar")
            .resizable(false)
            .show(ctx, |ui| self.draw_status(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_surface(ui));
    }
}
