use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use super::input::collect_input_events;
use super::interaction::InteractionState;
use super::render_utils::{
    draw_background, node_fill, node_stroke, screen_to_surface, surface_to_screen,
};
use super::NodeBubblesApp;

impl NodeBubblesApp {
    pub(in crate::app) fn draw_surface(&mut self, ui: &mut Ui) {
        let config = self.session.config();
        let radius = config.radius;
        let size = vec2(config.width, config.height);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let ctrl_down = &mut self.ctrl_down;
        let events = ui.input(|input| collect_input_events(input, rect, ctrl_down));
        for event in events {
            let reaction = self.controller.handle(&mut self.session, event);
            self.apply_reaction(reaction);
        }

        if self.session.tick(&mut self.scene) {
            ui.ctx().request_repaint();
        }

        let state = self.controller.state(&self.session);
        let drag_mode = matches!(state, InteractionState::CtrlHeld | InteractionState::Dragging);
        draw_background(&painter, rect, drag_mode);

        let hovered = response
            .hover_pos()
            .and_then(|pointer| self.session.node_at(screen_to_surface(rect, pointer)));

        for (id, visual) in self.scene.iter() {
            let center = surface_to_screen(rect, visual.position);
            painter.circle_filled(center, radius, node_fill(id, visual.selected));
            painter.circle_stroke(center, radius, Stroke::new(1.5, node_stroke(id)));
            painter.text(
                center,
                Align2::CENTER_CENTER,
                id.to_string(),
                FontId::proportional(12.0),
                Color32::from_gray(250),
            );
        }

        if let Some(visual) = self
            .controller
            .hover_highlight(hovered)
            .and_then(|id| self.scene.get(id))
        {
            painter.circle_stroke(
                surface_to_screen(rect, visual.position),
                radius * 1.1,
                Stroke::new(1.0, Color32::from_gray(120)),
            );
        }

        let cursor = match state {
            InteractionState::Dragging => Some(egui::CursorIcon::Grabbing),
            InteractionState::CtrlHeld if hovered.is_some() => Some(egui::CursorIcon::Grab),
            _ if hovered.is_some() => Some(egui::CursorIcon::PointingHand),
            _ => None,
        };
        if let Some(cursor) = cursor {
            ui.output_mut(|output| output.cursor_icon = cursor);
        }
    }
}
