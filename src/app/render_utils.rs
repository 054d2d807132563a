use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2};

use crate::sim::NodeId;

const CATEGORY10: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

const SHADE_STEP: f32 = 0.7;

pub(super) fn category_color(id: NodeId) -> Color32 {
    let (r, g, b) = CATEGORY10[(id.0 % CATEGORY10.len() as u64) as usize];
    Color32::from_rgb(r, g, b)
}

/// Lightens by one step; dark channels are lifted first so black still brightens.
pub(super) fn brighter(color: Color32) -> Color32 {
    const FLOOR: f32 = 30.0;

    let channels = [color.r(), color.g(), color.b()];
    if channels.iter().all(|&channel| channel == 0) {
        return Color32::from_rgb(FLOOR as u8, FLOOR as u8, FLOOR as u8);
    }

    let lift = |channel: u8| {
        let value = channel as f32;
        let value = if value > 0.0 && value < FLOOR {
            FLOOR
        } else {
            value
        };
        (value / SHADE_STEP).round().min(255.0) as u8
    };
    Color32::from_rgb(lift(channels[0]), lift(channels[1]), lift(channels[2]))
}

pub(super) fn darker(color: Color32) -> Color32 {
    let shade = |channel: u8| (channel as f32 * SHADE_STEP).round() as u8;
    Color32::from_rgb(shade(color.r()), shade(color.g()), shade(color.b()))
}

pub(super) fn node_fill(id: NodeId, selected: bool) -> Color32 {
    let base = category_color(id);
    if selected { brighter(base) } else { base }
}

pub(super) fn node_stroke(id: NodeId) -> Color32 {
    darker(category_color(id))
}

pub(super) fn surface_to_screen(surface: Rect, point: Vec2) -> Pos2 {
    surface.min + point
}

pub(super) fn screen_to_surface(surface: Rect, screen: Pos2) -> Vec2 {
    screen - surface.min
}

pub(super) fn draw_background(painter: &Painter, surface: Rect, drag_mode: bool) {
    painter.rect_filled(surface, 0.0, Color32::from_rgb(250, 250, 250));
    let border = if drag_mode {
        Color32::from_rgb(106, 198, 255)
    } else {
        Color32::from_gray(190)
    };
    painter.rect_stroke(surface, 0.0, Stroke::new(1.0, border), StrokeKind::Inside);
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn test_category_color_cycles_by_id() {
        assert_eq!(category_color(NodeId(0)), Color32::from_rgb(0x1f, 0x77, 0xb4));
        assert_eq!(category_color(NodeId(10)), category_color(NodeId(0)));
        assert_ne!(category_color(NodeId(1)), category_color(NodeId(0)));
    }

    #[test]
    fn test_brighter_lightens_and_saturates() {
        let base = Color32::from_rgb(0x1f, 0x77, 0xb4);
        let light = brighter(base);
        assert!(light.r() > base.r() && light.g() > base.g() && light.b() > base.b());
        assert_eq!(brighter(Color32::from_rgb(250, 10, 0)).r(), 255);
        assert_eq!(brighter(Color32::BLACK), Color32::from_rgb(30, 30, 30));
    }

    #[test]
    fn test_darker_scales_channels() {
        assert_eq!(darker(Color32::from_rgb(100, 200, 10)), Color32::from_rgb(70, 140, 7));
    }

    #[test]
    fn test_selected_fill_is_brighter() {
        let id = NodeId(3);
        assert_eq!(node_fill(id, false), category_color(id));
        assert_eq!(node_fill(id, true), brighter(category_color(id)));
    }

    #[test]
    fn test_surface_mapping_round_trips() {
        let surface = Rect::from_min_size(pos2(16.0, 48.0), vec2(300.0, 300.0));
        let point = vec2(30.0, 270.0);
        let screen = surface_to_screen(surface, point);
        assert_eq!(screen, pos2(46.0, 318.0));
        assert_eq!(screen_to_surface(surface, screen), point);
    }
}
