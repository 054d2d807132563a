use eframe::egui::{Vec2, vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

impl Bounds {
    pub fn clamp(self, axis: Axis, value: f32) -> f32 {
        let dimension = match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        };
        value.min(dimension - self.radius).max(self.radius)
    }

    pub fn clamp_point(self, point: Vec2) -> Vec2 {
        vec2(self.clamp(Axis::X, point.x), self.clamp(Axis::Y, point.y))
    }

    pub fn center(self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }
}
