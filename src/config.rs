use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use eframe::egui::Vec2;
use serde::Deserialize;

use crate::sim::{Bounds, ForceParams};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub charge: f32,
    pub gravity: f32,
    pub friction: f32,
    pub theta: f32,
    pub initial_nodes: usize,
    pub spawn_at_center: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            radius: 30.0,
            charge: -20_000.0,
            gravity: 0.5,
            friction: 0.9,
            theta: 0.8,
            initial_nodes: 3,
            spawn_at_center: false,
        }
    }
}

impl SimulationConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid simulation config JSON")
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("radius", self.radius),
            ("charge", self.charge),
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("theta", self.theta),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                bail!("{name} must be a finite number, got {value}");
            }
        }

        if self.width <= 0.0 || self.height <= 0.0 {
            bail!(
                "surface must have a positive size, got {}x{}",
                self.width,
                self.height
            );
        }
        if self.radius <= 0.0 {
            bail!("radius must be positive, got {}", self.radius);
        }
        if self.radius * 2.0 > self.width.min(self.height) {
            bail!(
                "radius {} does not fit a {}x{} surface",
                self.radius,
                self.width,
                self.height
            );
        }
        if !(0.0..=1.0).contains(&self.friction) {
            bail!("friction must be within [0, 1], got {}", self.friction);
        }
        if self.theta <= 0.0 {
            bail!("theta must be positive, got {}", self.theta);
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.width,
            height: self.height,
            radius: self.radius,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn force_params(&self) -> ForceParams {
        ForceParams {
            center: self.center(),
            charge: self.charge,
            gravity: self.gravity,
            friction: self.friction,
            theta: self.theta,
        }
    }
}
