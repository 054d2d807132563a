mod app;
mod config;
mod sim;
mod util;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;

use crate::config::SimulationConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with simulation parameters; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<f32>,
    #[arg(long)]
    height: Option<f32>,
    #[arg(long)]
    radius: Option<f32>,
    /// Repulsive charge between every pair of nodes (negative repels).
    #[arg(long, allow_negative_numbers = true)]
    charge: Option<f32>,
    #[arg(long)]
    gravity: Option<f32>,
    /// Number of nodes present at startup.
    #[arg(long)]
    nodes: Option<usize>,
    /// Place new nodes at the surface centre instead of the click point.
    #[arg(long)]
    spawn_at_center: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(radius) = self.radius {
            config.radius = radius;
        }
        if let Some(charge) = self.charge {
            config.charge = charge;
        }
        if let Some(gravity) = self.gravity {
            config.gravity = gravity;
        }
        if let Some(nodes) = self.nodes {
            config.initial_nodes = nodes;
        }
        config.spawn_at_center |= self.spawn_at_center;

        config.validate().context("invalid simulation config")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.resolve_config()?;
    info!(
        "starting with {}x{} surface, radius {}, charge {}, gravity {}, {} nodes",
        config.width,
        config.height,
        config.radius,
        config.charge,
        config.gravity,
        config.initial_nodes
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.width + 32.0, config.height + 72.0]),
        ..Default::default()
    };

    eframe::run_native(
        "node-bubbles",
        options,
        Box::new(move |cc| Ok(Box::new(app::NodeBubblesApp::new(cc, config)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
