use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use super::node::{Node, NodeId};
use super::quadtree::{Region, SpatialIndex, Visit};

/// Centres closer than this are treated as coincident.
pub const COINCIDENT_EPSILON: f32 = 1e-4;

pub fn fallback_direction(active: NodeId, other: NodeId) -> Vec2 {
    let angle = ((active.0 as f32) * 0.618_034 + (other.0 as f32) * 0.414_214) * TAU;
    vec2(angle.cos(), angle.sin())
}

/// Separates two overlapping circles, splitting the correction evenly.
///
/// Returns the corrected `(active, other)` positions, or `None` when the
/// centres are at least `min_distance` apart. After correction the centres
/// are exactly `min_distance` apart along the axis joining them. Coincident
/// centres are split along `fallback`.
pub fn resolve_overlap(
    active: Vec2,
    other: Vec2,
    min_distance: f32,
    fallback: Vec2,
) -> Option<(Vec2, Vec2)> {
    let delta = active - other;
    let distance = delta.length();
    if distance.is_nan() || distance >= min_distance {
        return None;
    }

    if distance <= COINCIDENT_EPSILON {
        let shift = fallback * (min_distance * 0.5);
        return Some((active + shift, other - shift));
    }

    let factor = (distance - min_distance) / distance * 0.5;
    let shift = delta * factor;
    Some((active - shift, other + shift))
}

/// Pushes `nodes[active]` apart from every overlapping node found in `index`.
///
/// Both members of an overlapping pair move, so corrections are visible to
/// later pairs in the same pass. Regions that cannot hold a centre within
/// `2 × radius` of the active node's starting position are skipped.
pub fn collide_node<I>(index: &I, nodes: &mut [Node], active: usize, radius: f32)
where
    I: SpatialIndex,
{
    let min_distance = radius * 2.0;
    let reach = Region::around(nodes[active].position, min_distance);

    index.visit(|region, members| {
        for &other in members {
            if other == active || other >= nodes.len() {
                continue;
            }

            let fallback = fallback_direction(nodes[active].id, nodes[other].id);
            if let Some((moved_active, moved_other)) = resolve_overlap(
                nodes[active].position,
                nodes[other].position,
                min_distance,
                fallback,
            ) {
                nodes[active].position = moved_active;
                nodes[other].position = moved_other;
            }
        }

        if region.intersects(reach) {
            Visit::Descend
        } else {
            Visit::Skip
        }
    });
}
