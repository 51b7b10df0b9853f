//! Click hit testing
//!
//! Targets are tested in spawn order and the first one containing the click
//! wins, even if a later target is drawn on top of it.

use glam::Vec2;

use super::entity::{Entity, ShapeKind};
use super::phase::Phase;
use crate::consts::SPECIAL_MULTIPLIER;

/// Whether `point` lies inside the target's silhouette
pub fn contains(entity: &Entity, point: Vec2) -> bool {
    match entity.shape {
        ShapeKind::Circle => entity.pos.distance(point) <= entity.size,
        ShapeKind::Rectangle => {
            let half = entity.size / 2.0;
            let d = (point - entity.pos).abs();
            d.x <= half && d.y <= half
        }
        ShapeKind::Triangle => point_in_triangle(point, triangle_vertices(entity.pos, entity.size)),
    }
}

/// Apex above the center, base corners below, each `size` away on both axes
pub fn triangle_vertices(center: Vec2, size: f32) -> [Vec2; 3] {
    [
        Vec2::new(center.x, center.y - size),
        Vec2::new(center.x - size, center.y + size),
        Vec2::new(center.x + size, center.y + size),
    ]
}

/// Barycentric sign test. Points on an edge are outside.
fn point_in_triangle(p: Vec2, [p0, p1, p2]: [Vec2; 3]) -> bool {
    let area = 0.5
        * (-p1.y * p2.x + p0.y * (-p1.x + p2.x) + p0.x * (p1.y - p2.y) + p1.x * p2.y);
    if area == 0.0 {
        return false;
    }
    let inv = 1.0 / (2.0 * area);
    let s = inv * (p0.y * p2.x - p0.x * p2.y + (p2.y - p0.y) * p.x + (p0.x - p2.x) * p.y);
    let t = inv * (p0.x * p1.y - p0.y * p1.x + (p0.y - p1.y) * p.x + (p1.x - p0.x) * p.y);
    s > 0.0 && t > 0.0 && 1.0 - s - t > 0.0
}

/// Index of the first live target containing `point`
pub fn hit_test(entities: &[Entity], point: Vec2) -> Option<usize> {
    entities
        .iter()
        .position(|e| e.is_alive() && contains(e, point))
}

/// Points for hitting a target in the given phase
pub fn points_for(phase: Phase, special: bool) -> u32 {
    let base = phase.params().base_points;
    if special { base * SPECIAL_MULTIPLIER } else { base }
}
