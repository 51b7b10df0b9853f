//! Triangle-list tessellation of 2D primitives
//!
//! Every function returns vertices in groups of three. Winding is not
//! consistent; backends should draw without culling.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

fn on_circle(center: Vec2, radius: f32, i: u32, segments: u32) -> Vec2 {
    let theta = i as f32 / segments as f32 * TAU;
    center + Vec2::new(theta.cos(), theta.sin()) * radius
}

fn push_tri(out: &mut Vec<Vertex>, [a, b, c]: [Vec2; 3], [ca, cb, cc]: [[f32; 4]; 3]) {
    out.push(Vertex::new(a.x, a.y, ca));
    out.push(Vertex::new(b.x, b.y, cb));
    out.push(Vertex::new(c.x, c.y, cc));
}

/// Two triangles covering the quad a-b-c-d (in perimeter order)
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    let mut out = Vec::with_capacity(6);
    push_tri(&mut out, [a, b, c], [color; 3]);
    push_tri(&mut out, [a, c, d], [color; 3]);
    out
}

/// Axis-aligned rectangle from its top-left corner
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    quad(
        [
            min,
            Vec2::new(min.x + size.x, min.y),
            min + size,
            Vec2::new(min.x, min.y + size.y),
        ],
        color,
    )
}

/// Filled square centered on `center`
pub fn square(center: Vec2, half: f32, color: [f32; 4]) -> Vec<Vertex> {
    rect(center - Vec2::splat(half), Vec2::splat(half * 2.0), color)
}

/// Thick line segment
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let normal = (b - a).perp().normalize_or_zero() * (width / 2.0);
    quad([a + normal, b + normal, b - normal, a - normal], color)
}

/// Closed polyline through `points`
pub fn outline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .flat_map(|i| line(points[i], points[(i + 1) % n], width, color))
        .collect()
}

pub fn triangle(points: [Vec2; 3], color: [f32; 4]) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(3);
    push_tri(&mut out, points, [color; 3]);
    out
}

/// Filled circle as a triangle fan
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(segments as usize * 3);
    for i in 0..segments {
        let a = on_circle(center, radius, i, segments);
        let b = on_circle(center, radius, i + 1, segments);
        push_tri(&mut out, [center, a, b], [color; 3]);
    }
    out
}

/// Annulus between `inner` and `outer`
pub fn ring(center: Vec2, inner: f32, outer: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    banded_disc(center, &[(inner, color), (outer, color)], segments)
}

/// Disc filled with a radial gradient. `stops` are (radius, color) pairs in
/// increasing radius; colors are interpolated between consecutive stops.
pub fn banded_disc(center: Vec2, stops: &[(f32, [f32; 4])], segments: u32) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(stops.len().saturating_sub(1) * segments as usize * 6);
    for pair in stops.windows(2) {
        let (r0, c0) = pair[0];
        let (r1, c1) = pair[1];
        for i in 0..segments {
            let in_a = on_circle(center, r0, i, segments);
            let in_b = on_circle(center, r0, i + 1, segments);
            let out_a = on_circle(center, r1, i, segments);
            let out_b = on_circle(center, r1, i + 1, segments);
            push_tri(&mut out, [in_a, out_a, in_b], [c0, c1, c0]);
            push_tri(&mut out, [in_b, out_a, out_b], [c0, c1, c1]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_vertex_counts() {
        assert_eq!(circle(Vec2::ZERO, 5.0, WHITE, 16).len(), 48);
        assert_eq!(ring(Vec2::ZERO, 4.0, 5.0, WHITE, 16).len(), 96);
        assert_eq!(square(Vec2::ZERO, 3.0, WHITE).len(), 6);
        assert_eq!(triangle([Vec2::ZERO, Vec2::X, Vec2::Y], WHITE).len(), 3);
        assert_eq!(outline(&[Vec2::ZERO, Vec2::X, Vec2::Y], 1.0, WHITE).len(), 18);
        assert!(outline(&[Vec2::ZERO], 1.0, WHITE).is_empty());
    }

    #[test]
    fn test_circle_stays_on_radius() {
        let center = Vec2::new(100.0, 50.0);
        for v in circle(center, 10.0, WHITE, 12) {
            let d = Vec2::from(v.position).distance(center);
            assert!(d < 10.0 + 1e-3);
        }
    }

    #[test]
    fn test_square_extent() {
        let verts = square(Vec2::new(10.0, 10.0), 4.0, WHITE);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 6.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 14.0);
    }

    #[test]
    fn test_line_width() {
        let verts = line(Vec2::ZERO, Vec2::new(10.0, 0.0), 3.0, WHITE);
        for v in &verts {
            assert!((v.position[1].abs() - 1.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_gradient_colors_follow_stops() {
        let red = [1.0, 0.0, 0.0, 1.0];
        let clear = [1.0, 0.0, 0.0, 0.0];
        let verts = banded_disc(Vec2::ZERO, &[(0.0, red), (10.0, clear)], 8);
        for v in verts {
            let r = Vec2::from(v.position).length();
            let expected = if r < 5.0 { 1.0 } else { 0.0 };
            assert_eq!(v.color[3], expected);
        }
    }
}
