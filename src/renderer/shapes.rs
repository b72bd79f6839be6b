//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in viewport pixels.

use glam::Vec2;

use super::vertex::{Rgba, Vertex};

/// Two triangles covering a quad given in winding order
pub fn quad(corners: [Vec2; 4], color: Rgba) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    [a, b, c, c, d, a]
        .into_iter()
        .map(|p| Vertex::at(p, color))
        .collect()
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: Rgba) -> Vec<Vertex> {
    quad(
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ],
        color,
    )
}

/// Corners of a square rotated about its center (degrees, clockwise on screen)
pub fn rotated_square_corners(center: Vec2, half: f32, rotation_deg: f32) -> [Vec2; 4] {
    let rot = Vec2::from_angle(rotation_deg.to_radians());
    [
        Vec2::new(-half, -half),
        Vec2::new(half, -half),
        Vec2::new(half, half),
        Vec2::new(-half, half),
    ]
    .map(|corner| center + rot.rotate(corner))
}

/// Filled square rotated about its center
pub fn rotated_square(center: Vec2, half: f32, rotation_deg: f32, color: Rgba) -> Vec<Vertex> {
    quad(rotated_square_corners(center, half, rotation_deg), color)
}

/// Thick line segment
pub fn segment(a: Vec2, b: Vec2, thickness: f32, color: Rgba) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (thickness / 2.0);
    quad([a + perp, b + perp, b - perp, a - perp], color)
}

/// Outline of a rotated square
pub fn square_frame(
    center: Vec2,
    half: f32,
    rotation_deg: f32,
    thickness: f32,
    color: Rgba,
) -> Vec<Vertex> {
    let corners = rotated_square_corners(center, half, rotation_deg);
    let mut vertices = Vec::with_capacity(24);
    for i in 0..4 {
        vertices.extend(segment(corners[i], corners[(i + 1) % 4], thickness, color));
    }
    vertices
}

/// Split `a -> b` into dashes of `dash` length separated by `gap`.
/// The last dash is cut short at `b`.
pub fn dashes(a: Vec2, b: Vec2, dash: f32, gap: f32) -> Vec<(Vec2, Vec2)> {
    let length = a.distance(b);
    if length <= 0.0 || dash <= 0.0 {
        return Vec::new();
    }
    let dir = (b - a) / length;
    let step = dash + gap.max(0.0);

    let mut out = Vec::new();
    let mut t = 0.0;
    while t < length {
        let end = (t + dash).min(length);
        out.push((a + dir * t, a + dir * end));
        t += step;
    }
    out
}

/// Dashed outline of an axis-aligned box centered on `center`
pub fn dashed_box(
    center: Vec2,
    size: Vec2,
    dash: f32,
    gap: f32,
    thickness: f32,
    color: Rgba,
) -> Vec<Vertex> {
    let min = center - size / 2.0;
    let max = center + size / 2.0;
    let edges = [
        (min, Vec2::new(max.x, min.y)),
        (Vec2::new(min.x, max.y), max),
        (min, Vec2::new(min.x, max.y)),
        (Vec2::new(max.x, min.y), max),
    ];

    let mut vertices = Vec::new();
    for (a, b) in edges {
        for (start, end) in dashes(a, b, dash, gap) {
            vertices.extend(segment(start, end, thickness, color));
        }
    }
    vertices
}
