//! Rank glyphs printed on die faces
//!
//! Glyphs are flat strokes in a cell one unit tall, facing +Z. A label is
//! placed just above its face and scaled to the die.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::ar_dice::types::PokerFace;

const STROKE_WIDTH: f32 = 0.14;
const CELL_HALF_WIDTH: f32 = 0.3;
const CELL_HALF_HEIGHT: f32 = 0.5;
const CELL_SPACING: f32 = 0.12;

/// Label size relative to the die edge
pub const LABEL_SCALE: f32 = 0.55;
/// Gap between a face and its label, relative to the die edge
const LABEL_LIFT: f32 = 0.01;

type Stroke = (Vec2, Vec2);

fn glyph_strokes(glyph: char) -> Vec<Stroke> {
    let (w, h) = (CELL_HALF_WIDTH, CELL_HALF_HEIGHT);
    let top = (Vec2::new(-w, h), Vec2::new(w, h));
    let bottom = (Vec2::new(-w, -h), Vec2::new(w, -h));
    let left = (Vec2::new(-w, -h), Vec2::new(-w, h));
    let right = (Vec2::new(w, -h), Vec2::new(w, h));

    match glyph {
        '0' => vec![top, bottom, left, right],
        '1' => vec![
            (Vec2::new(0.0, -h), Vec2::new(0.0, h)),
            (Vec2::new(-w * 0.6, h * 0.6), Vec2::new(0.0, h)),
        ],
        '9' => vec![
            top,
            bottom,
            right,
            (Vec2::new(-w, 0.0), Vec2::new(w, 0.0)),
            (Vec2::new(-w, 0.0), Vec2::new(-w, h)),
        ],
        'J' => vec![
            top,
            bottom,
            right,
            (Vec2::new(-w, -h), Vec2::new(-w, -h * 0.3)),
        ],
        'Q' => vec![
            top,
            bottom,
            left,
            right,
            (Vec2::new(0.0, -h * 0.4), Vec2::new(w * 1.2, -h * 1.2)),
        ],
        'K' => vec![
            left,
            (Vec2::new(-w, 0.0), Vec2::new(w, h)),
            (Vec2::new(-w, 0.0), Vec2::new(w, -h)),
        ],
        'A' => vec![
            (Vec2::new(-w, -h), Vec2::new(0.0, h)),
            (Vec2::new(0.0, h), Vec2::new(w, -h)),
            (Vec2::new(-w * 0.55, -h * 0.15), Vec2::new(w * 0.55, -h * 0.15)),
        ],
        _ => Vec::new(),
    }
}

/// Add one stroke as a quad. Ends are extended by half the stroke width so
/// corners close.
fn push_stroke(positions: &mut Vec<[f32; 3]>, indices: &mut Vec<u32>, from: Vec2, to: Vec2) {
    let along = (to - from).normalize_or_zero();
    if along == Vec2::ZERO {
        return;
    }
    let half = STROKE_WIDTH / 2.0;
    let side = along.perp() * half;
    let (a, b) = (from - along * half, to + along * half);

    let base = positions.len() as u32;
    for p in [a - side, b - side, b + side, a + side] {
        positions.push([p.x, p.y, 0.0]);
    }
    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

/// Number of quads in a face's label
pub fn label_stroke_count(face: PokerFace) -> usize {
    face.label().chars().map(|c| glyph_strokes(c).len()).sum()
}

/// Flat mesh of a face's rank, centered on the origin and at most one unit
/// wide or tall (not counting stroke width)
pub fn create_label_mesh(face: PokerFace) -> Mesh {
    let glyphs: Vec<char> = face.label().chars().collect();
    let cells = glyphs.len() as f32;
    let cell_width = CELL_HALF_WIDTH * 2.0;
    let total_width = cells * cell_width + (cells - 1.0).max(0.0) * CELL_SPACING;
    let start_x = -total_width / 2.0 + CELL_HALF_WIDTH;
    let fit = 1.0 / total_width.max(CELL_HALF_HEIGHT * 2.0);

    let mut positions = Vec::new();
    let mut indices = Vec::new();
    for (i, glyph) in glyphs.iter().enumerate() {
        let offset = Vec2::new(start_x + i as f32 * (cell_width + CELL_SPACING), 0.0);
        for (from, to) in glyph_strokes(*glyph) {
            push_stroke(&mut positions, &mut indices, (from + offset) * fit, (to + offset) * fit);
        }
    }

    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs: Vec<[f32; 2]> = positions.iter().map(|p| [p[0] + 0.5, 0.5 - p[1]]).collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

/// Rotation that turns a label's +Z toward `normal`, keeping side labels
/// upright
pub fn label_rotation(normal: Vec3) -> Quat {
    if normal.y.abs() > 0.99 {
        Quat::from_rotation_x(-normal.y.signum() * std::f32::consts::FRAC_PI_2)
    } else {
        Quat::from_rotation_y(normal.x.atan2(normal.z))
    }
}

/// Where a label sits relative to its die
pub fn label_transform(normal: Vec3, die_size: f32) -> Transform {
    Transform::from_translation(normal * die_size * (0.5 + LABEL_LIFT))
        .with_rotation(label_rotation(normal))
        .with_scale(Vec3::splat(die_size * LABEL_SCALE))
}
