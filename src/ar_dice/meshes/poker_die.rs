use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::ar_dice::types::PokerFace;

/// Outward normal of each face and the rank printed on it. Opposite faces
/// pair Nine/Ace, Ten/King and Jack/Queen.
pub const POKER_FACES: [(Vec3, PokerFace); 6] = [
    (Vec3::Y, PokerFace::Ace),
    (Vec3::NEG_Y, PokerFace::Nine),
    (Vec3::X, PokerFace::King),
    (Vec3::NEG_X, PokerFace::Ten),
    (Vec3::Z, PokerFace::Queen),
    (Vec3::NEG_Z, PokerFace::Jack),
];

/// Cube mesh and collider for a poker die of edge length `size`
pub fn create_poker_die(size: f32) -> (Mesh, Collider) {
    let mesh = Mesh::from(Cuboid::new(size, size, size));
    let collider = Collider::cuboid(size / 2.0, size / 2.0, size / 2.0);

    (mesh, collider)
}

/// Radius of the sphere that encloses a die, used for tap picking
pub fn pick_radius(size: f32) -> f32 {
    size * 0.5 * 3.0_f32.sqrt()
}

/// The rank showing on top of a die with the given rotation
pub fn face_up(rotation: Quat) -> PokerFace {
    let mut best = PokerFace::Ace;
    let mut best_dot = f32::NEG_INFINITY;

    for (normal, face) in POKER_FACES {
        let dot = (rotation * normal).dot(Vec3::Y);
        if dot > best_dot {
            best_dot = dot;
            best = face;
        }
    }

    best
}
