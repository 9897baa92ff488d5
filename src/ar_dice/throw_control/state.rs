//! Throw geometry
//!
//! Pure functions computing spawn transforms and launch impulses from a
//! camera pose.

use std::f32::consts::PI;

use bevy::prelude::*;
use rand::Rng;

use crate::ar_dice::types::ThrowTuning;

/// Everything needed to spawn one thrown die
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrowPlan {
    pub position: Vec3,
    /// Euler angles (XYZ), each in `[0, pi]`
    pub euler: Vec3,
    pub rotation: Quat,
    pub impulse: Vec3,
}

/// Translation of a camera-to-world transform
pub fn camera_position(camera: &Mat4) -> Vec3 {
    camera.w_axis.truncate()
}

/// Spawn point for a die: camera translation plus `offset` in world axes
pub fn spawn_position(camera: &Mat4, offset: Vec3) -> Vec3 {
    camera_position(camera) + offset
}

/// Random tumble so dice never leave the hand aligned with the camera
pub fn random_euler(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(0.0..=PI),
        rng.gen_range(0.0..=PI),
        rng.gen_range(0.0..=PI),
    )
}

/// Launch impulse toward the reticle.
///
/// The strength grows with the camera-to-reticle distance. The direction
/// is the camera's forward axis (the negated third basis column) with
/// `vertical_bias` taken off the backward axis' Y before negation, which
/// lobs the die up so it arcs onto the table.
pub fn launch_impulse(camera: &Mat4, reticle: Vec3, tuning: &ThrowTuning) -> Vec3 {
    let distance = reticle.distance(camera_position(camera));
    let strength = distance * tuning.impulse_scale;
    let back = camera.z_axis.truncate();

    -strength * Vec3::new(back.x, back.y - tuning.vertical_bias, back.z)
}

/// Plan the throw of one die
pub fn plan_throw(
    camera: &Mat4,
    offset: Vec3,
    reticle: Vec3,
    rng: &mut impl Rng,
    tuning: &ThrowTuning,
) -> ThrowPlan {
    let euler = random_euler(rng);
    ThrowPlan {
        position: spawn_position(camera, offset),
        euler,
        rotation: Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z),
        impulse: launch_impulse(camera, reticle, tuning),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ar_dice::types::DICE_OFFSETS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tilted_camera() -> Mat4 {
        Mat4::from_rotation_translation(
            Quat::from_rotation_y(0.4) * Quat::from_rotation_x(-0.6),
            Vec3::new(0.3, 0.45, 0.7),
        )
    }

    #[test]
    fn test_spawn_positions_add_offsets_exactly() {
        let camera = tilted_camera();
        let mut rng = StdRng::seed_from_u64(7);
        let tuning = ThrowTuning::default();

        let first = plan_throw(&camera, DICE_OFFSETS[0], Vec3::ZERO, &mut rng, &tuning);
        assert_eq!(first.position, Vec3::new(0.3, 0.45, 0.7));

        for offset in &DICE_OFFSETS[1..] {
            let plan = plan_throw(&camera, *offset, Vec3::ZERO, &mut rng, &tuning);
            assert_eq!(plan.position, Vec3::new(0.3, 0.45, 0.7) + *offset);
        }
    }

    #[test]
    fn test_euler_angles_within_half_turn() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let e = random_euler(&mut rng);
            for angle in [e.x, e.y, e.z] {
                assert!((0.0..=PI).contains(&angle));
            }
        }
    }

    #[test]
    fn test_same_seed_same_orientation() {
        let camera = tilted_camera();
        let tuning = ThrowTuning::default();
        let a = plan_throw(
            &camera,
            Vec3::ZERO,
            Vec3::ZERO,
            &mut StdRng::seed_from_u64(3),
            &tuning,
        );
        let b = plan_throw(
            &camera,
            Vec3::ZERO,
            Vec3::ZERO,
            &mut StdRng::seed_from_u64(3),
            &tuning,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_level_camera_throws_forward_and_up() {
        // Identity rotation: camera looks down -Z, backward axis is +Z.
        let camera = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let reticle = Vec3::new(0.0, 0.0, 0.0);
        let tuning = ThrowTuning::default();

        let impulse = launch_impulse(&camera, reticle, &tuning);
        let k = 1.0 * 2.5;
        assert!((impulse.x - 0.0).abs() < 1e-6);
        assert!((impulse.y - k * std::f32::consts::FRAC_PI_4).abs() < 1e-5);
        assert!((impulse.z + k).abs() < 1e-5);
    }

    #[test]
    fn test_impulse_scales_with_distance() {
        let camera = tilted_camera();
        let tuning = ThrowTuning::default();
        let origin = camera_position(&camera);
        let near = launch_impulse(&camera, origin + Vec3::new(0.0, -0.5, 0.0), &tuning);
        let far = launch_impulse(&camera, origin + Vec3::new(0.0, -1.0, 0.0), &tuning);
        assert!((far - near * 2.0).length() < 1e-5);
    }

    #[test]
    fn test_reticle_at_camera_gives_no_impulse() {
        let camera = tilted_camera();
        let impulse = launch_impulse(&camera, camera_position(&camera), &ThrowTuning::default());
        assert_eq!(impulse, Vec3::ZERO);
    }
}
