//! Throw Control Systems
//!
//! Spawns dice with dynamic rigid bodies and hands their launch impulse to
//! the physics engine.

use bevy::log::{debug, info};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::state::*;
use crate::ar_dice::meshes::{label_transform, pick_radius, DiceAssets};
use crate::ar_dice::types::*;

/// Handle swipe actions: throw every die still in hand
#[allow(clippy::too_many_arguments)]
pub fn apply_throw_actions<S: TrackingSession>(
    mut commands: Commands,
    mut actions: MessageReader<ArAction>,
    controller: Res<GameController>,
    host: Res<TrackingHost<S>>,
    reticle: Res<ReticleState>,
    dice_assets: Res<DiceAssets>,
    settings: Res<GameSettings>,
    mut ledger: ResMut<DiceLedger>,
    mut rng: ResMut<DiceRng>,
) {
    for action in actions.read() {
        if *action != ArAction::Swipe {
            continue;
        }

        if !controller.accepts_swipe() || ledger.available() == 0 {
            debug!(
                "Swipe ignored in {:?} with {} dice in hand",
                controller.state(),
                ledger.available()
            );
            continue;
        }

        let (Some(camera), Some(target)) = (host.session.current_pose(), reticle.hit) else {
            continue;
        };

        let thrown = throw_dice(
            &mut commands,
            &dice_assets,
            &mut ledger,
            &mut rng,
            &camera,
            target,
            controller.style(),
            &settings.throw,
        );
        info!(
            "Threw {} {} dice, {} left in hand",
            thrown,
            controller.style().name(),
            ledger.available()
        );
    }
}

/// Throw one die per slot left in hand. Returns how many were thrown.
#[allow(clippy::too_many_arguments)]
pub fn throw_dice(
    commands: &mut Commands,
    dice_assets: &DiceAssets,
    ledger: &mut DiceLedger,
    rng: &mut DiceRng,
    camera: &Mat4,
    target: Vec3,
    style: DiceStyle,
    tuning: &ThrowTuning,
) -> usize {
    let Some(variant) = dice_assets.variant(style) else {
        return 0;
    };

    let count = ledger.available().min(DICE_OFFSETS.len());
    let mut thrown = 0;

    for offset in DICE_OFFSETS.iter().take(count) {
        let plan = plan_throw(camera, *offset, target, &mut rng.0, tuning);

        // Bodies start at rest so the impulse is the only motion they get.
        let entity = commands
            .spawn((
                Mesh3d(variant.mesh.clone()),
                MeshMaterial3d(variant.material.clone()),
                Transform::from_translation(plan.position).with_rotation(plan.rotation),
                RigidBody::Dynamic,
                variant.collider.clone(),
                Velocity::zero(),
                ExternalImpulse {
                    impulse: plan.impulse,
                    torque_impulse: Vec3::ZERO,
                },
                Restitution::coefficient(style.restitution()),
                Friction::coefficient(0.6),
                ColliderMassProperties::Mass(tuning.die_mass),
                Ccd::enabled(),
                PokerDie {
                    style,
                    pick_radius: pick_radius(variant.size),
                },
                Collectible,
            ))
            .with_children(|parent| {
                for label in dice_assets.face_labels() {
                    parent.spawn((
                        Mesh3d(label.mesh.clone()),
                        MeshMaterial3d(variant.label_material.clone()),
                        label_transform(label.normal, variant.size),
                        FaceLabel(label.face),
                    ));
                }
            })
            .id();

        if ledger.register(entity) {
            thrown += 1;
        } else {
            commands.entity(entity).despawn();
        }
    }

    thrown
}
