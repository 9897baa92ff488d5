//! Dice lifecycle systems
//!
//! Dice leave the table in two ways: the player taps them, or they fall
//! off the world. Both paths go through [`remove_die`], which only acts
//! on the first removal of an entity.

use bevy::log::{debug, info};
use bevy::prelude::*;

use super::reticle::{raycast_planes, screen_ray};
use crate::ar_dice::meshes::face_up;
use crate::ar_dice::types::*;

/// Return a die to the hand and despawn it. Returns `false` when the die
/// was already removed.
pub fn remove_die(
    commands: &mut Commands,
    ledger: &mut DiceLedger,
    entity: Entity,
    reason: DieRemoval,
) -> bool {
    if !ledger.release(entity) {
        return false;
    }
    commands.entity(entity).despawn();
    debug!(
        "Die {:?} removed ({:?}), {} in hand",
        entity,
        reason,
        ledger.available()
    );
    true
}

/// Distance along a ray to the first contact with a sphere
fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO {
        return None;
    }

    let to_center = center - origin;
    let along = to_center.dot(dir);
    let miss_sq = to_center.length_squared() - along * along;
    let r_sq = radius * radius;
    if miss_sq > r_sq {
        return None;
    }

    let half_chord = (r_sq - miss_sq).sqrt();
    let near = along - half_chord;
    let far = along + half_chord;
    if far < 0.0 {
        None
    } else {
        Some(near.max(0.0))
    }
}

/// Find the die a tap ray lands on.
///
/// Dice are approximated by their bounding spheres. A detected surface
/// nearer than the die hides it.
pub fn pick_die<I>(origin: Vec3, direction: Vec3, dice: I, planes: &[PlaneAnchor]) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, Vec3, f32)>,
{
    let (entity, distance) = dice
        .into_iter()
        .filter_map(|(entity, center, radius)| {
            ray_sphere(origin, direction, center, radius).map(|d| (entity, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))?;

    let blocked = raycast_planes(origin, direction.normalize_or_zero(), planes)
        .first()
        .is_some_and(|hit| hit.distance < distance);

    (!blocked).then_some(entity)
}

/// Dice a tap can reach
pub type CollectibleDice<'w, 's> =
    Query<'w, 's, (Entity, &'static Transform, &'static PokerDie), With<Collectible>>;

/// Collect the die a tap ray lands on, if any
pub fn collect_die_along_ray(
    commands: &mut Commands,
    ledger: &mut DiceLedger,
    anchors: &[PlaneAnchor],
    ray: Ray3d,
    dice: &CollectibleDice,
) -> Option<Entity> {
    let candidates = dice
        .iter()
        .map(|(entity, transform, die)| (entity, transform.translation, die.pick_radius));
    let entity = pick_die(ray.origin, *ray.direction, candidates, anchors)?;
    let showing = dice.get(entity).ok().map(|(_, transform, _)| face_up(transform.rotation));

    if !remove_die(commands, ledger, entity, DieRemoval::Collected) {
        return None;
    }
    if let Some(face) = showing {
        info!("Collected a die showing {}, {} in hand", face.label(), ledger.available());
    }
    Some(entity)
}

/// Handle tap actions: collect the die under the finger
pub fn apply_tap_actions(
    mut commands: Commands,
    mut actions: MessageReader<ArAction>,
    mut ledger: ResMut<DiceLedger>,
    registry: Res<PlaneRegistry>,
    camera_query: Query<(&Camera, &Transform), With<MainCamera>>,
    dice_query: CollectibleDice,
) {
    for action in actions.read() {
        let ArAction::Tap(point) = *action else {
            continue;
        };

        let Some(ray) = camera_query
            .single()
            .ok()
            .and_then(|(camera, transform)| screen_ray(camera, transform, point))
        else {
            continue;
        };

        collect_die_along_ray(&mut commands, &mut ledger, &registry.anchors(), ray, &dice_query);
    }
}

/// Remove dice that fell through the world
pub fn sweep_fallen_dice(
    mut commands: Commands,
    mut ledger: ResMut<DiceLedger>,
    settings: Res<GameSettings>,
    dice_query: Query<(Entity, &Transform), With<Collectible>>,
) {
    for (entity, transform) in dice_query.iter() {
        if transform.translation.y < settings.floor_threshold {
            remove_die(&mut commands, &mut ledger, entity, DieRemoval::Lost);
        }
    }
}

/// Handle style button presses
pub fn apply_style_actions(
    mut actions: MessageReader<ArAction>,
    mut controller: ResMut<GameController>,
) {
    for action in actions.read() {
        if *action == ArAction::CycleStyle {
            let style = controller.cycle_style();
            info!("Dice style is now {} ({})", style.name(), style.index());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(n: usize) -> (World, Vec<Entity>) {
        let mut world = World::new();
        let ids = (0..n).map(|_| world.spawn_empty().id()).collect();
        (world, ids)
    }

    #[test]
    fn test_ray_sphere_hit_and_miss() {
        let hit = ray_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -2.0), 0.5);
        assert!((hit.unwrap() - 1.5).abs() < 1e-6);
        assert!(ray_sphere(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(1.0, 0.0, -2.0), 0.5).is_none());
        assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -2.0), 0.5).is_none());
    }

    #[test]
    fn test_pick_nearest_die() {
        let (_world, ids) = entities(2);
        let dice = vec![
            (ids[0], Vec3::new(0.0, 0.0, -3.0), 0.1),
            (ids[1], Vec3::new(0.0, 0.0, -1.0), 0.1),
        ];
        assert_eq!(pick_die(Vec3::ZERO, Vec3::NEG_Z, dice, &[]), Some(ids[1]));
    }

    #[test]
    fn test_pick_nothing_on_empty_space() {
        let (_world, ids) = entities(1);
        let dice = vec![(ids[0], Vec3::new(0.5, 0.0, -1.0), 0.1)];
        assert_eq!(pick_die(Vec3::ZERO, Vec3::NEG_Z, dice, &[]), None);
    }

    #[test]
    fn test_surface_in_front_hides_die() {
        let (_world, ids) = entities(1);
        let table = PlaneAnchor::new(
            AnchorId(1),
            Vec3::new(0.0, 0.0, 0.0),
            Vec2::ZERO,
            Vec2::new(2.0, 2.0),
        );
        let under_table = vec![(ids[0], Vec3::new(0.0, -0.5, 0.0), 0.05)];
        assert_eq!(
            pick_die(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, under_table, &[table]),
            None
        );

        let on_table = vec![(ids[0], Vec3::new(0.0, 0.02, 0.0), 0.05)];
        assert_eq!(
            pick_die(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, on_table, &[table]),
            Some(ids[0])
        );
    }
}
