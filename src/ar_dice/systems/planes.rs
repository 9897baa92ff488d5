//! Plane proxy lifecycle
//!
//! Each anchor gets a root entity with a flat mesh sized to the detected
//! extent and a kinematic body, plus a child entity holding the collision
//! volume. Colliders are never resized; an update swaps in a new one.

use bevy::log::debug;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::ar_dice::meshes::SurfaceAssets;
use crate::ar_dice::types::*;

/// Half thickness of the collision slab under a plane
pub const PLANE_HALF_THICKNESS: f32 = 0.005;
/// Smallest half extent handed to the physics engine
const MIN_HALF_EXTENT: f32 = 1e-4;

/// Half extents of the collision slab for an anchor
pub fn collider_half_extents(anchor: &PlaneAnchor) -> Vec3 {
    let half = anchor.extent * 0.5;
    Vec3::new(
        half.x.max(MIN_HALF_EXTENT),
        PLANE_HALF_THICKNESS,
        half.y.max(MIN_HALF_EXTENT),
    )
}

fn plane_mesh(anchor: &PlaneAnchor) -> Mesh {
    Mesh::from(Plane3d::new(Vec3::Y, anchor.extent * 0.5))
}

fn plane_collider(anchor: &PlaneAnchor) -> Collider {
    let half = collider_half_extents(anchor);
    Collider::cuboid(half.x, half.y, half.z)
}

/// Spawn a proxy for a new anchor. A known id is treated as an update.
pub fn on_anchor_added(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    registry: &mut PlaneRegistry,
    surface_assets: &SurfaceAssets,
    surface: &SurfaceMaterialSetting,
    anchor: PlaneAnchor,
) {
    if registry.contains(anchor.id) {
        on_anchor_updated(commands, meshes, registry, anchor);
        return;
    }

    let mut collider = Entity::PLACEHOLDER;
    let root = commands
        .spawn((
            Mesh3d(meshes.add(plane_mesh(&anchor))),
            MeshMaterial3d(surface_assets.plane_material.clone()),
            Transform::from_translation(anchor.world_center()),
            registry.visibility(),
            RigidBody::KinematicPositionBased,
            PlaneProxy { anchor: anchor.id },
        ))
        .with_children(|parent| {
            collider = parent
                .spawn((
                    Transform::from_xyz(0.0, -PLANE_HALF_THICKNESS, 0.0),
                    plane_collider(&anchor),
                    Restitution::coefficient(surface.restitution),
                    Friction::coefficient(surface.friction),
                    PlaneCollider,
                ))
                .id();
        })
        .id();

    registry.insert(anchor, ProxyEntities { root, collider });
    debug!("Added plane proxy for {} ({:?})", anchor.id, anchor.extent);
}

/// Resize an existing proxy in place
pub fn on_anchor_updated(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    registry: &mut PlaneRegistry,
    anchor: PlaneAnchor,
) {
    let Some(proxy) = registry.update(anchor) else {
        debug!("Ignoring update for unknown {}", anchor.id);
        return;
    };

    commands.entity(proxy.root).insert((
        Mesh3d(meshes.add(plane_mesh(&anchor))),
        Transform::from_translation(anchor.world_center()),
    ));
    commands
        .entity(proxy.collider)
        .remove::<Collider>()
        .insert(plane_collider(&anchor));
}

/// Tear down an anchor's proxy and everything under it
pub fn on_anchor_removed(commands: &mut Commands, registry: &mut PlaneRegistry, id: AnchorId) {
    if let Some(proxy) = registry.remove(id) {
        commands.entity(proxy.root).despawn();
        debug!("Removed plane proxy for {}", id);
    }
}

/// Hide every proxy from view; their colliders stay active
pub fn suppress_planes(
    registry: &mut PlaneRegistry,
    proxies: &mut Query<&mut Visibility, With<PlaneProxy>>,
) {
    registry.set_suppressed(true);
    for mut visibility in proxies.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}

/// Despawn every proxy and forget all anchors
pub fn clear_planes(commands: &mut Commands, registry: &mut PlaneRegistry) {
    for proxy in registry.clear() {
        commands.entity(proxy.root).despawn();
    }
    registry.set_suppressed(false);
}
