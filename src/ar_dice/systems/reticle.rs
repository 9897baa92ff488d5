//! Focus reticle systems
//!
//! A ray from the camera through the focus point is tested against the
//! detected extent of every known plane. Where it lands, the reticle is
//! shown, and that result drives `PointToSurface` / `SwipeToPlay`.

use bevy::log::debug;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::ar_dice::types::*;

/// A ray hitting a detected surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneHit {
    pub anchor: AnchorId,
    pub point: Vec3,
    pub distance: f32,
}

/// Intersect a ray with one anchor's rectangle
pub fn raycast_plane(origin: Vec3, direction: Vec3, anchor: &PlaneAnchor) -> Option<PlaneHit> {
    if direction.y.abs() < 1e-6 {
        return None;
    }

    let t = (anchor.surface_y() - origin.y) / direction.y;
    if t < 0.0 {
        return None;
    }

    let point = origin + direction * t;
    anchor.contains_xz(point).then(|| PlaneHit {
        anchor: anchor.id,
        point,
        distance: t * direction.length(),
    })
}

/// All surfaces a ray passes through, nearest first
pub fn raycast_planes(origin: Vec3, direction: Vec3, anchors: &[PlaneAnchor]) -> Vec<PlaneHit> {
    let mut hits: Vec<PlaneHit> = anchors
        .iter()
        .filter_map(|anchor| raycast_plane(origin, direction, anchor))
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Ray from the camera through a screen point
pub fn screen_ray(camera: &Camera, camera_transform: &Transform, point: Vec2) -> Option<Ray3d> {
    camera
        .viewport_to_world(&GlobalTransform::from(*camera_transform), point)
        .ok()
}

/// Keep the focus point in sync with the window's size and orientation
pub fn track_focus_point(
    mut resized: MessageReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<GameSettings>,
    mut focus: ResMut<FocusPoint>,
) {
    let changed = resized.read().count() > 0;
    if !changed && focus.0 != Vec2::ZERO {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };

    let size = Vec2::new(window.width(), window.height());
    *focus = FocusPoint::for_viewport(size, settings.focus_bias);
    debug!("Focus point now at {:?}", focus.0);
}

/// Reticle entities, kept apart from the camera's transform
pub type ReticleEntities<'w, 's> = Query<
    'w,
    's,
    (&'static mut Transform, &'static mut Visibility),
    (With<FocusReticle>, Without<MainCamera>),
>;

/// Show the reticle at `hit` or hide it, and let the outcome drive the
/// play state
pub fn show_focus_hit(
    controller: &mut GameController,
    reticle_state: &mut ReticleState,
    reticle_query: &mut ReticleEntities,
    hit: Option<Vec3>,
) {
    reticle_state.hit = hit;

    for (mut transform, mut visibility) in reticle_query.iter_mut() {
        match hit {
            Some(point) => {
                transform.translation = point;
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    if let ReticleOutcome::Changed(state) = controller.apply_reticle(hit.is_some()) {
        debug!("Reticle moved game to {:?}", state);
    }
}

/// Raycast from the focus point and move the reticle
pub fn update_focus_reticle(
    mut controller: ResMut<GameController>,
    registry: Res<PlaneRegistry>,
    focus: Res<FocusPoint>,
    mut reticle_state: ResMut<ReticleState>,
    camera_query: Query<(&Camera, &Transform), With<MainCamera>>,
    mut reticle_query: ReticleEntities,
) {
    // No reticle while surfaces are still being detected
    let hit = if controller.state() == GameState::DetectSurface {
        None
    } else {
        camera_query
            .single()
            .ok()
            .and_then(|(camera, transform)| screen_ray(camera, transform, focus.0))
            .and_then(|ray| {
                raycast_planes(ray.origin, *ray.direction, &registry.anchors())
                    .first()
                    .map(|h| h.point)
            })
    };

    show_focus_hit(&mut controller, &mut reticle_state, &mut reticle_query, hit);
}
