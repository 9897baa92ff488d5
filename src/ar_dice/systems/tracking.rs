//! Tracking session systems
//!
//! The session's callbacks arrive through its inbox; [`pump_tracking_events`]
//! is the only place they are applied to the world. Start and reset, which
//! reconfigure the session, are applied by [`apply_session_actions`].

use bevy::log::{debug, error, info, warn};
use bevy::prelude::*;
use bevy::window::WindowFocused;

use super::planes::*;
use crate::ar_dice::meshes::SurfaceAssets;
use crate::ar_dice::types::*;

/// Give the session its slice of frame time
pub fn advance_session<S: TrackingSession>(time: Res<Time>, mut host: ResMut<TrackingHost<S>>) {
    host.session.advance(time.delta_secs());
}

/// Check for world tracking once at startup and start plane detection
pub fn start_session<S: TrackingSession>(
    mut host: ResMut<TrackingHost<S>>,
    mut board: ResMut<StatusBoard>,
) {
    if !host.session.is_supported() {
        let fault = TrackingFault::Unsupported;
        error!("{}", fault);
        board.tracking_status = fault.to_string();
        return;
    }

    host.session.configure(SessionConfig::default());
    board.tracking_status = host.session.tracking_quality().status_message().to_string();
    info!("Tracking session started with plane detection");
}

/// Apply everything the session reported since the last frame
#[allow(clippy::too_many_arguments)]
pub fn pump_tracking_events<S: TrackingSession>(
    mut commands: Commands,
    host: Res<TrackingHost<S>>,
    mut meshes: ResMut<Assets<Mesh>>,
    surface_assets: Res<SurfaceAssets>,
    settings: Res<GameSettings>,
    mut registry: ResMut<PlaneRegistry>,
    mut board: ResMut<StatusBoard>,
    mut actions: MessageWriter<ArAction>,
) {
    for event in host.inbox.drain() {
        match event {
            TrackingEvent::AnchorAdded(anchor) => on_anchor_added(
                &mut commands,
                &mut meshes,
                &mut registry,
                &surface_assets,
                &settings.surface,
                anchor,
            ),
            TrackingEvent::AnchorUpdated(anchor) => {
                on_anchor_updated(&mut commands, &mut meshes, &mut registry, anchor)
            }
            TrackingEvent::AnchorRemoved(id) => {
                on_anchor_removed(&mut commands, &mut registry, id)
            }
            TrackingEvent::QualityChanged(quality) => {
                if quality.is_degraded() {
                    warn!("{}", TrackingFault::Degraded(quality));
                } else {
                    debug!("Tracking back to normal");
                }
                board.tracking_status = quality.status_message().to_string();
            }
            TrackingEvent::Failed(reason) => {
                let fault = TrackingFault::SessionFailure(reason);
                error!("{}", fault);
                board.tracking_status = fault.to_string();
            }
            TrackingEvent::Interrupted => {
                let fault = TrackingFault::Interrupted;
                warn!("{}", fault);
                board.tracking_status = fault.to_string();
            }
            TrackingEvent::InterruptionEnded => {
                info!("Tracking interruption ended, resetting");
                actions.write(ArAction::Reset);
                board.tracking_status = "AR Session Interruption Ended".to_string();
            }
            TrackingEvent::CoachingFinished => {
                debug!("Surface guidance finished");
                actions.write(ArAction::Start);
            }
            TrackingEvent::CoachingResetRequested => {
                debug!("Surface guidance asked for a fresh session");
                actions.write(ArAction::Reset);
            }
        }
    }
}

/// Handle start and reset actions
#[allow(clippy::too_many_arguments)]
pub fn apply_session_actions<S: TrackingSession>(
    mut commands: Commands,
    mut actions: MessageReader<ArAction>,
    mut host: ResMut<TrackingHost<S>>,
    mut controller: ResMut<GameController>,
    mut registry: ResMut<PlaneRegistry>,
    mut ledger: ResMut<DiceLedger>,
    mut reticle: ResMut<ReticleState>,
    mut proxies: Query<&mut Visibility, With<PlaneProxy>>,
) {
    for action in actions.read() {
        match action {
            ArAction::Start => {
                if !controller.start() {
                    debug!("Start ignored in {:?}", controller.state());
                    continue;
                }
                suppress_planes(&mut registry, &mut proxies);
                host.session.configure(SessionConfig {
                    plane_detection: false,
                });
                info!("Surface detection finished with {} plane(s)", registry.len());
            }
            ArAction::Reset => {
                controller.reset();
                let dropped = host.inbox.clear();
                if dropped > 0 {
                    debug!("Dropped {} stale tracking event(s)", dropped);
                }
                if controller.tracking_supported() {
                    host.session
                        .reset(SessionConfig::default(), ResetOptions::fresh());
                }
                clear_planes(&mut commands, &mut registry);
                for entity in ledger.release_all() {
                    commands.entity(entity).despawn();
                }
                reticle.hit = None;
                info!("Game reset, scanning for surfaces");
            }
            _ => {}
        }
    }
}

/// Move the camera to the device pose
pub fn sync_camera_pose<S: TrackingSession>(
    host: Res<TrackingHost<S>>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Some(pose) = host.session.current_pose() else {
        return;
    };
    for mut transform in camera_query.iter_mut() {
        *transform = Transform::from_matrix(pose);
    }
}

/// Pause the session while the window is in the background
pub fn handle_window_focus<S: TrackingSession>(
    mut focus_events: MessageReader<WindowFocused>,
    mut host: ResMut<TrackingHost<S>>,
) {
    for event in focus_events.read() {
        if event.focused {
            host.session.resume();
        } else {
            host.session.pause();
        }
    }
}
