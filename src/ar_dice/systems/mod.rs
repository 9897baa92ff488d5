//! Systems module for the AR dice game
//!
//! All Bevy systems, organized into submodules by functionality:
//!
//! - `setup`: Scene initialization (camera, lights, reticle, overlay)
//! - `tracking`: Session start, event pump, start/reset, camera pose
//! - `planes`: Plane proxy spawning, resizing and teardown
//! - `reticle`: Focus point and reticle raycast
//! - `dice`: Tap collection, fall-through sweep, style cycling
//! - `input`: Gestures, buttons and keyboard shortcuts
//! - `status`: Status overlay refresh
//! - `camera`: Keyboard steering of the simulated device

mod camera;
mod dice;
mod input;
pub mod planes;
pub mod reticle;
mod setup;
mod status;
mod tracking;

pub use camera::steer_simulated_device;
pub use dice::{
    apply_style_actions, apply_tap_actions, collect_die_along_ray, pick_die, remove_die,
    sweep_fallen_dice, CollectibleDice,
};
pub use input::{
    classify_gesture, handle_control_buttons, handle_gestures, handle_keyboard_shortcuts,
    GestureTracker, Pointer,
};
pub use reticle::{
    raycast_plane, raycast_planes, show_focus_hit, track_focus_point, update_focus_reticle,
    PlaneHit, ReticleEntities,
};
pub use setup::{setup, update_button_colors};
pub use status::{refresh_status, style_label};
pub use tracking::{
    advance_session, apply_session_actions, handle_window_focus, pump_tracking_events,
    start_session, sync_camera_pose,
};
