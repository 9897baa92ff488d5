//! AR poker dice
//!
//! Scan a table, aim the reticle, swipe to throw a hand of five dice, tap
//! them to collect. [`ArDicePlugin`] wires everything into a Bevy app for
//! any [`TrackingSession`](types::TrackingSession) the host provides.

pub mod meshes;
pub mod simulated_session;
pub mod systems;
pub mod throw_control;
pub mod types;

use std::marker::PhantomData;

use bevy::log::info;
use bevy::prelude::*;

use systems::*;
use throw_control::apply_throw_actions;
use types::*;

/// Game plugin, generic over the tracking host.
///
/// Expects a `TrackingHost<S>` resource to be inserted before the app runs.
pub struct ArDicePlugin<S: TrackingSession> {
    settings: GameSettings,
    _session: PhantomData<fn() -> S>,
}

impl<S: TrackingSession> ArDicePlugin<S> {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            _session: PhantomData,
        }
    }
}

impl<S: TrackingSession> Plugin for ArDicePlugin<S> {
    fn build(&self, app: &mut App) {
        let settings = self.settings.clone();

        let supported = app
            .world()
            .get_resource::<TrackingHost<S>>()
            .is_some_and(|host| host.session.is_supported());

        let rng = match settings.seed {
            Some(seed) => {
                info!("Dice orientations seeded with {}", seed);
                DiceRng::seeded(seed)
            }
            None => DiceRng::from_entropy(),
        };

        app.insert_resource(DiceLedger::new(settings.dice_per_hand))
            .insert_resource(rng)
            .insert_resource(GameController::new(supported))
            .insert_resource(settings)
            .init_resource::<PlaneRegistry>()
            .init_resource::<ReticleState>()
            .init_resource::<FocusPoint>()
            .init_resource::<StatusBoard>()
            .init_resource::<GestureTracker>()
            .add_message::<ArAction>()
            .add_systems(Startup, (setup, start_session::<S>).chain())
            .add_systems(
                Update,
                (
                    advance_session::<S>,
                    handle_window_focus::<S>,
                    (
                        handle_gestures,
                        handle_control_buttons,
                        handle_keyboard_shortcuts,
                    ),
                    pump_tracking_events::<S>,
                    (
                        apply_session_actions::<S>,
                        apply_throw_actions::<S>,
                        apply_tap_actions,
                        apply_style_actions,
                    )
                        .chain(),
                    sync_camera_pose::<S>,
                    track_focus_point,
                    update_focus_reticle,
                    sweep_fallen_dice,
                    (refresh_status, update_button_colors),
                )
                    .chain(),
            );
    }
}
