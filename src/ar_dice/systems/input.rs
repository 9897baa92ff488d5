//! Input handling systems
//!
//! Mouse drags, touches, button presses and keyboard shortcuts all end up
//! as [`ArAction`] messages. Nothing here touches game state directly.

use std::collections::HashMap;

use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::ar_dice::types::*;

/// Upward travel needed for a swipe, in logical pixels
pub const SWIPE_MIN_DISTANCE: f32 = 60.0;
/// Longest press that still counts as a swipe, in seconds
pub const SWIPE_MAX_DURATION: f32 = 0.6;
/// Largest drift that still counts as a tap, in logical pixels
pub const TAP_MAX_DRIFT: f32 = 12.0;

/// Something that can press the screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pointer {
    Mouse,
    Touch(u64),
}

/// Presses in progress, keyed by pointer
#[derive(Resource, Debug, Default)]
pub struct GestureTracker {
    presses: HashMap<Pointer, (Vec2, f32)>,
}

impl GestureTracker {
    pub fn begin(&mut self, pointer: Pointer, position: Vec2, now: f32) {
        self.presses.insert(pointer, (position, now));
    }

    /// Finish a press and classify it
    pub fn finish(&mut self, pointer: Pointer, position: Vec2, now: f32) -> Option<ArAction> {
        let (start, started_at) = self.presses.remove(&pointer)?;
        classify_gesture(start, position, now - started_at)
    }

    pub fn cancel(&mut self, pointer: Pointer) {
        self.presses.remove(&pointer);
    }

    pub fn is_pressing(&self, pointer: Pointer) -> bool {
        self.presses.contains_key(&pointer)
    }
}

/// Turn a press into a swipe, a tap, or nothing.
///
/// Screen y grows downward, so an upward swipe has a negative `dy`.
pub fn classify_gesture(start: Vec2, end: Vec2, duration: f32) -> Option<ArAction> {
    let delta = end - start;

    if delta.length() <= TAP_MAX_DRIFT {
        return Some(ArAction::Tap(start));
    }

    let upward = -delta.y;
    if upward >= SWIPE_MIN_DISTANCE && upward > delta.x.abs() && duration <= SWIPE_MAX_DURATION {
        return Some(ArAction::Swipe);
    }

    None
}

fn pointer_over_ui(buttons: &Query<&Interaction, With<Button>>) -> bool {
    buttons.iter().any(|i| *i != Interaction::None)
}

/// Track mouse drags and touches and emit swipe/tap actions
pub fn handle_gestures(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Query<&Interaction, With<Button>>,
    mut tracker: ResMut<GestureTracker>,
    mut actions: MessageWriter<ArAction>,
) {
    let now = time.elapsed_secs();
    let over_ui = pointer_over_ui(&buttons);
    let cursor = windows.single().ok().and_then(|w| w.cursor_position());

    if mouse.just_pressed(MouseButton::Left) {
        match cursor {
            Some(position) if !over_ui => tracker.begin(Pointer::Mouse, position, now),
            _ => tracker.cancel(Pointer::Mouse),
        }
    }
    if mouse.just_released(MouseButton::Left) {
        match cursor {
            Some(position) => {
                if let Some(action) = tracker.finish(Pointer::Mouse, position, now) {
                    actions.write(action);
                }
            }
            None => tracker.cancel(Pointer::Mouse),
        }
    }

    for touch in touches.iter_just_pressed() {
        if !over_ui {
            tracker.begin(Pointer::Touch(touch.id()), touch.position(), now);
        }
    }
    for touch in touches.iter_just_released() {
        if let Some(action) = tracker.finish(Pointer::Touch(touch.id()), touch.position(), now) {
            actions.write(action);
        }
    }
    for touch in touches.iter_just_canceled() {
        tracker.cancel(Pointer::Touch(touch.id()));
    }
}

/// Map on-screen button presses to actions
pub fn handle_control_buttons(
    buttons: Query<(&Interaction, &ControlButton), Changed<Interaction>>,
    mut actions: MessageWriter<ArAction>,
) {
    for (interaction, button) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            actions.write(button.action());
        }
    }
}

/// Keyboard shortcuts for desktop play
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    focus: Res<FocusPoint>,
    mut actions: MessageWriter<ArAction>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        actions.write(ArAction::Swipe);
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        actions.write(ArAction::CycleStyle);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        actions.write(ArAction::Reset);
    }
    if keyboard.just_pressed(KeyCode::Enter) {
        actions.write(ArAction::Start);
    }
    if keyboard.just_pressed(KeyCode::KeyT) {
        actions.write(ArAction::Tap(focus.0));
    }
}
