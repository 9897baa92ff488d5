//! Simulated device steering
//!
//! On desktop the "device" orbits the table under keyboard control. Only
//! meaningful with [`SimulatedSession`].

use bevy::prelude::*;

use crate::ar_dice::simulated_session::{SimulatedSession, SteerInput};
use crate::ar_dice::types::{TrackingHost, TrackingSession};

const TURN_SPEED: f32 = 1.0;
const FAST_TURN_SPEED: f32 = 6.0;
const DOLLY_SPEED: f32 = 0.5;

/// Orbit, tilt and dolly the simulated device
pub fn steer_simulated_device(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut host: ResMut<TrackingHost<SimulatedSession>>,
) {
    // Shift turns fast enough to upset tracking
    let speed = if keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight) {
        FAST_TURN_SPEED
    } else {
        TURN_SPEED
    };

    let mut input = SteerInput::default();
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        input.yaw -= speed;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        input.yaw += speed;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        input.pitch += speed;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        input.pitch -= speed;
    }
    if keyboard.pressed(KeyCode::KeyQ) {
        input.dolly -= DOLLY_SPEED;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        input.dolly += DOLLY_SPEED;
    }

    host.session.steer(input, time.delta_secs());

    if keyboard.just_pressed(KeyCode::KeyI) {
        if host.session.is_interrupted() {
            host.session.resume();
        } else {
            host.session.interrupt();
        }
    }
    if keyboard.just_pressed(KeyCode::KeyG) {
        host.session.request_coaching_reset();
    }
}
