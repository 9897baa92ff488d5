//! UI and scene marker types
//!
//! Player-facing components (status text, buttons, reticle), the focus
//! point, and the action message every input path funnels into.

use bevy::prelude::*;

/// Marker for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for the status line text
#[derive(Component)]
pub struct StatusText;

/// Marker for the style label under the buttons
#[derive(Component)]
pub struct StyleText;

/// Marker for the focus reticle entity
#[derive(Component)]
pub struct FocusReticle;

/// The three on-screen buttons
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlButton {
    Style,
    Reset,
    Start,
}

impl ControlButton {
    pub fn label(&self) -> &'static str {
        match self {
            ControlButton::Style => "Style",
            ControlButton::Reset => "Reset",
            ControlButton::Start => "Start",
        }
    }

    pub fn action(&self) -> ArAction {
        match self {
            ControlButton::Style => ArAction::CycleStyle,
            ControlButton::Reset => ArAction::Reset,
            ControlButton::Start => ArAction::Start,
        }
    }
}

/// Player intent, queued for the single action-processing system
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum ArAction {
    Start,
    Reset,
    CycleStyle,
    Swipe,
    /// Tap at a screen position in logical pixels
    Tap(Vec2),
}

/// Screen point the reticle raycast starts from, in logical pixels
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct FocusPoint(pub Vec2);

impl Default for FocusPoint {
    fn default() -> Self {
        Self(Vec2::ZERO)
    }
}

impl FocusPoint {
    /// Viewport center shifted down by `bias` of half the height
    pub fn for_viewport(size: Vec2, bias: f32) -> Self {
        let center = size * 0.5;
        Self(Vec2::new(center.x, center.y + center.y * bias))
    }
}

/// Where the reticle currently rests, if anywhere
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct ReticleState {
    pub hit: Option<Vec3>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_point_biased_below_center() {
        let focus = FocusPoint::for_viewport(Vec2::new(400.0, 800.0), 0.25);
        assert_eq!(focus.0, Vec2::new(200.0, 500.0));
    }

    #[test]
    fn test_focus_point_follows_orientation() {
        let portrait = FocusPoint::for_viewport(Vec2::new(720.0, 1280.0), 0.25);
        let landscape = FocusPoint::for_viewport(Vec2::new(1280.0, 720.0), 0.25);
        assert_eq!(portrait.0, Vec2::new(360.0, 800.0));
        assert_eq!(landscape.0, Vec2::new(640.0, 450.0));
    }

    #[test]
    fn test_buttons_map_to_actions() {
        assert_eq!(ControlButton::Style.action(), ArAction::CycleStyle);
        assert_eq!(ControlButton::Reset.action(), ArAction::Reset);
        assert_eq!(ControlButton::Start.action(), ArAction::Start);
    }
}
