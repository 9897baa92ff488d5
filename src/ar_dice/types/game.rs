//! Game state machine
//!
//! `GameController` is the single owner of the game mode and the selected
//! die style. Everything that wants to change either goes through its
//! transition functions.

use bevy::prelude::*;

/// Game mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Planes are being detected; the user is scanning the table
    #[default]
    DetectSurface,
    /// Detection is over but the reticle is not on a surface
    PointToSurface,
    /// The reticle rests on a surface and dice can be thrown
    SwipeToPlay,
}

impl GameState {
    pub fn status_message(&self) -> &'static str {
        match self {
            GameState::DetectSurface => "Scan entire table surface...",
            GameState::PointToSurface => "Point at designated surface first!",
            GameState::SwipeToPlay => "Swipe UP to throw!\nTap die to collect.",
        }
    }
}

/// Number of die variants
pub const DICE_STYLE_COUNT: u8 = 5;

/// Selected die variant, always in `0..DICE_STYLE_COUNT`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct DiceStyle(u8);

impl DiceStyle {
    pub fn new(index: u8) -> Self {
        Self(index % DICE_STYLE_COUNT)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn next(self) -> Self {
        Self((self.0 + 1) % DICE_STYLE_COUNT)
    }

    pub fn name(&self) -> &'static str {
        match self.0 {
            0 => "Ivory",
            1 => "Ruby",
            2 => "Jade",
            3 => "Onyx",
            _ => "Gold",
        }
    }

    pub fn color(&self) -> Color {
        match self.0 {
            0 => Color::srgb(0.95, 0.93, 0.86),
            1 => Color::srgba(0.8, 0.1, 0.15, 0.92),
            2 => Color::srgba(0.1, 0.65, 0.35, 0.92),
            3 => Color::srgb(0.08, 0.08, 0.1),
            _ => Color::srgb(0.95, 0.78, 0.2),
        }
    }

    /// Ink for the face ranks, chosen to read against the body color
    pub fn label_color(&self) -> Color {
        match self.0 {
            0 | 4 => Color::srgb(0.1, 0.08, 0.08),
            3 => Color::srgb(0.85, 0.7, 0.25),
            _ => Color::srgb(0.97, 0.97, 0.95),
        }
    }

    pub fn is_translucent(&self) -> bool {
        matches!(self.0, 1 | 2)
    }

    /// Edge length in meters
    pub fn size(&self) -> f32 {
        match self.0 {
            0 | 3 => 0.025,
            1 | 2 => 0.022,
            _ => 0.028,
        }
    }

    pub fn restitution(&self) -> f32 {
        if self.is_translucent() {
            0.45 // Resin bounces a bit more
        } else {
            0.3
        }
    }
}

/// Outcome of feeding one reticle result into the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReticleOutcome {
    Ignored,
    Unchanged,
    Changed(GameState),
}

/// Authoritative controller for mode and style
#[derive(Resource, Debug)]
pub struct GameController {
    state: GameState,
    style: DiceStyle,
    tracking_supported: bool,
}

impl GameController {
    pub fn new(tracking_supported: bool) -> Self {
        Self {
            state: GameState::DetectSurface,
            style: DiceStyle::default(),
            tracking_supported,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn style(&self) -> DiceStyle {
        self.style
    }

    pub fn tracking_supported(&self) -> bool {
        self.tracking_supported
    }

    /// Leave detection. Returns `false` (and changes nothing) unless the
    /// game is in `DetectSurface`.
    pub fn start(&mut self) -> bool {
        if !self.tracking_supported || self.state != GameState::DetectSurface {
            return false;
        }
        self.state = GameState::PointToSurface;
        true
    }

    /// Back to detection from anywhere
    pub fn reset(&mut self) {
        self.state = GameState::DetectSurface;
    }

    /// Continuous reticle re-evaluation: a hit means `SwipeToPlay`, a miss
    /// means `PointToSurface`. Detection is never left this way.
    pub fn apply_reticle(&mut self, hit: bool) -> ReticleOutcome {
        if self.state == GameState::DetectSurface {
            return ReticleOutcome::Ignored;
        }
        let next = if hit {
            GameState::SwipeToPlay
        } else {
            GameState::PointToSurface
        };
        if next == self.state {
            ReticleOutcome::Unchanged
        } else {
            self.state = next;
            ReticleOutcome::Changed(next)
        }
    }

    pub fn accepts_swipe(&self) -> bool {
        self.state == GameState::SwipeToPlay
    }

    pub fn cycle_style(&mut self) -> DiceStyle {
        self.style = self.style.next();
        self.style
    }
}

/// Status line shown to the player
#[derive(Resource, Debug, Default)]
pub struct StatusBoard {
    /// Tracking-related message; preempts the game message when non-empty
    pub tracking_status: String,
}

impl StatusBoard {
    pub fn text(&self, state: GameState) -> String {
        if self.tracking_status.is_empty() {
            state.status_message().to_string()
        } else {
            self.tracking_status.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_detect_surface() {
        let controller = GameController::new(true);
        assert_eq!(controller.state(), GameState::DetectSurface);
        assert_eq!(controller.style(), DiceStyle::new(0));
    }

    #[test]
    fn test_reticle_never_leaves_detection() {
        let mut controller = GameController::new(true);
        assert_eq!(controller.apply_reticle(true), ReticleOutcome::Ignored);
        assert_eq!(controller.state(), GameState::DetectSurface);
    }

    #[test]
    fn test_start_only_from_detection() {
        let mut controller = GameController::new(true);
        assert!(controller.start());
        assert_eq!(controller.state(), GameState::PointToSurface);
        assert!(!controller.start());
        controller.apply_reticle(true);
        assert!(!controller.start());
        assert_eq!(controller.state(), GameState::SwipeToPlay);
    }

    #[test]
    fn test_start_refused_without_tracking() {
        let mut controller = GameController::new(false);
        assert!(!controller.start());
        assert_eq!(controller.state(), GameState::DetectSurface);
    }

    #[test]
    fn test_reticle_toggles_play_states() {
        let mut controller = GameController::new(true);
        controller.start();
        assert_eq!(
            controller.apply_reticle(true),
            ReticleOutcome::Changed(GameState::SwipeToPlay)
        );
        assert_eq!(controller.apply_reticle(true), ReticleOutcome::Unchanged);
        assert!(controller.accepts_swipe());
        assert_eq!(
            controller.apply_reticle(false),
            ReticleOutcome::Changed(GameState::PointToSurface)
        );
        assert!(!controller.accepts_swipe());
    }

    #[test]
    fn test_style_wraps_after_five() {
        let mut controller = GameController::new(true);
        let original = controller.style();
        let seen: Vec<usize> = (0..5).map(|_| controller.cycle_style().index()).collect();
        assert_eq!(seen, vec![1, 2, 3, 4, 0]);
        assert_eq!(controller.style(), original);
    }

    #[test]
    fn test_style_new_wraps_out_of_range() {
        assert_eq!(DiceStyle::new(7).index(), 2);
    }

    #[test]
    fn test_tracking_status_preempts_game_status() {
        let mut board = StatusBoard::default();
        assert_eq!(
            board.text(GameState::PointToSurface),
            "Point at designated surface first!"
        );
        board.tracking_status = "Tracking: Initializing...".into();
        assert_eq!(
            board.text(GameState::SwipeToPlay),
            "Tracking: Initializing..."
        );
    }
}
