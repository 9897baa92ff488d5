//! Type definitions for the AR poker dice game
//!
//! This module is organized into submodules:
//! - `game` - Game state machine, die styles and the status board
//! - `dice` - Die components, throw offsets and the dice ledger
//! - `planes` - Plane proxy components and the anchor registry
//! - `tracking` - Tracking session seam, anchors, quality and inbox
//! - `settings` - Tuning values and JSON persistence
//! - `ui` - UI components, focus point and player actions

pub mod dice;
pub mod game;
pub mod planes;
pub mod settings;
pub mod tracking;
pub mod ui;

// Re-export all public types for convenient access
pub use dice::*;
pub use game::*;
pub use planes::*;
pub use settings::*;
pub use tracking::*;
pub use ui::*;
