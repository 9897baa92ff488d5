//! Poker Dice AR
//!
//! Table-top poker dice: scan a surface, aim the focus reticle, swipe to
//! throw five dice and tap them to collect. The game core lives in
//! [`ar_dice`]; the binary in `main.rs` wires it to a window.

pub mod ar_dice;
