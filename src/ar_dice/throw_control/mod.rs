//! Throw Control Module
//!
//! This module turns a swipe into flying dice. The camera pose decides where
//! each die appears, the distance to the focus reticle decides how hard it
//! is launched.

mod state;
mod systems;

pub use state::*;
pub use systems::*;
