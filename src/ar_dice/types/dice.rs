//! Dice-related types and components
//!
//! This module contains the die component, the collectible tag, the preset
//! throw offsets and the ledger that tracks how many dice are in hand.

use std::collections::HashSet;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::game::DiceStyle;

/// Dice in a full hand
pub const DICE_PER_HAND: usize = 5;

/// Spawn offsets from the camera, one per die, in world axes
pub const DICE_OFFSETS: [Vec3; DICE_PER_HAND] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(-0.05, 0.0, 0.0),
    Vec3::new(0.05, 0.0, 0.0),
    Vec3::new(-0.05, 0.05, 0.02),
    Vec3::new(0.05, 0.05, 0.02),
];

/// Component attached to each thrown die
#[derive(Component, Debug)]
pub struct PokerDie {
    pub style: DiceStyle,
    /// Radius used for tap picking
    pub pick_radius: f32,
}

/// The six faces of a poker die, lowest first
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PokerFace {
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl PokerFace {
    pub const ALL: [PokerFace; 6] = [
        PokerFace::Nine,
        PokerFace::Ten,
        PokerFace::Jack,
        PokerFace::Queen,
        PokerFace::King,
        PokerFace::Ace,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PokerFace::Nine => "9",
            PokerFace::Ten => "10",
            PokerFace::Jack => "J",
            PokerFace::Queen => "Q",
            PokerFace::King => "K",
            PokerFace::Ace => "A",
        }
    }
}

/// Rank marking on one face of a die; child of the die entity
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceLabel(pub PokerFace);

/// Marker for entities a tap or the floor sweep may remove
#[derive(Component, Debug, Default)]
pub struct Collectible;

/// Why a die left the table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DieRemoval {
    Collected,
    Lost,
}

/// Dice in hand versus dice on the table.
///
/// The in-hand count is derived from the set of live dice, so
/// `available() + live() == capacity()` always holds.
#[derive(Resource, Debug)]
pub struct DiceLedger {
    capacity: usize,
    live: HashSet<Entity>,
}

impl Default for DiceLedger {
    fn default() -> Self {
        Self::new(DICE_PER_HAND)
    }
}

impl DiceLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            live: HashSet::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Dice still in hand
    pub fn available(&self) -> usize {
        self.capacity - self.live.len()
    }

    /// Dice currently on the table
    pub fn live(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, entity: Entity) -> bool {
        self.live.contains(&entity)
    }

    /// Record a thrown die. Fails when the hand is empty or the entity is
    /// already on the table.
    pub fn register(&mut self, entity: Entity) -> bool {
        if self.available() == 0 {
            return false;
        }
        self.live.insert(entity)
    }

    /// Return a die to the hand. Only the first release of an entity
    /// counts; later ones report `false`.
    pub fn release(&mut self, entity: Entity) -> bool {
        self.live.remove(&entity)
    }

    /// Return every die to the hand, yielding the entities that were live
    pub fn release_all(&mut self) -> Vec<Entity> {
        self.live.drain().collect()
    }
}

/// Random source for spawn orientations
#[derive(Resource)]
pub struct DiceRng(pub StdRng);

impl DiceRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}
