//! Plane proxy bookkeeping
//!
//! One proxy entity per tracked anchor. The registry only records which
//! entities belong to which anchor; spawning and resizing happen in
//! `systems::planes`.

use std::collections::HashMap;

use bevy::prelude::*;

use super::tracking::{AnchorId, PlaneAnchor};

/// Root entity of a plane proxy (render mesh)
#[derive(Component, Debug)]
pub struct PlaneProxy {
    pub anchor: AnchorId,
}

/// Child entity carrying the proxy's collision volume
#[derive(Component, Debug)]
pub struct PlaneCollider;

/// Entities owned by one anchor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProxyEntities {
    pub root: Entity,
    pub collider: Entity,
}

#[derive(Clone, Copy, Debug)]
struct PlaneEntry {
    anchor: PlaneAnchor,
    proxy: ProxyEntities,
}

/// Anchors known to the game and their proxies
#[derive(Resource, Debug, Default)]
pub struct PlaneRegistry {
    entries: HashMap<AnchorId, PlaneEntry>,
    suppressed: bool,
}

impl PlaneRegistry {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: AnchorId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn anchor(&self, id: AnchorId) -> Option<&PlaneAnchor> {
        self.entries.get(&id).map(|e| &e.anchor)
    }

    /// Known anchors, ordered by id so raycasts are deterministic
    pub fn anchors(&self) -> Vec<PlaneAnchor> {
        let mut anchors: Vec<PlaneAnchor> = self.entries.values().map(|e| e.anchor).collect();
        anchors.sort_by_key(|a| a.id);
        anchors
    }

    /// Record a new proxy. Returns the proxy it replaced, if any.
    pub fn insert(&mut self, anchor: PlaneAnchor, proxy: ProxyEntities) -> Option<ProxyEntities> {
        self.entries
            .insert(anchor.id, PlaneEntry { anchor, proxy })
            .map(|old| old.proxy)
    }

    /// Store new anchor geometry. Returns the proxy to resize, or `None`
    /// when the anchor is unknown.
    pub fn update(&mut self, anchor: PlaneAnchor) -> Option<ProxyEntities> {
        let entry = self.entries.get_mut(&anchor.id)?;
        entry.anchor = anchor;
        Some(entry.proxy)
    }

    pub fn remove(&mut self, id: AnchorId) -> Option<ProxyEntities> {
        self.entries.remove(&id).map(|e| e.proxy)
    }

    /// Forget every anchor, yielding the proxies to despawn
    pub fn clear(&mut self) -> Vec<ProxyEntities> {
        self.entries.drain().map(|(_, e)| e.proxy).collect()
    }

    /// Whether proxies are currently hidden from view
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    pub fn visibility(&self) -> Visibility {
        if self.suppressed {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        }
    }
}
