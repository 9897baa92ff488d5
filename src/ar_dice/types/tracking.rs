//! World-tracking types
//!
//! The tracking subsystem is an external collaborator. This module defines
//! the seam the game talks to (`TrackingSession`), the data it hands over
//! (poses, plane anchors, tracking quality) and the inbox that carries its
//! asynchronous callbacks onto the main schedule.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::prelude::*;

/// Identity of a tracked plane, stable for the anchor's lifetime
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// A detected horizontal surface.
///
/// `center` is relative to `origin` in the XZ plane; `extent` is
/// `(width along X, depth along Z)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneAnchor {
    pub id: AnchorId,
    pub origin: Vec3,
    pub center: Vec2,
    pub extent: Vec2,
}

impl PlaneAnchor {
    pub fn new(id: AnchorId, origin: Vec3, center: Vec2, extent: Vec2) -> Self {
        Self {
            id,
            origin,
            center,
            extent,
        }
    }

    /// Center of the detected rectangle in world space
    pub fn world_center(&self) -> Vec3 {
        self.origin + Vec3::new(self.center.x, 0.0, self.center.y)
    }

    /// Height of the surface
    pub fn surface_y(&self) -> f32 {
        self.origin.y
    }

    /// Whether a world point (projected on XZ) lies within the detected extent
    pub fn contains_xz(&self, point: Vec3) -> bool {
        let c = self.world_center();
        let half = self.extent * 0.5;
        (point.x - c.x).abs() <= half.x && (point.z - c.z).abs() <= half.y
    }
}

/// Why tracking is limited
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LimitedReason {
    ExcessiveMotion,
    InsufficientFeatures,
    Initializing,
    Relocalizing,
    Unknown,
}

/// Camera tracking quality as reported by the session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrackingQuality {
    #[default]
    Normal,
    Limited(LimitedReason),
    NotAvailable,
}

impl TrackingQuality {
    /// Status line for this quality; empty while tracking is normal
    pub fn status_message(&self) -> &'static str {
        match self {
            TrackingQuality::Normal => "",
            TrackingQuality::NotAvailable => "Tracking: Not available!",
            TrackingQuality::Limited(reason) => match reason {
                LimitedReason::ExcessiveMotion => "Tracking: Limited due to excessive motion!",
                LimitedReason::InsufficientFeatures => {
                    "Tracking: Limited due to insufficient features!"
                }
                LimitedReason::Initializing => "Tracking: Initializing...",
                LimitedReason::Relocalizing => "Tracking: Relocalizing...",
                LimitedReason::Unknown => "Tracking: Unknown...",
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        !matches!(self, TrackingQuality::Normal)
    }
}

/// The only session options the game cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub plane_detection: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            plane_detection: true,
        }
    }
}

/// Options for restarting a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ResetOptions {
    pub reset_tracking: bool,
    pub remove_existing_anchors: bool,
}

impl ResetOptions {
    /// Start over from nothing
    pub fn fresh() -> Self {
        Self {
            reset_tracking: true,
            remove_existing_anchors: true,
        }
    }
}

/// Something the tracking subsystem reports
#[derive(Clone, Debug, PartialEq)]
pub enum TrackingEvent {
    AnchorAdded(PlaneAnchor),
    AnchorUpdated(PlaneAnchor),
    AnchorRemoved(AnchorId),
    QualityChanged(TrackingQuality),
    Failed(String),
    Interrupted,
    InterruptionEnded,
    /// Detection guidance considers the surface good enough
    CoachingFinished,
    /// Detection guidance asks for a fresh session
    CoachingResetRequested,
}

/// Failures surfaced by the tracking collaborator
#[derive(Clone, Debug, PartialEq)]
pub enum TrackingFault {
    Unsupported,
    Degraded(TrackingQuality),
    SessionFailure(String),
    Interrupted,
}

impl fmt::Display for TrackingFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingFault::Unsupported => write!(f, "AR World Tracking Not Supported"),
            TrackingFault::Degraded(quality) => write!(f, "{}", quality.status_message()),
            TrackingFault::SessionFailure(err) => write!(f, "AR Session Failure: {}", err),
            TrackingFault::Interrupted => write!(f, "AR Session Was Interrupted!"),
        }
    }
}

impl std::error::Error for TrackingFault {}

/// World-tracking collaborator.
///
/// Implementations may produce events on any thread; they must deliver
/// them through a [`TrackingInbox`] so that the game only sees them from
/// the main schedule.
pub trait TrackingSession: Send + Sync + 'static {
    fn is_supported(&self) -> bool;

    /// Latest camera-to-world transform, `None` before the first frame
    fn current_pose(&self) -> Option<Mat4>;

    /// Snapshot of the anchors the session currently tracks. The game
    /// follows anchors through [`TrackingEvent`]s; hosts and tooling use
    /// this to inspect session state directly.
    fn anchors(&self) -> Vec<PlaneAnchor>;

    fn tracking_quality(&self) -> TrackingQuality;

    /// Apply a configuration without discarding anything
    fn configure(&mut self, config: SessionConfig);

    /// Restart with a configuration
    fn reset(&mut self, config: SessionConfig, options: ResetOptions);

    fn pause(&mut self);

    /// Continue after `pause`
    fn resume(&mut self);

    /// Give the session a slice of frame time. Hosts that run on their own
    /// clock can ignore it.
    fn advance(&mut self, _dt: f32) {}
}

/// Thread-safe queue of tracking callbacks awaiting the main schedule
#[derive(Clone, Default)]
pub struct TrackingInbox {
    queue: Arc<Mutex<VecDeque<TrackingEvent>>>,
}

impl TrackingInbox {
    /// A producer that panicked mid-push leaves the queue itself intact
    fn queue(&self) -> MutexGuard<'_, VecDeque<TrackingEvent>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, event: TrackingEvent) {
        self.queue().push_back(event);
    }

    /// Take every pending event in arrival order
    pub fn drain(&self) -> Vec<TrackingEvent> {
        self.queue().drain(..).collect()
    }

    /// Drop pending events; returns how many were discarded
    pub fn clear(&self) -> usize {
        let mut queue = self.queue();
        let n = queue.len();
        queue.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resource owning the active tracking session and its inbox
#[derive(Resource)]
pub struct TrackingHost<S: TrackingSession> {
    pub session: S,
    pub inbox: TrackingInbox,
}

impl<S: TrackingSession> TrackingHost<S> {
    pub fn new(session: S, inbox: TrackingInbox) -> Self {
        Self { session, inbox }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_contains_only_its_extent() {
        let anchor = PlaneAnchor::new(
            AnchorId(1),
            Vec3::new(1.0, 0.5, 0.0),
            Vec2::new(0.5, 0.0),
            Vec2::new(1.0, 2.0),
        );
        assert_eq!(anchor.world_center(), Vec3::new(1.5, 0.5, 0.0));
        assert!(anchor.contains_xz(Vec3::new(1.5, 0.5, 0.0)));
        assert!(anchor.contains_xz(Vec3::new(2.0, 0.5, 1.0)));
        assert!(!anchor.contains_xz(Vec3::new(2.1, 0.5, 0.0)));
        assert!(!anchor.contains_xz(Vec3::new(1.5, 0.5, -1.01)));
    }

    #[test]
    fn test_zero_extent_anchor_contains_only_center() {
        let anchor = PlaneAnchor::new(AnchorId(2), Vec3::ZERO, Vec2::ZERO, Vec2::ZERO);
        assert!(anchor.contains_xz(Vec3::ZERO));
        assert!(!anchor.contains_xz(Vec3::new(0.001, 0.0, 0.0)));
    }

    #[test]
    fn test_quality_messages() {
        assert_eq!(TrackingQuality::Normal.status_message(), "");
        assert!(!TrackingQuality::Normal.is_degraded());
        assert_eq!(
            TrackingQuality::NotAvailable.status_message(),
            "Tracking: Not available!"
        );
        assert_eq!(
            TrackingQuality::Limited(LimitedReason::Relocalizing).status_message(),
            "Tracking: Relocalizing..."
        );
        assert!(TrackingQuality::Limited(LimitedReason::Initializing).is_degraded());
    }

    #[test]
    fn test_fault_display() {
        assert_eq!(
            TrackingFault::SessionFailure("camera lost".into()).to_string(),
            "AR Session Failure: camera lost"
        );
        assert_eq!(
            TrackingFault::Unsupported.to_string(),
            "AR World Tracking Not Supported"
        );
    }

    #[test]
    fn test_inbox_drains_in_order_across_clones() {
        let inbox = TrackingInbox::default();
        let producer = inbox.clone();
        let handle = std::thread::spawn(move || {
            producer.push(TrackingEvent::Interrupted);
            producer.push(TrackingEvent::InterruptionEnded);
        });
        handle.join().unwrap();

        assert_eq!(inbox.len(), 2);
        assert_eq!(
            inbox.drain(),
            vec![TrackingEvent::Interrupted, TrackingEvent::InterruptionEnded]
        );
        assert!(inbox.is_empty());
    }

    #[test]
    fn test_inbox_clear_reports_dropped() {
        let inbox = TrackingInbox::default();
        inbox.push(TrackingEvent::AnchorRemoved(AnchorId(3)));
        assert_eq!(inbox.clear(), 1);
        assert!(inbox.drain().is_empty());
    }

    #[test]
    fn test_inbox_survives_panicking_producer() {
        let inbox = TrackingInbox::default();
        inbox.push(TrackingEvent::Interrupted);

        let producer = inbox.clone();
        let result = std::thread::spawn(move || {
            let _guard = producer.queue.lock().unwrap();
            panic!("producer died holding the queue");
        })
        .join();
        assert!(result.is_err());
        assert!(inbox.queue.is_poisoned());

        inbox.push(TrackingEvent::InterruptionEnded);
        assert_eq!(inbox.len(), 2);
        assert_eq!(
            inbox.drain(),
            vec![TrackingEvent::Interrupted, TrackingEvent::InterruptionEnded]
        );
        inbox.push(TrackingEvent::CoachingFinished);
        assert_eq!(inbox.clear(), 1);
        assert!(inbox.is_empty());
    }
}
