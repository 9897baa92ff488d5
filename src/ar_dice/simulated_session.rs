//! Desktop tracking session
//!
//! Stands in for a real world-tracking host when running on a desktop. A
//! single table plane is "detected" progressively while plane detection is
//! enabled, the device pose orbits the table under keyboard control, and
//! quality changes, interruptions and coaching are reported through the
//! same inbox a real host would use.

use bevy::prelude::*;

use crate::ar_dice::types::*;

/// Fraction of the scan after which the table is first reported
const FIRST_DETECTION: f32 = 0.15;
/// Smallest extent change worth an update event, in meters
const UPDATE_STEP: f32 = 0.01;
/// Turn rate above which tracking reports excessive motion, in rad/s
const MOTION_LIMIT: f32 = 4.0;

/// Orbit parameters of the simulated device
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceRig {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl DeviceRig {
    pub const MIN_PITCH: f32 = 0.15;
    pub const MAX_PITCH: f32 = 1.35;
    pub const MIN_DISTANCE: f32 = 0.3;
    pub const MAX_DISTANCE: f32 = 2.0;

    pub fn looking_at(focus: Vec3) -> Self {
        Self {
            focus,
            yaw: 0.0,
            pitch: 0.6,
            distance: 0.7,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.focus
            + self.distance
                * Vec3::new(
                    self.pitch.cos() * self.yaw.sin(),
                    self.pitch.sin(),
                    self.pitch.cos() * self.yaw.cos(),
                )
    }

    /// Camera-to-world transform
    pub fn pose(&self) -> Mat4 {
        let transform = Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y);
        Mat4::from_rotation_translation(transform.rotation, transform.translation)
    }
}

/// Per-frame steering input
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SteerInput {
    pub yaw: f32,
    pub pitch: f32,
    pub dolly: f32,
}

impl SteerInput {
    pub fn is_idle(&self) -> bool {
        self.yaw == 0.0 && self.pitch == 0.0 && self.dolly == 0.0
    }
}

/// Simulated world-tracking session
pub struct SimulatedSession {
    inbox: TrackingInbox,
    table: SimulatedTableSetting,
    supported: bool,
    running: bool,
    interrupted: bool,
    config: SessionConfig,
    quality: TrackingQuality,
    rig: DeviceRig,
    warmup_left: f32,
    scan_progress: f32,
    anchor: Option<PlaneAnchor>,
    next_anchor_id: u64,
    coaching_done: bool,
}

impl SimulatedSession {
    pub fn new(table: SimulatedTableSetting, inbox: TrackingInbox) -> Self {
        Self {
            inbox,
            table,
            supported: true,
            running: false,
            interrupted: false,
            config: SessionConfig::default(),
            quality: TrackingQuality::Limited(LimitedReason::Initializing),
            rig: DeviceRig::looking_at(Vec3::new(0.0, table.height, 0.0)),
            warmup_left: table.warmup_seconds,
            scan_progress: 0.0,
            anchor: None,
            next_anchor_id: 1,
            coaching_done: false,
        }
    }

    /// A device without world tracking
    pub fn unsupported(table: SimulatedTableSetting, inbox: TrackingInbox) -> Self {
        Self {
            supported: false,
            quality: TrackingQuality::NotAvailable,
            ..Self::new(table, inbox)
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Move the device. Fast turns degrade tracking until the device settles.
    pub fn steer(&mut self, input: SteerInput, dt: f32) {
        if !self.running {
            return;
        }

        self.rig.yaw += input.yaw * dt;
        self.rig.pitch =
            (self.rig.pitch + input.pitch * dt).clamp(DeviceRig::MIN_PITCH, DeviceRig::MAX_PITCH);
        self.rig.distance = (self.rig.distance + input.dolly * dt)
            .clamp(DeviceRig::MIN_DISTANCE, DeviceRig::MAX_DISTANCE);

        if self.warmup_left > 0.0 {
            return;
        }
        let turn_rate = Vec2::new(input.yaw, input.pitch).length();
        if turn_rate > MOTION_LIMIT {
            self.set_quality(TrackingQuality::Limited(LimitedReason::ExcessiveMotion));
        } else if self.quality == TrackingQuality::Limited(LimitedReason::ExcessiveMotion) {
            self.set_quality(TrackingQuality::Normal);
        }
    }

    /// Simulate the app losing the camera (e.g. sent to background)
    pub fn interrupt(&mut self) {
        if self.running && !self.interrupted {
            self.interrupted = true;
            self.running = false;
            self.inbox.push(TrackingEvent::Interrupted);
        }
    }

    /// Simulate a session failure
    pub fn fail(&mut self, reason: &str) {
        self.running = false;
        self.inbox.push(TrackingEvent::Failed(reason.to_string()));
    }

    /// Ask the game for a fresh session, as detection guidance would
    pub fn request_coaching_reset(&self) {
        self.inbox.push(TrackingEvent::CoachingResetRequested);
    }

    fn set_quality(&mut self, quality: TrackingQuality) {
        if self.quality != quality {
            self.quality = quality;
            self.inbox.push(TrackingEvent::QualityChanged(quality));
        }
    }

    fn table_anchor(&self, id: AnchorId) -> PlaneAnchor {
        let size = Vec2::new(self.table.size[0], self.table.size[1]) * self.scan_progress;
        PlaneAnchor::new(
            id,
            Vec3::new(0.0, self.table.height, 0.0),
            Vec2::ZERO,
            size,
        )
    }

    fn scan(&mut self, dt: f32) {
        if self.scan_progress >= 1.0 {
            return;
        }
        let step = if self.table.scan_seconds > 0.0 {
            dt / self.table.scan_seconds
        } else {
            1.0
        };
        self.scan_progress = (self.scan_progress + step).min(1.0);

        if self.scan_progress < FIRST_DETECTION {
            return;
        }

        match self.anchor {
            None => {
                let id = AnchorId(self.next_anchor_id);
                self.next_anchor_id += 1;
                let anchor = self.table_anchor(id);
                self.anchor = Some(anchor);
                self.inbox.push(TrackingEvent::AnchorAdded(anchor));
            }
            Some(current) => {
                let grown = self.table_anchor(current.id);
                let done = self.scan_progress >= 1.0;
                if done || (grown.extent - current.extent).max_element() >= UPDATE_STEP {
                    self.anchor = Some(grown);
                    self.inbox.push(TrackingEvent::AnchorUpdated(grown));
                }
            }
        }

        if self.scan_progress >= 1.0 && !self.coaching_done {
            self.coaching_done = true;
            self.inbox.push(TrackingEvent::CoachingFinished);
        }
    }
}

impl TrackingSession for SimulatedSession {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn current_pose(&self) -> Option<Mat4> {
        (self.supported && self.running).then(|| self.rig.pose())
    }

    fn anchors(&self) -> Vec<PlaneAnchor> {
        self.anchor.into_iter().collect()
    }

    fn tracking_quality(&self) -> TrackingQuality {
        self.quality
    }

    fn configure(&mut self, config: SessionConfig) {
        if !self.supported {
            return;
        }
        self.config = config;
        self.running = true;
    }

    fn reset(&mut self, config: SessionConfig, options: ResetOptions) {
        if !self.supported {
            return;
        }
        self.config = config;
        self.running = true;
        self.interrupted = false;
        if options.remove_existing_anchors {
            self.anchor = None;
            self.scan_progress = 0.0;
            self.coaching_done = false;
        }
        if options.reset_tracking {
            self.warmup_left = self.table.warmup_seconds;
            self.set_quality(TrackingQuality::Limited(LimitedReason::Initializing));
        }
    }

    fn pause(&mut self) {
        self.interrupt();
    }

    fn resume(&mut self) {
        if self.interrupted {
            self.interrupted = false;
            self.running = true;
            self.inbox.push(TrackingEvent::InterruptionEnded);
        }
    }

    fn advance(&mut self, dt: f32) {
        if !self.running {
            return;
        }

        if self.warmup_left > 0.0 {
            self.warmup_left -= dt;
            if self.warmup_left > 0.0 {
                return;
            }
            self.warmup_left = 0.0;
            self.set_quality(TrackingQuality::Normal);
        }

        if self.config.plane_detection {
            self.scan(dt);
        }
    }
}
