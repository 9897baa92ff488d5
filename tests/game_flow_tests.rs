//! Tests for start/reset handling and the tracking event pump

use bevy::ecs::message::Messages;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;

use pokerdice_ar::ar_dice::meshes::SurfaceAssets;
use pokerdice_ar::ar_dice::simulated_session::SimulatedSession;
use pokerdice_ar::ar_dice::systems::{apply_session_actions, pump_tracking_events};
use pokerdice_ar::ar_dice::types::*;

type Host = TrackingHost<SimulatedSession>;

fn table() -> SimulatedTableSetting {
    SimulatedTableSetting {
        size: [1.0, 0.6],
        height: 0.0,
        scan_seconds: 1.0,
        warmup_seconds: 0.2,
    }
}

fn game_world(supported: bool) -> World {
    let mut world = World::new();
    let inbox = TrackingInbox::default();
    let mut session = if supported {
        SimulatedSession::new(table(), inbox.clone())
    } else {
        SimulatedSession::unsupported(table(), inbox.clone())
    };
    session.configure(SessionConfig::default());

    let mut materials = Assets::<StandardMaterial>::default();
    let surface = SurfaceAssets::build(&mut materials);

    world.insert_resource(Host::new(session, inbox));
    world.insert_resource(Assets::<Mesh>::default());
    world.insert_resource(materials);
    world.insert_resource(surface);
    world.insert_resource(GameSettings::default());
    world.insert_resource(GameController::new(supported));
    world.insert_resource(PlaneRegistry::default());
    world.insert_resource(DiceLedger::default());
    world.insert_resource(ReticleState::default());
    world.insert_resource(StatusBoard::default());
    world.init_resource::<Messages<ArAction>>();
    world
}

fn scan(world: &mut World, seconds: f32) {
    let steps = (seconds / 0.05).round() as usize;
    for _ in 0..steps {
        world.resource_mut::<Host>().session.advance(0.05);
    }
}

fn send(world: &mut World, action: ArAction) {
    world.resource_mut::<Messages<ArAction>>().write(action);
}

fn pending_actions(world: &mut World) -> Vec<ArAction> {
    world
        .resource_mut::<Messages<ArAction>>()
        .drain()
        .collect()
}

fn pump(world: &mut World) {
    world
        .run_system_once(pump_tracking_events::<SimulatedSession>)
        .unwrap();
}

fn apply(world: &mut World) {
    world
        .run_system_once(apply_session_actions::<SimulatedSession>)
        .unwrap();
}

#[test]
fn test_scan_creates_one_proxy_and_requests_start() {
    let mut world = game_world(true);
    scan(&mut world, 1.5);
    pump(&mut world);

    let registry = world.resource::<PlaneRegistry>();
    assert_eq!(registry.len(), 1);
    let anchor = registry.anchors()[0];
    assert_eq!(anchor.extent, Vec2::new(1.0, 0.6));

    let proxies = world
        .query::<&PlaneProxy>()
        .iter(&world)
        .count();
    assert_eq!(proxies, 1);

    assert!(pending_actions(&mut world).contains(&ArAction::Start));
}

#[test]
fn test_start_suppresses_planes_and_stops_detection() {
    let mut world = game_world(true);
    scan(&mut world, 1.5);
    pump(&mut world);
    pending_actions(&mut world);

    send(&mut world, ArAction::Start);
    apply(&mut world);

    assert_eq!(
        world.resource::<GameController>().state(),
        GameState::PointToSurface
    );
    assert!(world.resource::<PlaneRegistry>().is_suppressed());
    assert!(!world.resource::<Host>().session.config().plane_detection);

    let hidden = world
        .query_filtered::<&Visibility, With<PlaneProxy>>()
        .iter(&world)
        .all(|v| *v == Visibility::Hidden);
    assert!(hidden);
    // Geometry stays for hit-testing
    assert_eq!(world.resource::<PlaneRegistry>().len(), 1);
}

#[test]
fn test_second_start_is_ignored() {
    let mut world = game_world(true);
    send(&mut world, ArAction::Start);
    apply(&mut world);
    world.resource_mut::<GameController>().apply_reticle(true);

    send(&mut world, ArAction::Start);
    apply(&mut world);
    assert_eq!(
        world.resource::<GameController>().state(),
        GameState::SwipeToPlay
    );
}

#[test]
fn test_reset_returns_everything_to_detection() {
    let mut world = game_world(true);
    scan(&mut world, 1.5);
    pump(&mut world);
    pending_actions(&mut world);
    send(&mut world, ArAction::Start);
    apply(&mut world);
    world.resource_mut::<GameController>().apply_reticle(true);
    world.resource_mut::<ReticleState>().hit = Some(Vec3::ZERO);

    let dice: Vec<Entity> = (0..3)
        .map(|_| world.spawn((Transform::default(), Collectible)).id())
        .collect();
    for die in &dice {
        world.resource_mut::<DiceLedger>().register(*die);
    }

    send(&mut world, ArAction::Reset);
    apply(&mut world);

    assert_eq!(
        world.resource::<GameController>().state(),
        GameState::DetectSurface
    );
    assert!(world.resource::<PlaneRegistry>().is_empty());
    assert!(!world.resource::<PlaneRegistry>().is_suppressed());
    assert_eq!(world.resource::<DiceLedger>().available(), 5);
    assert_eq!(world.resource::<ReticleState>().hit, None);
    for die in dice {
        assert!(world.get_entity(die).is_err());
    }
    assert_eq!(world.query::<&PlaneProxy>().iter(&world).count(), 0);

    let host = world.resource::<Host>();
    assert!(host.session.anchors().is_empty());
    assert!(host.session.config().plane_detection);
}

#[test]
fn test_interruption_end_triggers_reset() {
    let mut world = game_world(true);
    {
        let mut host = world.resource_mut::<Host>();
        host.session.pause();
        host.session.resume();
    }
    pump(&mut world);

    assert_eq!(
        world.resource::<StatusBoard>().tracking_status,
        "AR Session Interruption Ended"
    );
    assert!(pending_actions(&mut world).contains(&ArAction::Reset));
}

#[test]
fn test_interruption_and_failure_reported() {
    let mut world = game_world(true);
    world.resource_mut::<Host>().session.interrupt();
    pump(&mut world);
    assert_eq!(
        world.resource::<StatusBoard>().tracking_status,
        "AR Session Was Interrupted!"
    );

    world.resource_mut::<Host>().session.fail("camera unavailable");
    pump(&mut world);
    assert_eq!(
        world.resource::<StatusBoard>().tracking_status,
        "AR Session Failure: camera unavailable"
    );
    assert_eq!(
        world.resource::<GameController>().state(),
        GameState::DetectSurface
    );
}

#[test]
fn test_quality_messages_preempt_game_status() {
    let mut world = game_world(true);
    world
        .resource::<Host>()
        .inbox
        .push(TrackingEvent::QualityChanged(TrackingQuality::Limited(
            LimitedReason::InsufficientFeatures,
        )));
    pump(&mut world);

    let text = world
        .resource::<StatusBoard>()
        .text(world.resource::<GameController>().state());
    assert_eq!(text, "Tracking: Limited due to insufficient features!");

    world
        .resource::<Host>()
        .inbox
        .push(TrackingEvent::QualityChanged(TrackingQuality::Normal));
    pump(&mut world);
    let text = world
        .resource::<StatusBoard>()
        .text(world.resource::<GameController>().state());
    assert_eq!(text, "Scan entire table surface...");
}

#[test]
fn test_removed_anchor_tears_down_proxy() {
    let mut world = game_world(true);
    let anchor = PlaneAnchor::new(AnchorId(9), Vec3::ZERO, Vec2::ZERO, Vec2::new(0.5, 0.5));
    let inbox = world.resource::<Host>().inbox.clone();

    inbox.push(TrackingEvent::AnchorAdded(anchor));
    pump(&mut world);
    assert!(world.resource::<PlaneRegistry>().contains(AnchorId(9)));

    inbox.push(TrackingEvent::AnchorRemoved(AnchorId(9)));
    pump(&mut world);
    assert!(world.resource::<PlaneRegistry>().is_empty());
    assert_eq!(world.query::<&PlaneProxy>().iter(&world).count(), 0);
    assert_eq!(world.query::<&PlaneCollider>().iter(&world).count(), 0);
}

#[test]
fn test_anchor_update_replaces_collision_volume() {
    let mut world = game_world(true);
    let inbox = world.resource::<Host>().inbox.clone();

    inbox.push(TrackingEvent::AnchorAdded(PlaneAnchor::new(
        AnchorId(4),
        Vec3::ZERO,
        Vec2::ZERO,
        Vec2::new(0.5, 0.5),
    )));
    pump(&mut world);

    let grown = PlaneAnchor::new(
        AnchorId(4),
        Vec3::new(0.0, 0.1, 0.0),
        Vec2::new(0.2, -0.1),
        Vec2::new(1.0, 0.8),
    );
    inbox.push(TrackingEvent::AnchorUpdated(grown));
    pump(&mut world);

    let colliders: Vec<Vec3> = world
        .query_filtered::<&Collider, With<PlaneCollider>>()
        .iter(&world)
        .map(|c| c.as_cuboid().expect("plane collider is a cuboid").half_extents())
        .collect();
    assert_eq!(colliders.len(), 1);
    assert!((colliders[0] - Vec3::new(0.5, 0.005, 0.4)).length() < 1e-6);

    let roots: Vec<Vec3> = world
        .query_filtered::<&Transform, With<PlaneProxy>>()
        .iter(&world)
        .map(|t| t.translation)
        .collect();
    assert_eq!(roots, vec![grown.world_center()]);
    assert_eq!(grown.world_center(), Vec3::new(0.2, 0.1, -0.1));
    assert_eq!(
        world.resource::<PlaneRegistry>().anchor(AnchorId(4)),
        Some(&grown)
    );
}

#[test]
fn test_start_refused_without_tracking() {
    let mut world = game_world(false);
    send(&mut world, ArAction::Start);
    apply(&mut world);
    assert_eq!(
        world.resource::<GameController>().state(),
        GameState::DetectSurface
    );
}

#[test]
fn test_reset_drops_queued_tracking_events() {
    let mut world = game_world(true);
    let inbox = world.resource::<Host>().inbox.clone();
    inbox.push(TrackingEvent::AnchorAdded(PlaneAnchor::new(
        AnchorId(77),
        Vec3::ZERO,
        Vec2::ZERO,
        Vec2::ONE,
    )));

    send(&mut world, ArAction::Reset);
    apply(&mut world);
    pump(&mut world);

    assert!(!world.resource::<PlaneRegistry>().contains(AnchorId(77)));
}
