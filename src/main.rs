use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::Parser;
use colored::Colorize;

use pokerdice_ar::ar_dice::simulated_session::SimulatedSession;
use pokerdice_ar::ar_dice::systems::{advance_session, steer_simulated_device};
use pokerdice_ar::ar_dice::types::{
    GameSettings, TrackingHost, TrackingInbox, DEFAULT_SETTINGS_FILE,
};
use pokerdice_ar::ar_dice::ArDicePlugin;

/// Table-top poker dice with a simulated AR session
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings JSON file
    #[arg(short = 'c', long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: String,

    /// Seed for die orientations (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Draw physics colliders
    #[arg(long)]
    debug_physics: bool,

    /// Pretend the device has no world tracking
    #[arg(long)]
    no_tracking: bool,

    /// Write the default settings to the settings path and exit
    #[arg(long)]
    write_default_settings: bool,
}

fn main() {
    let args = Args::parse();

    if args.write_default_settings {
        match GameSettings::default().save_to_file(&args.settings) {
            Ok(()) => println!("{} {}", "Wrote default settings to".green(), args.settings),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    // No log subscriber exists until the app is built
    let mut settings = match GameSettings::load_if_present(&args.settings) {
        Ok(Some(settings)) => {
            println!("{} {}", "Loaded settings from".green(), args.settings);
            settings
        }
        Ok(None) => GameSettings::default(),
        Err(e) => {
            eprintln!(
                "{} {}; using default settings",
                "Warning:".yellow().bold(),
                e
            );
            GameSettings::default()
        }
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    settings.debug_physics |= args.debug_physics;

    println!(
        "{} {} dice per hand, physics at {} Hz",
        "Poker Dice AR:".cyan().bold(),
        settings.dice_per_hand,
        settings.physics_hz
    );
    println!(
        "{}",
        "Scan with WASD/arrows, Enter to start, swipe up or Space to throw, tap or T to collect"
            .dimmed()
    );

    let inbox = TrackingInbox::default();
    let session = if args.no_tracking {
        SimulatedSession::unsupported(settings.table, inbox.clone())
    } else {
        SimulatedSession::new(settings.table, inbox.clone())
    };

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Poker Dice AR".to_string(),
            resolution: (settings.window_size[0], settings.window_size[1]).into(),
            ..default()
        }),
        ..default()
    }))
    .insert_resource(Time::<Fixed>::from_hz(settings.physics_hz))
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
    .insert_resource(ClearColor(Color::srgb(0.12, 0.11, 0.1)))
    .insert_resource(TrackingHost::new(session, inbox));

    if settings.debug_physics {
        app.add_plugins(RapierDebugRenderPlugin::default());
    }

    app.add_plugins(ArDicePlugin::<SimulatedSession>::new(settings))
        .add_systems(
            Update,
            steer_simulated_device.before(advance_session::<SimulatedSession>),
        )
        .run();
}
