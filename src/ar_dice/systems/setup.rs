//! Scene setup system
//!
//! Spawns the camera, lights, focus reticle and the overlay UI, and builds
//! the shared die and surface assets.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use crate::ar_dice::meshes::{create_reticle_mesh, DiceAssets, SurfaceAssets};
use crate::ar_dice::types::*;

const BUTTON_BG: Color = Color::srgba(0.1, 0.1, 0.12, 0.75);
const BUTTON_BG_PRESSED: Color = Color::srgba(0.3, 0.3, 0.35, 0.85);
const TEXT_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);

/// Main setup system - initializes the scene and overlay
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Camera follows the device pose once tracking runs
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.5, 0.7).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.0, 4.0, 1.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            intensity: 150_000.0,
            range: 10.0,
            ..default()
        },
        Transform::from_xyz(-1.0, 2.0, 1.0),
    ));

    commands.insert_resource(DiceAssets::build(&mut meshes, &mut materials));
    commands.insert_resource(SurfaceAssets::build(&mut materials));

    let reticle_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.85),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(create_reticle_mesh())),
        MeshMaterial3d(reticle_material),
        Transform::default(),
        Visibility::Hidden,
        FocusReticle,
    ));

    spawn_overlay(&mut commands);
}

fn spawn_overlay(commands: &mut Commands) {
    // Status line across the top
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(24.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(GameState::DetectSurface.status_message()),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                StatusText,
            ));
        });

    // Buttons and style label along the bottom
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            width: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(10.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                StyleText,
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(16.0),
                    ..default()
                })
                .with_children(|row| {
                    for button in [ControlButton::Style, ControlButton::Reset, ControlButton::Start] {
                        spawn_control_button(row, button);
                    }
                });
        });
}

fn spawn_control_button(parent: &mut ChildSpawnerCommands, button: ControlButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(96.0),
                height: Val::Px(44.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_BG),
            BorderRadius::all(Val::Px(8.0)),
            button,
        ))
        .with_children(|b| {
            b.spawn((
                Text::new(button.label()),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
            ));
        });
}

/// Darken buttons while pressed
pub fn update_button_colors(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<ControlButton>)>,
) {
    for (interaction, mut color) in buttons.iter_mut() {
        *color = BackgroundColor(match interaction {
            Interaction::Pressed => BUTTON_BG_PRESSED,
            _ => BUTTON_BG,
        });
    }
}
