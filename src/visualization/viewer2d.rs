use std::collections::HashMap;

use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::simulation::camera::{CameraCommand, PanDirection, RenderedBody};
use crate::simulation::scenario::Scenario;
use crate::simulation::states::BodyId;

/// Component tagging each circle with the id of the body it draws
#[derive(Component)]
struct BodyMarker(pub BodyId);

#[derive(Component)]
struct TelemetryText;

/// Live body id -> entity drawing it
#[derive(Resource, Default)]
struct BodyEntities(HashMap<BodyId, Entity>);

/// Minimum on-screen radius so small bodies stay visible
const MIN_RADIUS: f32 = 1.0;

pub fn run_2d(scenario: Scenario) {
    log::info!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.system.len());

    App::new()
        .insert_resource(Time::<Fixed>::from_hz(scenario.engine.tick_rate))
        .insert_resource(scenario)
        .init_resource::<BodyEntities>()
        // env_logger already owns the global logger
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_system)
        .add_systems(FixedUpdate, physics_step_system)
        .add_systems(Update, (camera_input_system, sync_bodies_system, telemetry_system).chain())
        .run();
}

fn setup_system(mut commands: Commands) {
    // 2D camera centered on the origin; the simulation camera supplies the offset
    commands.spawn(Camera2dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..Default::default()
        },
        ..Default::default()
    });

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 16.0,
                color: Color::WHITE,
                ..Default::default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..Default::default()
        }),
        TelemetryText,
    ));
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    if let Err(e) = scenario.step() {
        log::error!("physics step failed: {e}");
    }
}

fn camera_input_system(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>) {
    let mut commands = Vec::new();

    // pan while held
    for (key, dir) in [
        (KeyCode::ArrowUp, PanDirection::Up),
        (KeyCode::ArrowDown, PanDirection::Down),
        (KeyCode::ArrowLeft, PanDirection::Left),
        (KeyCode::ArrowRight, PanDirection::Right),
    ] {
        if keys.pressed(key) {
            commands.push(CameraCommand::Pan(dir));
        }
    }
    if keys.just_pressed(KeyCode::KeyR) {
        commands.push(CameraCommand::ResetPan);
    }
    if keys.any_just_pressed([KeyCode::KeyN, KeyCode::Period]) {
        commands.push(CameraCommand::Next);
    }
    if keys.any_just_pressed([KeyCode::KeyP, KeyCode::Comma]) {
        commands.push(CameraCommand::Previous);
    }

    for cmd in commands {
        if let Err(e) = scenario.command(cmd) {
            log::error!("camera command {cmd:?} failed: {e}");
        }
    }
}

/// Despawn circles of merged-away bodies, spawn circles for new ones,
/// and move everything to its offset screen position
fn sync_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut entities: ResMut<BodyEntities>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(&BodyMarker, &mut Transform)>,
) {
    let frame = scenario.render_frame();
    let by_id: HashMap<BodyId, &RenderedBody> = frame.iter().map(|b| (b.id, b)).collect();

    entities.0.retain(|id, entity| {
        let keep = by_id.contains_key(id);
        if !keep {
            commands.entity(*entity).despawn();
        }
        keep
    });

    for (BodyMarker(id), mut transform) in &mut query {
        if let Some(b) = by_id.get(id) {
            transform.translation.x = b.screen.x as f32;
            transform.translation.y = b.screen.y as f32;
        }
    }

    let fresh: Vec<&RenderedBody> = frame.iter().filter(|b| !entities.0.contains_key(&b.id)).collect();
    for b in fresh {
        let [r, g, bl] = b.color.to_f32();
        let radius_screen = (b.radius as f32).max(MIN_RADIUS);

        let entity = commands
            .spawn((
                MaterialMesh2dBundle {
                    mesh: Mesh2dHandle(meshes.add(Circle::new(radius_screen))),
                    material: materials.add(ColorMaterial::from(Color::srgb(r, g, bl))),
                    transform: Transform::from_xyz(b.screen.x as f32, b.screen.y as f32, 0.0),
                    ..Default::default()
                },
                BodyMarker(b.id),
            ))
            .id();
        entities.0.insert(b.id, entity);
    }
}

fn telemetry_system(scenario: Res<Scenario>, mut query: Query<&mut Text, With<TelemetryText>>) {
    let snapshot = scenario.snapshot();
    for mut text in &mut query {
        text.sections[0].value = snapshot.to_string();
    }
}
