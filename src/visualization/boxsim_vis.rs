//! Bevy viewer for the sandbox: window, egui settings panel, input
//! gathering, and shape rendering.
//!
//! The `Sandbox` resource holds all simulation state; the systems here are
//! thin shims that gather raw input into a `TickInput`, drive one
//! `Sandbox::tick` per frame, and mirror the physics world on screen. Boxes
//! are meshes kept in sync with the registry; outlines and the floor segment
//! are drawn with gizmos from the world's shape enumeration.

use bevy::input::mouse::MouseWheel;
use bevy::math::primitives::Rectangle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{PresentMode, PrimaryWindow};
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::configuration::config::WindowConfig;
use crate::simulation::camera::{Camera as ViewCamera, PanInput};
use crate::simulation::params::{Param, ParameterStore};
use crate::simulation::sandbox::{Sandbox, TickInput, UiAction};
use crate::simulation::world::{BodyId, RenderShape};

/// Component tagging each box mesh with its physics handle
#[derive(Component)]
struct BoxVisual(BodyId);

/// Button clicks collected by the panel this frame, drained by the driver
#[derive(Resource, Default)]
struct UiActions(Vec<UiAction>);

/// Whether the widget toolkit currently claims the pointer
#[derive(Resource, Default)]
struct UiFocus {
    pointer: bool,
}

const PANEL_WIDTH: f32 = 320.0;

fn background_color() -> Color {
    Color::srgb(0.78, 0.78, 0.78)
}

fn box_fill_color() -> Color {
    Color::srgb(0.39, 0.39, 0.78)
}

fn box_outline_color() -> Color {
    Color::srgb(0.2, 0.2, 0.39)
}

/// Entrypoint: run the sandbox viewer until the window closes
pub fn run_sandbox(sandbox: Sandbox, window: &WindowConfig) {
    println!(
        "run_sandbox: starting viewer, {} bodies in world",
        sandbox.world.body_count()
    );

    App::new()
        .insert_resource(ClearColor(background_color()))
        .insert_resource(sandbox)
        .init_resource::<UiActions>()
        .init_resource::<UiFocus>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: window.title.clone(),
                resolution: (window.width, window.height).into(),
                present_mode: PresentMode::AutoVsync,
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_plugins(EguiPlugin)
        .add_systems(Startup, setup_view)
        .add_systems(
            Update,
            (
                settings_panel_system,
                drive_sandbox_system,
                sync_box_visuals_system,
                draw_outlines_system,
            )
                .chain(),
        )
        .run();
}

/// Startup system: 2D camera and gizmo line width
fn setup_view(mut commands: Commands, mut gizmo_store: ResMut<GizmoConfigStore>) {
    commands.spawn(Camera2dBundle::default());

    let (config, _) = gizmo_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line_width = 3.0;
}

/// Settings side panel: one slider per parameter, Reset and Pause buttons.
/// Records whether egui claims the pointer so world clicks can be
/// suppressed while the user works the panel.
fn settings_panel_system(
    mut contexts: EguiContexts,
    mut sandbox: ResMut<Sandbox>,
    mut actions: ResMut<UiActions>,
    mut focus: ResMut<UiFocus>,
) {
    let ctx = contexts.ctx_mut();
    egui::SidePanel::right("settings")
        .exact_width(PANEL_WIDTH)
        .show(ctx, |ui| {
            ui.heading("Global Settings");
            for param in Param::GLOBAL {
                param_slider(ui, &mut sandbox.params, param);
            }

            ui.separator();
            ui.heading("New Box Properties");
            for param in Param::NEW_BOX {
                param_slider(ui, &mut sandbox.params, param);
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Reset").clicked() {
                    actions.0.push(UiAction::Reset);
                }
                let pause_label = if sandbox.paused { "Resume" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    actions.0.push(UiAction::TogglePause);
                }
            });
        });

    focus.pointer = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
}

/// Slider widget bound to one parameter slot; the store clamps on write
fn param_slider(ui: &mut egui::Ui, params: &mut ParameterStore, param: Param) {
    let (min, max) = param.range();
    let mut value = params.get(param);
    let mut slider = egui::Slider::new(&mut value, min..=max).text(param.label());
    if param.is_integral() {
        slider = slider.integer();
    }
    if ui.add(slider).changed() {
        params.set(param, value);
    }
}

/// Per-frame driver: drain UI actions, gather raw input, tick the sandbox
fn drive_sandbox_system(
    mut sandbox: ResMut<Sandbox>,
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut actions: ResMut<UiActions>,
    focus: Res<UiFocus>,
) {
    for action in actions.0.drain(..) {
        sandbox.apply_action(action);
    }

    let cursor = windows
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position());

    let input = TickInput {
        pan: PanInput {
            up: keys.pressed(KeyCode::KeyW),
            down: keys.pressed(KeyCode::KeyS),
            left: keys.pressed(KeyCode::KeyA),
            right: keys.pressed(KeyCode::KeyD),
        },
        wheel: wheel.read().map(|event| event.y).collect(),
        cursor,
        primary_pressed: buttons.just_pressed(MouseButton::Left),
        primary_released: buttons.just_released(MouseButton::Left),
        secondary_pressed: buttons.just_pressed(MouseButton::Middle),
        tertiary_held: buttons.pressed(MouseButton::Right),
        ui_claims_pointer: focus.pointer,
    };

    sandbox.tick(&input);
}

/// Keep one mesh per registered box: spawn for new handles, despawn for
/// removed ones, and sync transform from the physics body every frame
fn sync_box_visuals_system(
    mut commands: Commands,
    sandbox: Res<Sandbox>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut visuals: Query<(Entity, &BoxVisual, &mut Transform)>,
) {
    let camera = &sandbox.camera;
    let mut seen: Vec<BodyId> = Vec::new();

    for (entity, BoxVisual(id), mut transform) in &mut visuals {
        if !sandbox.controller.is_registered(*id) {
            commands.entity(entity).despawn();
            continue;
        }
        seen.push(*id);

        if let (Some(position), Some(angle)) =
            (sandbox.world.position(*id), sandbox.world.rotation(*id))
        {
            transform.translation = to_render(camera, position).extend(1.0);
            // y-down world angle maps to a negated y-up render angle
            transform.rotation = Quat::from_rotation_z(-angle);
            transform.scale = Vec3::splat(camera.zoom);
        }
    }

    for id in sandbox.controller.boxes() {
        if seen.contains(id) {
            continue;
        }
        let (Some(size), Some(position)) = (sandbox.world.box_size(*id), sandbox.world.position(*id))
        else {
            continue;
        };

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Rectangle::new(size.x, size.y))),
                material: materials.add(ColorMaterial::from(box_fill_color())),
                transform: Transform::from_translation(to_render(camera, position).extend(1.0))
                    .with_scale(Vec3::splat(camera.zoom)),
                ..Default::default()
            },
            BoxVisual(*id),
        ));
    }
}

/// Gizmo pass: floor segment plus an outline around every polygon. Static
/// shapes draw black, dynamic ones in the box outline color.
fn draw_outlines_system(sandbox: Res<Sandbox>, mut gizmos: Gizmos) {
    let camera = &sandbox.camera;
    for view in sandbox.world.render_shapes() {
        let color = if view.dynamic {
            box_outline_color()
        } else {
            Color::BLACK
        };
        match view.shape {
            RenderShape::Segment { a, b, .. } => {
                gizmos.line_2d(to_render(camera, a), to_render(camera, b), color);
            }
            RenderShape::Polygon { vertices } => {
                let mut points: Vec<Vec2> =
                    vertices.iter().map(|v| to_render(camera, *v)).collect();
                if let Some(first) = points.first().copied() {
                    points.push(first);
                }
                gizmos.linestrip_2d(points, color);
            }
        }
    }
}

/// World point -> bevy render coordinates (origin at window center, y up)
fn to_render(camera: &ViewCamera, world: Vec2) -> Vec2 {
    let screen = camera.world_to_screen(world);
    let viewport = camera.viewport();
    Vec2::new(screen.x - viewport.x * 0.5, viewport.y * 0.5 - screen.y)
}
