use bevy::math::Vec2;

use boxsim::{
    CameraConfig, FloorConfig, InteractionConfig, Param, ParametersConfig, SettingsConfig,
    WindowConfig,
};
use boxsim::{BoxSpec, Camera, InteractionState, PanInput, ParameterStore, Sandbox, TickInput, UiAction};

/// Settings matching the shipped defaults, built by hand so tests do not
/// depend on the YAML files
pub fn test_settings() -> SettingsConfig {
    SettingsConfig {
        window: WindowConfig {
            width: 1280.0,
            height: 720.0,
            title: "test".to_string(),
        },
        camera: CameraConfig {
            pan_speed: 15.0,
            zoom_speed: 0.1,
            zoom_min: 0.1,
        },
        interaction: InteractionConfig {
            drag_stiffness: 6000.0,
            drag_damping: 200.0,
            query_tolerance: 2.0,
            box_mass: 1.0,
        },
        floor: FloorConfig {
            half_length: 5000.0,
            thickness: 5.0,
            friction: 1.0,
        },
        parameters: ParametersConfig {
            delta_time: 1.0 / 60.0,
            iterations: 10.0,
            gravity: 981.0,
            box_size_x: 50.0,
            box_size_y: 50.0,
            friction: 0.5,
            velocity_x: 0.0,
            velocity_y: 0.0,
            restitution: 0.5,
        },
    }
}

pub fn test_sandbox() -> Sandbox {
    Sandbox::build(&test_settings())
}

pub fn test_camera() -> Camera {
    let cfg = test_settings();
    Camera::new(&cfg.camera, cfg.window.width, cfg.window.height)
}

/// Tick input with only the cursor set
pub fn cursor_input(cursor: Vec2) -> TickInput {
    TickInput {
        cursor: Some(cursor),
        ..Default::default()
    }
}

// ==================================================================================
// Camera tests
// ==================================================================================

#[test]
fn camera_screen_world_round_trip() {
    let mut camera = test_camera();
    let points = [
        Vec2::new(0.0, 0.0),
        Vec2::new(640.0, 360.0),
        Vec2::new(-1234.5, 987.25),
        Vec2::new(5000.0, -3.0),
    ];

    for zoom in [0.1, 0.5, 1.0, 3.7] {
        camera.zoom = zoom;
        camera.pan = Vec2::new(100.0, -250.0);
        for p in points {
            let round_trip = camera.screen_to_world(camera.world_to_screen(p));
            assert!(
                (round_trip - p).length() < 1e-2,
                "round trip failed at zoom {}: {:?} -> {:?}",
                zoom,
                p,
                round_trip
            );
        }
    }
}

#[test]
fn camera_pan_accumulates_scaled_by_zoom() {
    let mut camera = test_camera();
    camera.zoom = 2.0;
    let start = camera.pan;

    let held = PanInput {
        right: true,
        ..Default::default()
    };
    for _ in 0..4 {
        camera.handle_input(held, &[]);
    }

    // 4 ticks of pan_speed / zoom = 4 * 15 / 2
    assert!((camera.pan.x - (start.x + 30.0)).abs() < 1e-4);
    assert!((camera.pan.y - start.y).abs() < 1e-4);
}

#[test]
fn camera_zoom_in_then_out_nearly_returns() {
    let mut camera = test_camera();
    let start = camera.zoom;

    camera.handle_input(PanInput::default(), &[1.0]);
    camera.handle_input(PanInput::default(), &[-1.0]);

    // The multiplicative model returns to within zoom_speed^2 of the start
    assert!((camera.zoom - start).abs() <= 0.1 * 0.1 + 1e-4);
}

#[test]
fn camera_zoom_clamped_at_minimum() {
    let mut camera = test_camera();
    for _ in 0..50 {
        camera.handle_input(PanInput::default(), &[-1.0]);
    }
    assert!((camera.zoom - 0.1).abs() < 1e-6, "zoom = {}", camera.zoom);

    // Zooming back in works after clamping
    camera.handle_input(PanInput::default(), &[1.0]);
    assert!(camera.zoom > 0.1);
}

// ==================================================================================
// Parameter store tests
// ==================================================================================

#[test]
fn params_set_clamps_to_range() {
    let mut params = ParameterStore::new(&test_settings().parameters);

    params.set(Param::Gravity, -50.0);
    assert_eq!(params.get(Param::Gravity), 0.0);

    params.set(Param::Gravity, 99999.0);
    assert_eq!(params.get(Param::Gravity), 2000.0);

    params.set(Param::BoxSizeX, 500.0);
    assert_eq!(params.get(Param::BoxSizeX), 200.0);

    params.set(Param::VelocityY, -10000.0);
    assert_eq!(params.get(Param::VelocityY), -500.0);
}

#[test]
fn params_every_slot_stays_in_range() {
    let mut params = ParameterStore::new(&test_settings().parameters);

    for param in Param::ALL {
        let (min, max) = param.range();
        params.set(param, f32::MAX);
        assert!(params.get(param) <= max, "{} above range", param.label());
        params.set(param, f32::MIN);
        assert!(params.get(param) >= min, "{} below range", param.label());
    }
}

#[test]
fn params_integral_values_truncate() {
    let mut params = ParameterStore::new(&test_settings().parameters);

    params.set(Param::Iterations, 7.9);
    assert_eq!(params.get(Param::Iterations), 7.0);

    params.set(Param::BoxSizeY, 33.4);
    assert_eq!(params.get(Param::BoxSizeY), 33.0);

    // Continuous parameters keep their fraction
    params.set(Param::Friction, 0.75);
    assert!((params.get(Param::Friction) - 0.75).abs() < 1e-6);
}

// ==================================================================================
// Interaction tests
// ==================================================================================

#[test]
fn spawn_adds_one_registered_body_at_cursor() {
    let mut sandbox = test_sandbox();
    sandbox.apply_action(UiAction::TogglePause); // no stepping, exact positions

    assert_eq!(sandbox.world.body_count(), 1); // floor only

    let click = Vec2::new(400.0, 300.0);
    let mut input = cursor_input(click);
    input.secondary_pressed = true;
    sandbox.tick(&input);

    assert_eq!(sandbox.controller.boxes().len(), 1);
    assert_eq!(sandbox.world.body_count(), 2);

    let id = sandbox.controller.boxes()[0];
    assert!(sandbox.world.is_dynamic(id));

    let expected = sandbox.camera.screen_to_world(click);
    let position = sandbox.world.position(id).expect("body exists");
    assert!((position - expected).length() < 1e-4);
}

#[test]
fn spawn_suppressed_while_ui_claims_pointer() {
    let mut sandbox = test_sandbox();

    let mut input = cursor_input(Vec2::new(400.0, 300.0));
    input.secondary_pressed = true;
    input.ui_claims_pointer = true;
    sandbox.tick(&input);

    assert!(sandbox.controller.boxes().is_empty());
    assert_eq!(sandbox.world.body_count(), 1);
}

#[test]
fn primary_press_on_empty_space_stays_idle() {
    let mut sandbox = test_sandbox();

    let mut input = cursor_input(Vec2::new(200.0, 100.0));
    input.primary_pressed = true;
    sandbox.tick(&input);

    assert_eq!(sandbox.controller.state(), InteractionState::Idle);
}

#[test]
fn floor_is_never_draggable_nor_deletable() {
    let mut sandbox = test_sandbox();
    // World (640, 720) lies on the floor and maps to screen (640, 720) at
    // the startup view
    let on_floor = Vec2::new(640.0, 720.0);

    let mut input = cursor_input(on_floor);
    input.primary_pressed = true;
    sandbox.tick(&input);
    assert_eq!(sandbox.controller.state(), InteractionState::Idle);

    let mut input = cursor_input(on_floor);
    input.tertiary_held = true;
    sandbox.tick(&input);
    assert!(sandbox.world.contains(sandbox.floor));
    assert_eq!(sandbox.world.body_count(), 1);
}

#[test]
fn drag_starts_on_spawned_box() {
    let mut sandbox = test_sandbox();
    sandbox.apply_action(UiAction::TogglePause);

    let click = Vec2::new(500.0, 200.0);
    let mut input = cursor_input(click);
    input.secondary_pressed = true;
    sandbox.tick(&input);
    let id = sandbox.controller.boxes()[0];

    let mut input = cursor_input(click);
    input.primary_pressed = true;
    sandbox.tick(&input);
    assert_eq!(sandbox.controller.state(), InteractionState::Dragging(id));

    let mut input = cursor_input(click);
    input.primary_released = true;
    sandbox.tick(&input);
    assert_eq!(sandbox.controller.state(), InteractionState::Idle);
}

#[test]
fn drag_force_pulls_body_toward_cursor() {
    let mut sandbox = test_sandbox();
    sandbox.params.set(Param::Gravity, 0.0); // isolate the spring

    let click = Vec2::new(400.0, 300.0);
    sandbox.apply_action(UiAction::TogglePause);
    let mut input = cursor_input(click);
    input.secondary_pressed = true;
    sandbox.tick(&input);
    let id = sandbox.controller.boxes()[0];
    let start_x = sandbox.world.position(id).expect("body exists").x;

    let mut input = cursor_input(click);
    input.primary_pressed = true;
    sandbox.tick(&input);

    // One step with the cursor to the right: the spring acts on a body at
    // rest, so the first step always moves it toward the cursor
    sandbox.apply_action(UiAction::TogglePause);
    let target = Vec2::new(600.0, 300.0);
    sandbox.tick(&cursor_input(target));

    let end_x = sandbox.world.position(id).expect("body exists").x;
    assert!(end_x > start_x, "box did not move toward cursor: {} -> {}", start_x, end_x);
}

#[test]
fn deleting_dragged_box_ends_drag_cleanly() {
    let mut sandbox = test_sandbox();
    sandbox.apply_action(UiAction::TogglePause);

    let click = Vec2::new(500.0, 200.0);
    let mut input = cursor_input(click);
    input.secondary_pressed = true;
    sandbox.tick(&input);
    let id = sandbox.controller.boxes()[0];

    let mut input = cursor_input(click);
    input.primary_pressed = true;
    sandbox.tick(&input);
    assert_eq!(sandbox.controller.state(), InteractionState::Dragging(id));

    // Delete the dragged box out from under the drag
    let mut input = cursor_input(click);
    input.tertiary_held = true;
    sandbox.tick(&input);

    assert_eq!(sandbox.controller.state(), InteractionState::Idle);
    assert!(sandbox.controller.boxes().is_empty());
    assert!(!sandbox.world.contains(id));
    assert_eq!(sandbox.world.body_count(), 1);

    // Later ticks must not touch the removed handle
    sandbox.apply_action(UiAction::TogglePause);
    for _ in 0..3 {
        sandbox.tick(&cursor_input(click));
    }
    assert_eq!(sandbox.controller.state(), InteractionState::Idle);
}

#[test]
fn delete_ignores_unregistered_dynamic_bodies() {
    let mut sandbox = test_sandbox();

    // A dynamic body created outside the controller is not deletable
    let loose = sandbox.world.spawn_box(&BoxSpec {
        position: Vec2::new(300.0, 300.0),
        size: Vec2::new(50.0, 50.0),
        mass: 1.0,
        friction: 0.5,
        restitution: 0.5,
        velocity: Vec2::ZERO,
    });

    let mut input = cursor_input(Vec2::new(300.0, 300.0));
    input.tertiary_held = true;
    sandbox.tick(&input);

    assert!(sandbox.world.contains(loose));
}

#[test]
fn reset_leaves_only_the_floor() {
    let mut sandbox = test_sandbox();
    sandbox.apply_action(UiAction::TogglePause);

    for x in [200.0, 400.0, 600.0] {
        let mut input = cursor_input(Vec2::new(x, 200.0));
        input.secondary_pressed = true;
        sandbox.tick(&input);
    }
    assert_eq!(sandbox.controller.boxes().len(), 3);
    assert_eq!(sandbox.world.body_count(), 4);

    // Drag one so reset also has a selection to clear
    let mut input = cursor_input(Vec2::new(400.0, 200.0));
    input.primary_pressed = true;
    sandbox.tick(&input);

    sandbox.apply_action(UiAction::Reset);

    assert!(sandbox.controller.boxes().is_empty());
    assert_eq!(sandbox.world.body_count(), 1);
    assert!(sandbox.world.contains(sandbox.floor));
    assert_eq!(sandbox.controller.state(), InteractionState::Idle);
}

// ==================================================================================
// Simulation loop tests
// ==================================================================================

#[test]
fn pause_suspends_stepping_but_not_interaction() {
    let mut sandbox = test_sandbox();
    sandbox.apply_action(UiAction::TogglePause);
    assert!(sandbox.paused);

    let mut input = cursor_input(Vec2::new(400.0, 100.0));
    input.secondary_pressed = true;
    sandbox.tick(&input);
    let id = sandbox.controller.boxes()[0];
    let frozen = sandbox.world.position(id).expect("body exists");

    // No gravity while paused
    for _ in 0..5 {
        sandbox.tick(&TickInput::default());
    }
    let after = sandbox.world.position(id).expect("body exists");
    assert!((after - frozen).length() < 1e-6);

    // Camera input and spawning still work
    let pan_before = sandbox.camera.pan;
    sandbox.tick(&TickInput {
        pan: PanInput {
            left: true,
            ..Default::default()
        },
        ..Default::default()
    });
    assert!(sandbox.camera.pan.x < pan_before.x);

    let mut input = cursor_input(Vec2::new(700.0, 100.0));
    input.secondary_pressed = true;
    sandbox.tick(&input);
    assert_eq!(sandbox.controller.boxes().len(), 2);

    // Resuming lets gravity act again
    sandbox.apply_action(UiAction::TogglePause);
    sandbox.tick(&TickInput::default());
    let resumed = sandbox.world.position(id).expect("body exists");
    assert!(resumed.y > frozen.y);
}

#[test]
fn free_fall_increases_y_monotonically() {
    let mut sandbox = test_sandbox();

    // Zero-velocity box high above the floor
    let id = sandbox.world.spawn_box(&BoxSpec {
        position: Vec2::new(0.0, 0.0),
        size: Vec2::new(50.0, 50.0),
        mass: 1.0,
        friction: 0.5,
        restitution: 0.5,
        velocity: Vec2::ZERO,
    });

    let mut last_y = sandbox.world.position(id).expect("body exists").y;
    for _ in 0..30 {
        sandbox.tick(&TickInput::default());
        let y = sandbox.world.position(id).expect("body exists").y;
        assert!(y > last_y, "fall not monotonic: {} -> {}", last_y, y);
        last_y = y;
    }
}
