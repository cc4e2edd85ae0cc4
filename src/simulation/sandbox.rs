//! The runtime sandbox bundle and its per-tick control loop.
//!
//! `Sandbox` is the main "runtime bundle" constructed from a
//! [`SettingsConfig`]: camera, parameter store, physics world (with the
//! static floor already in it), interaction controller, and the pause flag.
//!
//! In Bevy terms, this is inserted as a `Resource` and driven once per frame
//! by the visualization layer, which gathers raw input into a [`TickInput`]
//! and forwards button clicks as [`UiAction`]s.

use bevy::math::Vec2;
use bevy::prelude::Resource;

use crate::configuration::config::SettingsConfig;
use crate::simulation::camera::{Camera, PanInput};
use crate::simulation::interaction::InteractionController;
use crate::simulation::params::{Param, ParameterStore};
use crate::simulation::world::{BodyId, PhysicsWorld};

/// Discrete UI actions, delivered once per frame as a short list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Reset,
    TogglePause,
}

/// Raw input gathered for one tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub pan: PanInput,
    pub wheel: Vec<f32>,         // one entry per wheel event, sign is direction
    pub cursor: Option<Vec2>,    // screen-space cursor, if inside the window
    pub primary_pressed: bool,   // press edge
    pub primary_released: bool,  // release edge
    pub secondary_pressed: bool, // press edge
    pub tertiary_held: bool,     // level, polled every tick
    pub ui_claims_pointer: bool, // widget toolkit currently owns the pointer
}

/// Fully-initialized sandbox session
#[derive(Resource)]
pub struct Sandbox {
    pub camera: Camera,
    pub params: ParameterStore,
    pub world: PhysicsWorld,
    pub controller: InteractionController,
    pub floor: BodyId,
    pub paused: bool,
}

impl Sandbox {
    /// Build a session from settings: camera at the startup view, parameters
    /// clamped into range, a world holding only the static floor, and an
    /// idle controller. Starts running (not paused).
    pub fn build(cfg: &SettingsConfig) -> Self {
        let camera = Camera::new(&cfg.camera, cfg.window.width, cfg.window.height);
        let params = ParameterStore::new(&cfg.parameters);

        let mut world = PhysicsWorld::new(Vec2::new(0.0, params.get(Param::Gravity)));
        let floor = world.spawn_floor(
            Vec2::new(0.0, cfg.window.height),
            cfg.floor.half_length,
            cfg.floor.thickness,
            cfg.floor.friction,
        );

        Self {
            camera,
            params,
            world,
            controller: InteractionController::new(&cfg.interaction),
            floor,
            paused: false,
        }
    }

    /// Apply one discrete UI action. Both actions work in either mode.
    pub fn apply_action(&mut self, action: UiAction) {
        match action {
            UiAction::Reset => self.controller.reset(&mut self.world),
            UiAction::TogglePause => self.paused = !self.paused,
        }
    }

    /// Advance the session by one tick.
    ///
    /// Always: camera input, pointer events (unless the UI claims the
    /// pointer), and continuous delete polling. Only while running: the drag
    /// force, pushing gravity and iteration count into the world, and one
    /// fixed `DeltaTime` step. The step size never scales with wall-clock
    /// frame time.
    pub fn tick(&mut self, input: &TickInput) {
        self.camera.handle_input(input.pan, &input.wheel);

        if let Some(cursor) = input.cursor {
            if !input.ui_claims_pointer {
                if input.primary_pressed {
                    self.controller
                        .on_primary_press(cursor, &self.camera, &mut self.world);
                }
                if input.secondary_pressed {
                    self.controller.on_secondary_press(
                        cursor,
                        &self.camera,
                        &mut self.world,
                        &self.params,
                    );
                }
            }
        }

        // Releases are never gated on UI focus; a release over the panel
        // still ends the drag
        if input.primary_released {
            self.controller.on_primary_release();
        }

        if let Some(cursor) = input.cursor {
            if input.tertiary_held && !input.ui_claims_pointer {
                self.controller
                    .on_tertiary_held(cursor, &self.camera, &mut self.world);
            }
        }

        if self.paused {
            return;
        }

        if let Some(cursor) = input.cursor {
            self.controller.drag_tick(cursor, &self.camera, &mut self.world);
        }

        self.world
            .set_gravity(Vec2::new(0.0, self.params.get(Param::Gravity)));
        self.world
            .set_solver_iterations(self.params.get(Param::Iterations) as usize);
        self.world.step(self.params.get(Param::DeltaTime));
    }
}
