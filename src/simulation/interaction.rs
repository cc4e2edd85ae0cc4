//! Pointer-driven interaction: selection state machine, spawn, drag, delete.
//!
//! `InteractionController` turns screen-space pointer events, given the
//! current camera mapping, into world mutations:
//! - primary press starts dragging the dynamic body under the cursor,
//! - secondary press spawns a box with the current parameter values,
//! - tertiary held deletes user-spawned boxes under the cursor,
//! - `drag_tick` re-applies the spring-damper drag force every step.
//!
//! The controller also owns the registry of user-spawned boxes: the single
//! source of truth for which bodies are deletable. The static floor is never
//! in the registry, so it can never be dragged nor deleted.

use bevy::math::Vec2;

use crate::configuration::config::InteractionConfig;
use crate::simulation::camera::Camera;
use crate::simulation::params::{Param, ParameterStore};
use crate::simulation::world::{BodyId, BoxSpec, PhysicsWorld};

/// Current pointer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Dragging(BodyId),
}

pub struct InteractionController {
    state: InteractionState,
    boxes: Vec<BodyId>, // user-spawned boxes, in spawn order
    drag_stiffness: f32,
    drag_damping: f32,
    query_tolerance: f32,
    box_mass: f32,
}

impl InteractionController {
    pub fn new(cfg: &InteractionConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            boxes: Vec::new(),
            drag_stiffness: cfg.drag_stiffness,
            drag_damping: cfg.drag_damping,
            query_tolerance: cfg.query_tolerance,
            box_mass: cfg.box_mass,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Handles of every user-spawned box, in spawn order
    pub fn boxes(&self) -> &[BodyId] {
        &self.boxes
    }

    pub fn is_registered(&self, id: BodyId) -> bool {
        self.boxes.contains(&id)
    }

    /// Primary button pressed: start dragging the dynamic body under the
    /// cursor, if any. Clicks on empty space or on a static body do nothing,
    /// as does a press while a drag is already in flight.
    pub fn on_primary_press(&mut self, screen: Vec2, camera: &Camera, world: &mut PhysicsWorld) {
        if self.state != InteractionState::Idle {
            return;
        }
        let point = camera.screen_to_world(screen);
        if let Some(hit) = world.point_query_nearest(point, self.query_tolerance) {
            if world.is_dynamic(hit) {
                self.state = InteractionState::Dragging(hit);
            }
        }
    }

    /// Primary button released: end any drag. Idempotent when already idle.
    pub fn on_primary_release(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Secondary button pressed: spawn a box at the cursor using the current
    /// parameter values and register its handle
    pub fn on_secondary_press(
        &mut self,
        screen: Vec2,
        camera: &Camera,
        world: &mut PhysicsWorld,
        params: &ParameterStore,
    ) -> Option<BodyId> {
        let size = Vec2::new(params.get(Param::BoxSizeX), params.get(Param::BoxSizeY));
        if size.x <= 0.0 || size.y <= 0.0 {
            return None;
        }

        let spec = BoxSpec {
            position: camera.screen_to_world(screen),
            size,
            mass: self.box_mass,
            friction: params.get(Param::Friction),
            restitution: params.get(Param::Restitution),
            velocity: Vec2::new(params.get(Param::VelocityX), params.get(Param::VelocityY)),
        };
        let id = world.spawn_box(&spec);
        self.boxes.push(id);
        Some(id)
    }

    /// Tertiary button held: delete the user-spawned box under the cursor,
    /// if any. Only registry members are deletable; a drag on the removed
    /// body is cancelled before the handle goes away.
    pub fn on_tertiary_held(&mut self, screen: Vec2, camera: &Camera, world: &mut PhysicsWorld) {
        let point = camera.screen_to_world(screen);
        let Some(hit) = world.point_query_nearest(point, self.query_tolerance) else {
            return;
        };
        if !world.is_dynamic(hit) || !self.is_registered(hit) {
            return;
        }

        if self.state == InteractionState::Dragging(hit) {
            self.state = InteractionState::Idle;
        }
        world.remove_body(hit);
        self.boxes.retain(|b| *b != hit);
    }

    /// Apply the drag force for this step. Must be called once per physics
    /// step while a drag is in flight; the force is cleared by the step and
    /// has no effect unless re-applied.
    pub fn drag_tick(&mut self, cursor_screen: Vec2, camera: &Camera, world: &mut PhysicsWorld) {
        let InteractionState::Dragging(id) = self.state else {
            return;
        };
        let (Some(position), Some(velocity)) = (world.position(id), world.velocity(id)) else {
            // Handle vanished outside our control; drop the drag
            self.state = InteractionState::Idle;
            return;
        };

        let target = camera.screen_to_world(cursor_screen);
        let force = (target - position) * self.drag_stiffness - velocity * self.drag_damping;
        world.apply_force(id, force);
    }

    /// Remove every user-spawned box from the world, clear the registry, and
    /// end any drag. The static floor is untouched.
    pub fn reset(&mut self, world: &mut PhysicsWorld) {
        self.state = InteractionState::Idle;
        for id in self.boxes.drain(..) {
            world.remove_body(id);
        }
    }
}
