//! Adapter over the external rigid-body engine (Rapier).
//!
//! `PhysicsWorld` wraps all Rapier boilerplate into one struct and exposes
//! exactly the contract the sandbox needs:
//! - create/destroy the static floor and dynamic boxes,
//! - apply a force at the center of mass for the current step only,
//! - set gravity and solver iteration count without resetting state,
//! - advance the world by a fixed time delta,
//! - nearest-shape point queries,
//! - enumerate shapes as tagged variants (segment or polygon) for rendering.
//!
//! Positions and velocities cross the boundary as bevy `Vec2`; nalgebra
//! stays on the Rapier side of the conversion helpers.

use bevy::math::Vec2;
use rapier2d::prelude::*;
use std::num::NonZeroUsize;

// -----------------------------------------------------------------------------------------
// Conversion helpers (private) - bevy glam <-> nalgebra
// -----------------------------------------------------------------------------------------

fn to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn from_na(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn from_point(p: &nalgebra::Point2<f32>) -> Vec2 {
    Vec2::new(p.x, p.y)
}

// -----------------------------------------------------------------------------------------
// Public types
// -----------------------------------------------------------------------------------------

/// Opaque handle to a body and its collider, valid until the body is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyId {
    pub(crate) body: RigidBodyHandle,
    pub(crate) collider: ColliderHandle,
}

/// Everything needed to create one dynamic box
#[derive(Debug, Clone, Copy)]
pub struct BoxSpec {
    pub position: Vec2, // center, world space
    pub size: Vec2,     // full width and height
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
    pub velocity: Vec2, // initial linear velocity
}

/// World-space geometry of one collider, for rendering
#[derive(Debug, Clone)]
pub enum RenderShape {
    Segment { a: Vec2, b: Vec2, radius: f32 },
    Polygon { vertices: Vec<Vec2> },
}

/// A shape plus the kinematic class of its body
#[derive(Debug, Clone)]
pub struct ShapeView {
    pub shape: RenderShape,
    pub dynamic: bool,
}

// -----------------------------------------------------------------------------------------
// PhysicsWorld
// -----------------------------------------------------------------------------------------

pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Empty world with the given gravity vector. The coordinate system is
    /// y-down, so downward gravity is `Vec2::new(0.0, 981.0)`.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Create the static floor: a horizontal capsule centered at `center`,
    /// spanning `[-half_length, half_length]` in x
    pub fn spawn_floor(&mut self, center: Vec2, half_length: f32, thickness: f32, friction: f32) -> BodyId {
        let body = RigidBodyBuilder::fixed().translation(to_na(center)).build();
        let body_handle = self.bodies.insert(body);

        let collider = ColliderBuilder::capsule_x(half_length, thickness)
            .friction(friction)
            .build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        BodyId {
            body: body_handle,
            collider: collider_handle,
        }
    }

    /// Create a dynamic box from `spec` and return its handle
    pub fn spawn_box(&mut self, spec: &BoxSpec) -> BodyId {
        let body = RigidBodyBuilder::dynamic()
            .translation(to_na(spec.position))
            .linvel(to_na(spec.velocity))
            .build();
        let body_handle = self.bodies.insert(body);

        let collider = ColliderBuilder::cuboid(spec.size.x * 0.5, spec.size.y * 0.5)
            .mass(spec.mass)
            .friction(spec.friction)
            .restitution(spec.restitution)
            .build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        BodyId {
            body: body_handle,
            collider: collider_handle,
        }
    }

    /// Remove a body and its collider. Removing an already-absent handle is
    /// a no-op.
    pub fn remove_body(&mut self, id: BodyId) {
        if self.bodies.get(id.body).is_none() {
            return;
        }
        self.bodies.remove(
            id.body,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.get(id.body).is_some()
    }

    pub fn is_dynamic(&self, id: BodyId) -> bool {
        self.bodies.get(id.body).map(|b| b.is_dynamic()).unwrap_or(false)
    }

    pub fn position(&self, id: BodyId) -> Option<Vec2> {
        self.bodies.get(id.body).map(|b| from_na(b.translation()))
    }

    pub fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.bodies.get(id.body).map(|b| from_na(b.linvel()))
    }

    pub fn rotation(&self, id: BodyId) -> Option<f32> {
        self.bodies.get(id.body).map(|b| b.rotation().angle())
    }

    /// Full width and height of a box body's cuboid collider
    pub fn box_size(&self, id: BodyId) -> Option<Vec2> {
        let collider = self.colliders.get(id.collider)?;
        let cuboid = collider.shape().as_cuboid()?;
        Some(Vec2::new(
            cuboid.half_extents.x * 2.0,
            cuboid.half_extents.y * 2.0,
        ))
    }

    /// Apply a force at the body's center of mass. Forces are cleared after
    /// every step, so a continuous force must be re-applied each tick.
    pub fn apply_force(&mut self, id: BodyId, force: Vec2) {
        if let Some(body) = self.bodies.get_mut(id.body) {
            body.add_force(to_na(force), true);
        }
    }

    /// Nearest shape to `point`, or `None` when nothing is within
    /// `tolerance`. A point inside a shape always hits.
    pub fn point_query_nearest(&mut self, point: Vec2, tolerance: f32) -> Option<BodyId> {
        self.query_pipeline.update(&self.colliders);

        let p = nalgebra::Point2::new(point.x, point.y);
        let (collider_handle, projection) = self.query_pipeline.project_point(
            &self.bodies,
            &self.colliders,
            &p,
            true,
            QueryFilter::default(),
        )?;

        if !projection.is_inside && (projection.point - p).norm() > tolerance {
            return None;
        }

        let collider = self.colliders.get(collider_handle)?;
        let body = collider.parent()?;
        Some(BodyId {
            body,
            collider: collider_handle,
        })
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = to_na(gravity);
    }

    pub fn set_solver_iterations(&mut self, iterations: usize) {
        if let Some(n) = NonZeroUsize::new(iterations) {
            self.integration_parameters.num_solver_iterations = n;
        }
    }

    /// Advance the world by `dt` seconds, then clear accumulated forces so
    /// the next step starts from zero
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces(true);
        }
    }

    /// Number of bodies currently in the world, the static floor included
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// World-space geometry of every collider, as tagged variants
    pub fn render_shapes(&self) -> Vec<ShapeView> {
        let mut out = Vec::with_capacity(self.colliders.len());
        for (_, collider) in self.colliders.iter() {
            let iso = collider.position();
            let dynamic = collider
                .parent()
                .and_then(|h| self.bodies.get(h))
                .map(|b| b.is_dynamic())
                .unwrap_or(false);

            let shape = collider.shape();
            if let Some(capsule) = shape.as_capsule() {
                out.push(ShapeView {
                    dynamic,
                    shape: RenderShape::Segment {
                        a: from_point(&(iso * capsule.segment.a)),
                        b: from_point(&(iso * capsule.segment.b)),
                        radius: capsule.radius,
                    },
                });
            } else if let Some(cuboid) = shape.as_cuboid() {
                let he = cuboid.half_extents;
                let corners = [
                    point![-he.x, -he.y],
                    point![he.x, -he.y],
                    point![he.x, he.y],
                    point![-he.x, he.y],
                ];
                out.push(ShapeView {
                    dynamic,
                    shape: RenderShape::Polygon {
                        vertices: corners.iter().map(|c| from_point(&(iso * *c))).collect(),
                    },
                });
            }
        }
        out
    }
}
