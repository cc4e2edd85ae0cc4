use std::time::Instant;

use bevy::math::Vec2;

use crate::simulation::world::{BoxSpec, PhysicsWorld};

/// Time world stepping at different box counts.
///
/// Builds a floor plus a grid of stacked boxes, advances the world for a
/// fixed number of 60 Hz steps, and prints the average step cost. Gives a
/// quick feel for how many live boxes the sandbox sustains per frame.
pub fn bench_step() {
    let ns = [50, 100, 200, 400, 800];
    let steps = 600;
    let dt = 1.0 / 60.0;

    for n in ns {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 981.0));
        world.spawn_floor(Vec2::new(0.0, 720.0), 5000.0, 5.0, 1.0);
        world.set_solver_iterations(10);

        // Deterministic grid above the floor, 20 boxes per row
        for i in 0..n {
            let col = (i % 20) as f32;
            let row = (i / 20) as f32;
            world.spawn_box(&BoxSpec {
                position: Vec2::new(-600.0 + col * 60.0, 650.0 - row * 60.0),
                size: Vec2::new(50.0, 50.0),
                mass: 1.0,
                friction: 0.5,
                restitution: 0.5,
                velocity: Vec2::ZERO,
            });
        }

        // Warm up broad phase and islands
        world.step(dt);

        let t0 = Instant::now();
        for _ in 0..steps {
            world.step(dt);
        }
        let elapsed = t0.elapsed().as_secs_f64();

        println!(
            "N = {n:4}, total = {:8.4} s, per step = {:7.4} ms",
            elapsed,
            elapsed / steps as f64 * 1000.0
        );
    }
}
