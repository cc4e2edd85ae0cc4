//! Viewport camera: pan/zoom state and the screen <-> world mapping.
//!
//! Both spaces are y-down. `pan` is the world point shown at the viewport
//! center, so the two transforms are exact inverses of each other:
//!
//! - `world_to_screen(p) = (p - pan) * zoom + viewport / 2`
//! - `screen_to_world(p) = (p - viewport / 2) / zoom + pan`

use bevy::math::Vec2;

use crate::configuration::config::CameraConfig;

/// Directional pan keys held during one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PanInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub pan: Vec2,  // world point mapped to the viewport center
    pub zoom: f32,  // clamped to [zoom_min, inf)
    viewport: Vec2, // viewport size in logical pixels
    pan_speed: f32,
    zoom_speed: f32,
    zoom_min: f32,
}

impl Camera {
    /// Camera centered on the world point `(width/2, height/2)` at zoom 1,
    /// so screen and world coordinates coincide at startup
    pub fn new(cfg: &CameraConfig, width: f32, height: f32) -> Self {
        Self {
            pan: Vec2::new(width, height) * 0.5,
            zoom: 1.0,
            viewport: Vec2::new(width, height),
            pan_speed: cfg.pan_speed,
            zoom_speed: cfg.zoom_speed,
            zoom_min: cfg.zoom_min,
        }
    }

    /// Apply one tick of raw input: held pan keys, then wheel events.
    ///
    /// Pan steps are divided by the current zoom so the perceived pan speed
    /// stays constant across zoom levels. Each wheel event multiplies the
    /// zoom by `(1 + zoom_speed)` (scroll up) or `(1 - zoom_speed)` (scroll
    /// down), clamping to `zoom_min` after every event.
    pub fn handle_input(&mut self, pan: PanInput, wheel_events: &[f32]) {
        let step = self.pan_speed / self.zoom;
        if pan.up {
            self.pan.y -= step;
        }
        if pan.down {
            self.pan.y += step;
        }
        if pan.left {
            self.pan.x -= step;
        }
        if pan.right {
            self.pan.x += step;
        }

        for delta in wheel_events {
            if *delta > 0.0 {
                self.zoom *= 1.0 + self.zoom_speed;
            } else {
                self.zoom *= 1.0 - self.zoom_speed;
            }
            self.zoom = self.zoom.max(self.zoom_min);
        }
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.pan) * self.zoom + self.viewport * 0.5
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.viewport * 0.5) / self.zoom + self.pan
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }
}
