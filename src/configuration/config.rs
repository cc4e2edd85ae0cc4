//! Configuration types for loading sandbox settings from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! sandbox session. A settings file consists of:
//!
//! - [`WindowConfig`]      – viewport size and window title
//! - [`CameraConfig`]      – pan/zoom speeds and the minimum zoom clamp
//! - [`InteractionConfig`] – drag spring constants, query tolerance, box mass
//! - [`FloorConfig`]       – static floor geometry and friction
//! - [`ParametersConfig`]  – starting values for every live-tunable parameter
//! - [`SettingsConfig`]    – top-level wrapper used to load settings from YAML
//!
//! # YAML format
//! An example settings YAML matching these types:
//!
//! ```yaml
//! window:
//!   width: 1280.0
//!   height: 720.0
//!   title: "Box Sandbox"
//!
//! camera:
//!   pan_speed: 15.0         # screen pixels per tick at zoom 1
//!   zoom_speed: 0.1         # multiplicative step per wheel event
//!   zoom_min: 0.1           # lower clamp, keeps the transform invertible
//!
//! interaction:
//!   drag_stiffness: 6000.0  # spring constant pulling toward the cursor
//!   drag_damping: 200.0     # velocity damping of the drag spring
//!   query_tolerance: 2.0    # max distance for a point query hit, world units
//!   box_mass: 1.0           # mass of every spawned box
//!
//! floor:
//!   half_length: 5000.0
//!   thickness: 5.0
//!   friction: 1.0
//!
//! parameters:
//!   delta_time: 0.0166667   # fixed physics step, seconds
//!   iterations: 10          # solver iterations (integral)
//!   gravity: 981.0          # +y is down
//!   box_size_x: 50          # pixels (integral)
//!   box_size_y: 50          # pixels (integral)
//!   friction: 0.5
//!   velocity_x: 0.0
//!   velocity_y: 0.0
//!   restitution: 0.5
//! ```
//!
//! The sandbox maps this configuration into its runtime representation; every
//! parameter value is clamped to its declared range on the way in.

use serde::Deserialize;

/// Viewport dimensions and window title
#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
    pub width: f32,  // viewport width in logical pixels
    pub height: f32, // viewport height in logical pixels
    pub title: String,
}

/// Camera motion constants
#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
    pub pan_speed: f32,  // pan step per held key per tick, divided by zoom
    pub zoom_speed: f32, // zoom multiplies by (1 +/- zoom_speed) per wheel event
    pub zoom_min: f32,   // zoom never drops below this
}

/// Pointer interaction constants
#[derive(Deserialize, Debug, Clone)]
pub struct InteractionConfig {
    pub drag_stiffness: f32,  // spring constant of the drag force
    pub drag_damping: f32,    // damping constant of the drag force
    pub query_tolerance: f32, // point query hit distance, world units
    pub box_mass: f32,        // mass given to every spawned box
}

/// Static floor geometry
#[derive(Deserialize, Debug, Clone)]
pub struct FloorConfig {
    pub half_length: f32, // floor spans [-half_length, half_length] in x
    pub thickness: f32,   // capsule radius, also the drawn segment width
    pub friction: f32,
}

/// Starting values for the live-tunable parameters
/// Each field maps to one `Param` slot and is clamped to that slot's range
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub delta_time: f32,  // fixed physics step size in seconds
    pub iterations: f32,  // solver iteration count (integral)
    pub gravity: f32,     // downward gravity magnitude
    pub box_size_x: f32,  // new-box width in pixels (integral)
    pub box_size_y: f32,  // new-box height in pixels (integral)
    pub friction: f32,    // new-box friction coefficient
    pub velocity_x: f32,  // new-box initial x velocity
    pub velocity_y: f32,  // new-box initial y velocity
    pub restitution: f32, // new-box restitution
}

/// Top-level settings loaded from YAML
#[derive(Deserialize, Debug, Clone)]
pub struct SettingsConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub interaction: InteractionConfig,
    pub floor: FloorConfig,
    pub parameters: ParametersConfig,
}
