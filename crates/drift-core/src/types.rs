//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// 2D velocity in world units per second (arcade) or per frame (path steering).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Flat RGB colour, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Frames simulated so far (increments by 1 each active tick).
    pub frame: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f32 {
        self.to_vec2().distance(other.to_vec2())
    }

    /// Step `max_step` units toward `target`. Returns `true` when the target
    /// was reached (the position snaps onto it).
    pub fn step_toward(&mut self, target: Position, max_step: f32) -> bool {
        let delta = target.to_vec2() - self.to_vec2();
        let dist = delta.length();
        if dist <= max_step {
            *self = target;
            return true;
        }
        let next = self.to_vec2() + delta / dist * max_step;
        *self = next.into();
        false
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `angle` radians scaled by `speed`.
    pub fn from_angle(angle: f32, speed: f32) -> Self {
        Self::new(angle.cos() * speed, angle.sin() * speed)
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f32 {
        self.to_vec2().length()
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Clamp the magnitude to `max_speed`, keeping direction.
    pub fn clamped(self, max_speed: f32) -> Self {
        self.to_vec2().clamp_length_max(max_speed).into()
    }
}

impl From<Vec2> for Velocity {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: f32) -> Self {
        Self::new(level, level, level)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.frame += 1;
        self.elapsed_secs += dt;
    }
}

/// Circle-vs-circle overlap: `distance(a, b) < radius_a + radius_b`.
pub fn check_collision(a: &Position, radius_a: f32, b: &Position, radius_b: f32) -> bool {
    a.distance_to(b) < radius_a + radius_b
}
