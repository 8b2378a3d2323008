//! Minimal geometric value types shared across the workspace.
//!
//! Lengths are millimetres and times are seconds throughout Strata.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A point or displacement in detector space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    /// Lateral x coordinate.
    pub x: f64,
    /// Lateral y coordinate.
    pub y: f64,
    /// Longitudinal coordinate along the stack axis.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Vector along the stack axis only.
    pub const fn along_z(z: f64) -> Self {
        Self { x: 0.0, y: 0.0, z }
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Rotation of a placed volume about an axis through its centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    /// Rotation axis (need not be normalised).
    pub axis: Vec3,
    /// Rotation angle in radians.
    pub angle: f64,
}

impl Rotation {
    /// Rotation about the x axis.
    pub fn about_x(angle: f64) -> Self {
        Self {
            axis: Vec3::new(1.0, 0.0, 0.0),
            angle,
        }
    }
}

/// Transport limits attached to a logical volume.
///
/// Bounds the step length and the time a particle may be tracked inside
/// the volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepLimits {
    /// Maximum step length in millimetres.
    pub max_step: f64,
    /// Maximum tracking time in seconds.
    pub max_time: f64,
}

impl StepLimits {
    /// Step limits for a volume of the given depth: twenty steps per depth.
    pub fn for_depth(depth: f64, max_time: f64) -> Self {
        Self {
            max_step: depth / 20.0,
            max_time,
        }
    }
}
