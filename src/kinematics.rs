//! Minimal kinematic primitives read by the lifetime calculation.
//!
//! Only the quantities the reweighting needs are provided: positions,
//! displacement length, and the Lorentz factors of a 4-momentum.

use std::ops::Sub;

/// A point (or displacement) in 3D space, in cm.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm.
    pub fn r(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Lorentz 4-momentum `(E, px, py, pz)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourMomentum {
    pub e: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
}

impl FourMomentum {
    pub fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self { e, px, py, pz }
    }

    /// Builds an on-shell momentum from a mass and a 3-momentum.
    pub fn from_mass(mass: f64, px: f64, py: f64, pz: f64) -> Self {
        let e = (mass * mass + px * px + py * py + pz * pz).sqrt();
        Self { e, px, py, pz }
    }

    /// Magnitude of the 3-momentum.
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Invariant mass. Negative for space-like vectors (`-sqrt(-m²)`).
    pub fn mass(&self) -> f64 {
        let m2 = self.e * self.e - self.p() * self.p();
        if m2 >= 0.0 {
            m2.sqrt()
        } else {
            -(-m2).sqrt()
        }
    }

    /// Velocity `β = |p| / E`.
    pub fn beta(&self) -> f64 {
        self.p() / self.e
    }

    /// `γ = 1 / sqrt(1 - β²)`.
    pub fn gamma(&self) -> f64 {
        let b = self.beta();
        1.0 / (1.0 - b * b).sqrt()
    }

    /// The boost `βγ`. NaN or infinite for massless or unphysical vectors.
    pub fn beta_gamma(&self) -> f64 {
        self.beta() * self.gamma()
    }
}
