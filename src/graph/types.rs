//! Particle records as stored in the generator history.

use crate::kinematics::{FourMomentum, Point3};

/// Generator-history copy flags.
///
/// A physical particle may be recorded several times while the generator
/// evolves the event. The first and last of those records carry these flags;
/// a single record can be both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusFlags {
    pub is_first_copy: bool,
    pub is_last_copy: bool,
}

impl StatusFlags {
    pub fn new(is_first_copy: bool, is_last_copy: bool) -> Self {
        Self {
            is_first_copy,
            is_last_copy,
        }
    }

    /// The only record of its particle (first and last copy at once).
    pub fn only_copy() -> Self {
        Self::new(true, true)
    }

    /// A later re-record, after the generator has finished with it.
    pub fn last_copy() -> Self {
        Self::new(false, true)
    }

    /// An intermediate record.
    pub fn intermediate() -> Self {
        Self::new(false, false)
    }
}

/// One recorded particle: species, production vertex and momentum.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenParticle {
    /// Signed species identifier (PDG code).
    pub pdg_id: i32,

    /// Production vertex, in cm.
    pub vertex: Point3,

    pub momentum: FourMomentum,

    pub status: StatusFlags,
}

impl GenParticle {
    pub fn new(pdg_id: i32, vertex: Point3, momentum: FourMomentum) -> Self {
        Self {
            pdg_id,
            vertex,
            momentum,
            status: StatusFlags::default(),
        }
    }

    pub fn with_status(mut self, status: StatusFlags) -> Self {
        self.status = status;
        self
    }
}
