//! Which particle records stand for a decaying particle.

use crate::graph::ParticleRef;

/// Picks one record per physical particle from the generator history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Only records flagged last copy and not first copy.
    ///
    /// The generator creates particles in the frame of the hard interaction
    /// and boosts them for recoil later, so only the last copy carries the
    /// final kinematics. A record that is both first and last copy is a decay
    /// product created after the boost (e.g. a neutralino from a chargino
    /// decay) whose ancestor is already counted.
    LastNotFirstCopy,

    /// Only the first record of each same-species chain: no mother, or a
    /// mother of a different species. For histories without copy flags.
    OriginalParticle,
}

impl SelectionPolicy {
    pub fn from_flag(require_last_not_first_copy: bool) -> Self {
        if require_last_not_first_copy {
            SelectionPolicy::LastNotFirstCopy
        } else {
            SelectionPolicy::OriginalParticle
        }
    }

    pub fn accepts(&self, particle: ParticleRef<'_>) -> bool {
        match self {
            SelectionPolicy::LastNotFirstCopy => {
                particle.is_last_copy() && !particle.is_first_copy()
            }
            SelectionPolicy::OriginalParticle => is_original_particle(particle),
        }
    }
}

/// True when `particle` starts its own same-species chain.
pub fn is_original_particle(particle: ParticleRef<'_>) -> bool {
    match particle.mother() {
        None => true,
        Some(mother) => mother.pdg_id() != particle.pdg_id(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DecayGraph, GenParticle, StatusFlags};
    use crate::kinematics::{FourMomentum, Point3};

    fn particle(pdg_id: i32, status: StatusFlags) -> GenParticle {
        GenParticle::new(pdg_id, Point3::ORIGIN, FourMomentum::default()).with_status(status)
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(SelectionPolicy::from_flag(true), SelectionPolicy::LastNotFirstCopy);
        assert_eq!(SelectionPolicy::from_flag(false), SelectionPolicy::OriginalParticle);
    }

    #[test]
    fn test_last_not_first_copy() {
        let mut g = DecayGraph::new();
        let first = g.push(particle(1000024, StatusFlags::new(true, false)));
        let mid = g.push_daughter(first, particle(1000024, StatusFlags::intermediate())).unwrap();
        let last = g.push_daughter(mid, particle(1000024, StatusFlags::last_copy())).unwrap();
        let both = g.push_daughter(last, particle(1000022, StatusFlags::only_copy())).unwrap();

        let policy = SelectionPolicy::LastNotFirstCopy;
        assert!(!policy.accepts(g.get(first).unwrap()));
        assert!(!policy.accepts(g.get(mid).unwrap()));
        assert!(policy.accepts(g.get(last).unwrap()));
        assert!(!policy.accepts(g.get(both).unwrap()));
    }

    #[test]
    fn test_original_particle() {
        let mut g = DecayGraph::new();
        let root = g.push(particle(1000024, StatusFlags::default()));
        let copy = g.push_daughter(root, particle(1000024, StatusFlags::default())).unwrap();
        let anti = g.push_daughter(copy, particle(-1000024, StatusFlags::default())).unwrap();
        let child = g.push_daughter(copy, particle(1000022, StatusFlags::default())).unwrap();

        let policy = SelectionPolicy::OriginalParticle;
        assert!(policy.accepts(g.get(root).unwrap()));
        assert!(!policy.accepts(g.get(copy).unwrap()));
        // Mother comparison is signed.
        assert!(policy.accepts(g.get(anti).unwrap()));
        assert!(policy.accepts(g.get(child).unwrap()));
    }
}
