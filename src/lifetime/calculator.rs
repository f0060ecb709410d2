//! Proper decay length of a single particle.

use super::walker::DecayChainWalker;
use crate::graph::ParticleRef;

/// Computes `cTau = |final_position - vertex| / (βγ)`.
pub struct LifetimeCalculator;

impl LifetimeCalculator {
    /// Proper decay length of `node` in cm.
    ///
    /// Returns `None` when the boost is not usable (`βγ` not finite or not
    /// positive: particles at rest, massless or unphysical momenta). A
    /// particle whose chain never leaves its production vertex yields
    /// `Some(0.0)`; callers decide whether that counts.
    pub fn ctau(node: ParticleRef<'_>) -> Option<f64> {
        let beta_gamma = node.momentum().beta_gamma();
        if !(beta_gamma.is_finite() && beta_gamma > 0.0) {
            return None;
        }
        let boost = 1.0 / beta_gamma;

        let end = DecayChainWalker::final_position(node, node.pdg_id());
        Some((end - node.vertex()).r() * boost)
    }
}
