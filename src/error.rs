//! Error types for rule construction and decay-graph assembly.

use thiserror::Error;

/// Errors raised while building a [`RuleSet`](crate::rules::RuleSet) or a
/// [`DecayGraph`](crate::graph::DecayGraph).
///
/// Per-event processing never fails; only structural problems are reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReweightError {
    #[error(
        "rule {rule}: species and lifetime lists differ in length \
         (pdgIds={species}, srcCTaus={src}, dstCTaus={dst})"
    )]
    LengthMismatch {
        rule: usize,
        species: usize,
        src: usize,
        dst: usize,
    },

    #[error("rule {rule}, slot {slot}: lifetime must be finite and positive, got {value}")]
    InvalidLifetime { rule: usize, slot: usize, value: f64 },

    #[error("unknown particle index {0}")]
    UnknownParticle(usize),

    #[error("linking {daughter} under {mother} would create a cycle or a second mother")]
    CyclicLink { mother: usize, daughter: usize },

    #[error(
        "decay graph lists differ in length \
         (particles={particles}, mothers={mothers}, daughters={daughters})"
    )]
    InconsistentGraph {
        particles: usize,
        mothers: usize,
        daughters: usize,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ReweightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = ReweightError::LengthMismatch {
            rule: 2,
            species: 1,
            src: 2,
            dst: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("rule 2"));
        assert!(msg.contains("srcCTaus=2"));
    }

    #[test]
    fn test_unknown_particle_message() {
        assert_eq!(
            ReweightError::UnknownParticle(7).to_string(),
            "unknown particle index 7"
        );
    }
}
