//! Generator-level decay history for one event.
//!
//! Particles live in an arena ([`DecayGraph`]); mother/daughter links are
//! plain indices into it, so traversal never owns or mutates the history.
//! [`ParticleRef`] is the borrowed view the lifetime and selection code walks.
//!
//! The graph is a forest: each particle has at most one mother, and the same
//! species may recur along a chain of daughters when the generator re-records
//! a particle (e.g. after radiation or a recoil boost).

mod decay_graph;
mod types;

pub use decay_graph::{DecayGraph, ParticleRef};
pub use types::{GenParticle, StatusFlags};
