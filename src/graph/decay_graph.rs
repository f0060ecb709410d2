//! Arena-backed decay graph and its borrowed node view.

use super::types::{GenParticle, StatusFlags};
use crate::error::{ReweightError, Result};
use crate::kinematics::{FourMomentum, Point3};
use std::fmt;

/// The generator history of one event.
///
/// # Examples
///
/// ```
/// use ctau_reweight::graph::{DecayGraph, GenParticle};
/// use ctau_reweight::kinematics::{FourMomentum, Point3};
///
/// let mut graph = DecayGraph::new();
/// let chargino = graph.push(GenParticle::new(
///     1000024,
///     Point3::ORIGIN,
///     FourMomentum::from_mass(100.0, 0.0, 0.0, 100.0),
/// ));
/// let pion = graph
///     .push_daughter(
///         chargino,
///         GenParticle::new(211, Point3::new(0.0, 0.0, 50.0), FourMomentum::default()),
///     )
///     .unwrap();
///
/// assert_eq!(graph.get(pion).unwrap().mother().unwrap().index(), chargino);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawDecayGraph")
)]
pub struct DecayGraph {
    particles: Vec<GenParticle>,
    mothers: Vec<Option<usize>>,
    daughters: Vec<Vec<usize>>,
}

impl DecayGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            particles: Vec::with_capacity(n),
            mothers: Vec::with_capacity(n),
            daughters: Vec::with_capacity(n),
        }
    }

    /// Appends an unlinked particle and returns its index.
    pub fn push(&mut self, particle: GenParticle) -> usize {
        self.particles.push(particle);
        self.mothers.push(None);
        self.daughters.push(Vec::new());
        self.particles.len() - 1
    }

    /// Appends `particle` as the next daughter of `mother`.
    pub fn push_daughter(&mut self, mother: usize, particle: GenParticle) -> Result<usize> {
        if mother >= self.particles.len() {
            return Err(ReweightError::UnknownParticle(mother));
        }
        let index = self.push(particle);
        self.mothers[index] = Some(mother);
        self.daughters[mother].push(index);
        Ok(index)
    }

    /// Links two existing particles. Daughters are visited in link order.
    ///
    /// Rejects a daughter that already has a mother, and any link that
    /// would close a loop.
    pub fn link(&mut self, mother: usize, daughter: usize) -> Result<()> {
        let n = self.particles.len();
        if mother >= n {
            return Err(ReweightError::UnknownParticle(mother));
        }
        if daughter >= n {
            return Err(ReweightError::UnknownParticle(daughter));
        }
        if self.mothers[daughter].is_some() {
            return Err(ReweightError::CyclicLink { mother, daughter });
        }

        let mut ancestor = Some(mother);
        while let Some(a) = ancestor {
            if a == daughter {
                return Err(ReweightError::CyclicLink { mother, daughter });
            }
            ancestor = self.mothers[a];
        }

        self.mothers[daughter] = Some(mother);
        self.daughters[mother].push(daughter);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particle(&self, index: usize) -> Option<&GenParticle> {
        self.particles.get(index)
    }

    /// Returns a traversal view of particle `index`.
    pub fn get(&self, index: usize) -> Option<ParticleRef<'_>> {
        (index < self.particles.len()).then_some(ParticleRef { graph: self, index })
    }

    /// All particles in collection order.
    pub fn iter(&self) -> impl Iterator<Item = ParticleRef<'_>> + '_ {
        (0..self.particles.len()).map(move |index| ParticleRef { graph: self, index })
    }
}

/// Unchecked wire form of a [`DecayGraph`]. Deserialized graphs are rebuilt
/// through [`DecayGraph::link`] so they carry the same guarantees as graphs
/// built in code.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDecayGraph {
    particles: Vec<GenParticle>,
    mothers: Vec<Option<usize>>,
    daughters: Vec<Vec<usize>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDecayGraph> for DecayGraph {
    type Error = ReweightError;

    fn try_from(raw: RawDecayGraph) -> Result<Self> {
        let (particles, mothers, daughters) =
            (raw.particles.len(), raw.mothers.len(), raw.daughters.len());
        if particles != mothers || particles != daughters {
            return Err(ReweightError::InconsistentGraph {
                particles,
                mothers,
                daughters,
            });
        }

        let mut graph = DecayGraph::with_capacity(particles);
        for particle in raw.particles {
            graph.push(particle);
        }
        for (mother, links) in raw.daughters.iter().enumerate() {
            for &daughter in links {
                graph.link(mother, daughter)?;
            }
        }

        // Mother links must agree with the daughter lists.
        if let Some(index) = (0..particles).find(|&i| graph.mothers[i] != raw.mothers[i]) {
            return Err(ReweightError::CyclicLink {
                mother: raw.mothers[index].unwrap_or(index),
                daughter: index,
            });
        }

        Ok(graph)
    }
}

/// A borrowed handle to one particle of a [`DecayGraph`].
#[derive(Clone, Copy)]
pub struct ParticleRef<'g> {
    graph: &'g DecayGraph,
    index: usize,
}

impl<'g> ParticleRef<'g> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn particle(&self) -> &'g GenParticle {
        &self.graph.particles[self.index]
    }

    pub fn pdg_id(&self) -> i32 {
        self.particle().pdg_id
    }

    pub fn vertex(&self) -> Point3 {
        self.particle().vertex
    }

    pub fn momentum(&self) -> FourMomentum {
        self.particle().momentum
    }

    pub fn status(&self) -> StatusFlags {
        self.particle().status
    }

    pub fn is_first_copy(&self) -> bool {
        self.particle().status.is_first_copy
    }

    pub fn is_last_copy(&self) -> bool {
        self.particle().status.is_last_copy
    }

    pub fn mother(&self) -> Option<ParticleRef<'g>> {
        self.graph.mothers[self.index].map(|index| ParticleRef {
            graph: self.graph,
            index,
        })
    }

    pub fn daughter_count(&self) -> usize {
        self.graph.daughters[self.index].len()
    }

    /// Daughters in recorded order.
    pub fn daughters(&self) -> impl DoubleEndedIterator<Item = ParticleRef<'g>> + 'g {
        let graph = self.graph;
        graph.daughters[self.index]
            .iter()
            .map(move |&index| ParticleRef { graph, index })
    }
}

impl fmt::Debug for ParticleRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticleRef")
            .field("index", &self.index)
            .field("pdg_id", &self.pdg_id())
            .field("mother", &self.graph.mothers[self.index])
            .field("daughters", &self.graph.daughters[self.index])
            .finish()
    }
}
