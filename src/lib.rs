//! Event-level proper-lifetime reweighting for simulated samples.
//!
//! A sample generated with one mean proper decay length (cTau) for some
//! long-lived species can be made to represent a different cTau without
//! re-running the simulation: each event is weighted by the ratio of
//! exponential decay densities evaluated at the cTau each particle actually
//! had, measured from the recorded decay chain.
//!
//! - **Rules** ([`rules`]): user-defined species → (source, destination)
//!   cTau mappings, validated once and named deterministically.
//! - **Decay history** ([`graph`]): the per-event generator record, an arena
//!   of particles with mother/daughter links.
//! - **Lifetime** ([`lifetime`]): decay-chain end-point resolution and the
//!   `L / βγ` proper decay length.
//! - **Engine** ([`engine`]): particle selection, weight accumulation and
//!   the fixed-shape output of weights and cTau diagnostics.
//!
//! # Example
//!
//! ```
//! use ctau_reweight::engine::WeightEngine;
//! use ctau_reweight::graph::{DecayGraph, GenParticle, StatusFlags};
//! use ctau_reweight::kinematics::{FourMomentum, Point3};
//! use ctau_reweight::rules::{ReweightConfig, RuleSpec};
//!
//! let config = ReweightConfig::default()
//!     .with_rule(RuleSpec::single(1000024, 100.0, 90.0).with_default(true));
//! let engine = WeightEngine::new(&config).unwrap();
//!
//! // A chargino with βγ = 0.5 that decays 25 cm away: cTau = 50 cm.
//! let mut history = DecayGraph::new();
//! let chargino = history.push(
//!     GenParticle::new(1000024, Point3::ORIGIN, FourMomentum::from_mass(100.0, 0.0, 0.0, 50.0))
//!         .with_status(StatusFlags::last_copy()),
//! );
//! history
//!     .push_daughter(
//!         chargino,
//!         GenParticle::new(1000022, Point3::new(0.0, 0.0, 25.0), FourMomentum::default()),
//!     )
//!     .unwrap();
//!
//! let vars = engine.process(Some(&history));
//! let expected = (100.0_f64 / 90.0) * (-50.0_f64 / 90.0 + 50.0 / 100.0).exp();
//! assert!((vars.get("lifetimeWeight").unwrap() - expected).abs() < 1e-9);
//! ```

pub mod engine;
pub mod error;
pub mod graph;
pub mod kinematics;
pub mod lifetime;
pub mod rules;

pub use error::{ReweightError, Result};
