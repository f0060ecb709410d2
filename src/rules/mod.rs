//! Reweighting rules: configuration, validation and output-key naming.
//!
//! A rule maps a list of species to column-aligned source and destination
//! mean proper lifetimes (cTau, in cm). Each rule yields one event weight,
//! published under a name derived from its content:
//!
//! ```text
//! 1000024: 100cm -> 90cm                       lifetimeWeight_1000024_100cmTo90cm
//! 1000024: 100cm -> 0.5cm                      lifetimeWeight_1000024_100cmTo0p5cm
//! [1000024: 100 -> 70, 1000022: 30 -> 5]       lifetimeWeight_1000024_100cmTo70cm_1000022_30cmTo5cm
//! ```
//!
//! A [`RuleSet`] is built once, validated, and is read-only afterwards.

mod config;
mod naming;
mod ruleset;

pub use config::{ReweightConfig, RuleSpec};
pub use naming::{ctau_key, format_ctau, format_number, rule_suffix, DEFAULT_WEIGHT_KEY, WEIGHT_PREFIX};
pub use ruleset::{Rule, RuleSet, SpeciesSlot};
