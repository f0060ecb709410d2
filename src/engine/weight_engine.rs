//! The lifetime reweighting engine.

use super::accumulator::{EventAccumulator, DIAGNOSTIC_CAPACITY};
use super::selection::SelectionPolicy;
use super::variables::{EventVariableProducer, EventVariables};
use crate::error::Result;
use crate::graph::DecayGraph;
use crate::lifetime::LifetimeCalculator;
use crate::rules::{ctau_key, ReweightConfig, RuleSet, DEFAULT_WEIGHT_KEY};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Computes one lifetime weight per rule for each event.
///
/// The engine itself is immutable; per-event state lives in an
/// [`EventAccumulator`].
///
/// # Examples
///
/// ```
/// use ctau_reweight::engine::WeightEngine;
/// use ctau_reweight::rules::{ReweightConfig, RuleSpec};
///
/// let config = ReweightConfig::default()
///     .with_rule(RuleSpec::single(1000024, 100.0, 90.0).with_default(true));
/// let engine = WeightEngine::new(&config).unwrap();
///
/// // No generator history: every weight is neutral.
/// let vars = engine.process(None);
/// assert_eq!(vars.get("lifetimeWeight_1000024_100cmTo90cm"), Some(1.0));
/// assert_eq!(vars.get("lifetimeWeight"), Some(1.0));
/// ```
#[derive(Debug, Clone)]
pub struct WeightEngine {
    rules: RuleSet,
    policy: SelectionPolicy,
}

impl WeightEngine {
    /// Validates `config` and builds the engine.
    pub fn new(config: &ReweightConfig) -> Result<Self> {
        let rules = RuleSet::new(&config.rules)?;
        let policy = SelectionPolicy::from_flag(config.require_last_not_first_copy);
        Ok(Self::from_rules(rules, policy))
    }

    pub fn from_rules(rules: RuleSet, policy: SelectionPolicy) -> Self {
        debug!(
            rules = rules.len(),
            names = ?rules.names(),
            policy = ?policy,
            "lifetime reweighting engine ready"
        );
        Self { rules, policy }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// A fresh accumulator shaped for this engine's rules.
    pub fn accumulator(&self) -> EventAccumulator {
        EventAccumulator::new(&self.rules)
    }

    /// Resets `acc` and fills it from `history`.
    ///
    /// With no history the accumulator is left reset (all weights 1.0).
    pub fn accumulate(&self, history: Option<&DecayGraph>, acc: &mut EventAccumulator) {
        acc.reset();

        let Some(graph) = history else {
            debug!("no generator history in event; lifetime weights left at 1.0");
            return;
        };
        acc.set_has_history();

        for (index, rule) in self.rules.iter().enumerate() {
            for particle in graph.iter() {
                if !self.policy.accepts(particle) {
                    continue;
                }

                let mut ctau = None;
                for (slot_index, slot) in rule.slots().iter().enumerate() {
                    if !slot.matches(particle.pdg_id()) {
                        continue;
                    }
                    let measured = *ctau.get_or_insert_with(|| LifetimeCalculator::ctau(particle));
                    match measured {
                        Some(value) if value > 0.0 => {
                            trace!(
                                rule = rule.name(),
                                pdg_id = particle.pdg_id(),
                                particle = particle.index(),
                                ctau = value,
                                "particle used for reweighting"
                            );
                            acc.record(index, slot_index, value);
                        }
                        _ => trace!(
                            rule = rule.name(),
                            particle = particle.index(),
                            "particle skipped: cTau not measurable"
                        ),
                    }
                }
            }

            acc.apply(index, rule);
        }
    }

    /// Writes the accumulated state.
    ///
    /// Diagnostics (`cTau_<|id|>_<i>`, ten per slot) are only written when
    /// the event had a history. Weights are written last, followed by the
    /// unqualified `lifetimeWeight` if a default rule exists.
    pub fn emit(&self, acc: &EventAccumulator, variables: &mut EventVariables) {
        if acc.has_history() {
            for (index, rule) in self.rules.iter().enumerate() {
                for (slot_index, slot) in rule.slots().iter().enumerate() {
                    let recorded = acc.ctaus(index, slot_index).len();
                    if recorded > DIAGNOSTIC_CAPACITY {
                        debug!(
                            rule = rule.name(),
                            pdg_id = slot.pdg_id,
                            recorded,
                            "more particles than diagnostic slots; extra cTau values not written"
                        );
                    }
                    for (i, value) in acc.diagnostics(index, slot_index).into_iter().enumerate() {
                        variables.set(ctau_key(slot.pdg_id, i), value);
                    }
                }
            }
        }

        for (index, rule) in self.rules.iter().enumerate() {
            variables.set(rule.name(), acc.weight(index));
        }
        if let Some(index) = self.rules.default_index() {
            variables.set(DEFAULT_WEIGHT_KEY, acc.weight(index));
        }
    }

    /// Processes one event. `history` is the event's generator history, or
    /// `None` when the event does not carry one.
    pub fn process(&self, history: Option<&DecayGraph>) -> EventVariables {
        let mut acc = self.accumulator();
        let mut variables = EventVariables::new();
        self.accumulate(history, &mut acc);
        self.emit(&acc, &mut variables);
        variables
    }

    /// Processes a batch of independent events, preserving order.
    #[cfg(feature = "parallel")]
    pub fn process_events(&self, events: &[Option<DecayGraph>]) -> Vec<EventVariables> {
        events
            .par_iter()
            .map(|event| self.process(event.as_ref()))
            .collect()
    }

    /// Processes a batch of independent events, preserving order.
    #[cfg(not(feature = "parallel"))]
    pub fn process_events(&self, events: &[Option<DecayGraph>]) -> Vec<EventVariables> {
        let mut acc = self.accumulator();
        events
            .iter()
            .map(|event| {
                let mut variables = EventVariables::new();
                self.accumulate(event.as_ref(), &mut acc);
                self.emit(&acc, &mut variables);
                variables
            })
            .collect()
    }
}

impl EventVariableProducer<Option<DecayGraph>> for WeightEngine {
    fn name(&self) -> &str {
        "LifetimeWeightProducer"
    }

    fn add_variables(&self, event: &Option<DecayGraph>, variables: &mut EventVariables) {
        let mut acc = self.accumulator();
        self.accumulate(event.as_ref(), &mut acc);
        self.emit(&acc, variables);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::INVALID_VALUE;
    use crate::graph::{GenParticle, StatusFlags};
    use crate::kinematics::{FourMomentum, Point3};
    use crate::rules::RuleSpec;

    const CHARGINO: i32 = 1000024;
    const NEUTRALINO: i32 = 1000022;

    /// A chargino with βγ = 1 flying `flight` cm along z before decaying.
    fn push_chargino(g: &mut DecayGraph, flight: f64, status: StatusFlags) -> usize {
        let c = g.push(
            GenParticle::new(
                CHARGINO,
                Point3::ORIGIN,
                FourMomentum::from_mass(100.0, 0.0, 0.0, 100.0),
            )
            .with_status(status),
        );
        g.push_daughter(
            c,
            GenParticle::new(
                NEUTRALINO,
                Point3::new(0.0, 0.0, flight),
                FourMomentum::from_mass(90.0, 0.0, 0.0, 10.0),
            )
            .with_status(StatusFlags::only_copy()),
        )
        .unwrap();
        c
    }

    fn engine(specs: Vec<RuleSpec>, require_last_not_first_copy: bool) -> WeightEngine {
        let mut config =
            ReweightConfig::default().with_require_last_not_first_copy(require_last_not_first_copy);
        config.rules = specs;
        WeightEngine::new(&config).unwrap()
    }

    fn expected_ratio(ctau: f64, src: f64, dst: f64) -> f64 {
        (src / dst) * (-ctau / dst + ctau / src).exp()
    }

    #[test]
    fn test_single_particle_weight() {
        let mut g = DecayGraph::new();
        push_chargino(&mut g, 50.0, StatusFlags::last_copy());
        let e = engine(vec![RuleSpec::single(CHARGINO, 100.0, 90.0)], true);

        let vars = e.process(Some(&g));
        let w = vars.get("lifetimeWeight_1000024_100cmTo90cm").unwrap();
        let expected = expected_ratio(50.0, 100.0, 90.0);
        assert!(((w - expected) / expected).abs() < 1e-9);
        assert!((vars.get("cTau_1000024_0").unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(vars.get("cTau_1000024_1"), Some(INVALID_VALUE));
        assert!(vars.get("lifetimeWeight").is_none());
    }

    #[test]
    fn test_neutralino_only_copy_is_not_counted() {
        // The neutralino is flagged first and last copy.
        let mut g = DecayGraph::new();
        push_chargino(&mut g, 50.0, StatusFlags::last_copy());
        let e = engine(vec![RuleSpec::single(NEUTRALINO, 10.0, 1.0)], true);

        let vars = e.process(Some(&g));
        assert_eq!(vars.get("lifetimeWeight_1000022_10cmTo1cm"), Some(1.0));
        assert_eq!(vars.get("cTau_1000022_0"), Some(INVALID_VALUE));
    }

    #[test]
    fn test_weight_uses_particles_beyond_capacity() {
        let mut g = DecayGraph::new();
        for i in 0..12 {
            push_chargino(&mut g, 1.0 + i as f64, StatusFlags::last_copy());
        }
        let e = engine(vec![RuleSpec::single(CHARGINO, 100.0, 50.0)], true);
        let vars = e.process(Some(&g));

        let expected: f64 = (0..12)
            .map(|i| expected_ratio(1.0 + i as f64, 100.0, 50.0))
            .product();
        let w = vars.get("lifetimeWeight_1000024_100cmTo50cm").unwrap();
        assert!(((w - expected) / expected).abs() < 1e-9);
        assert!(vars.contains("cTau_1000024_9"));
        assert!(!vars.contains("cTau_1000024_10"));
    }

    #[test]
    fn test_accumulator_reuse_does_not_leak() {
        let mut g = DecayGraph::new();
        push_chargino(&mut g, 50.0, StatusFlags::last_copy());
        let e = engine(vec![RuleSpec::single(CHARGINO, 100.0, 10.0)], true);

        let mut acc = e.accumulator();
        e.accumulate(Some(&g), &mut acc);
        assert!(acc.weight(0) != 1.0);

        e.accumulate(None, &mut acc);
        assert_eq!(acc.weight(0), 1.0);
        assert!(acc.ctaus(0, 0).is_empty());
        assert!(!acc.has_history());
    }

    #[test]
    fn test_emit_order_weights_last() {
        let mut g = DecayGraph::new();
        push_chargino(&mut g, 50.0, StatusFlags::last_copy());
        let e = engine(
            vec![RuleSpec::single(CHARGINO, 100.0, 90.0).with_default(true)],
            true,
        );
        let writes = e.process(Some(&g)).into_writes();
        assert_eq!(writes.len(), DIAGNOSTIC_CAPACITY + 2);
        assert_eq!(writes[DIAGNOSTIC_CAPACITY].0, "lifetimeWeight_1000024_100cmTo90cm");
        assert_eq!(writes[DIAGNOSTIC_CAPACITY + 1].0, "lifetimeWeight");
    }

    #[test]
    fn test_producer_trait_matches_process() {
        let mut g = DecayGraph::new();
        push_chargino(&mut g, 20.0, StatusFlags::last_copy());
        let e = engine(vec![RuleSpec::single(CHARGINO, 100.0, 90.0)], true);
        let event = Some(g);
        assert_eq!(e.produce(&event), e.process(event.as_ref()));
        assert_eq!(e.name(), "LifetimeWeightProducer");
    }

    #[test]
    fn test_process_events_matches_single() {
        let mut g = DecayGraph::new();
        push_chargino(&mut g, 20.0, StatusFlags::last_copy());
        let e = engine(vec![RuleSpec::single(CHARGINO, 100.0, 90.0)], true);

        let events = vec![Some(g.clone()), None, Some(g)];
        let batch = e.process_events(&events);
        assert_eq!(batch.len(), 3);
        for (event, vars) in events.iter().zip(&batch) {
            assert_eq!(vars, &e.process(event.as_ref()));
        }
        assert!(!batch[1].contains("cTau_1000024_0"));
    }
}
