//! Per-event mutable state.

use crate::rules::{Rule, RuleSet};

/// Number of cTau diagnostics published per rule and species slot.
pub const DIAGNOSTIC_CAPACITY: usize = 10;

/// Marker written for diagnostics with no corresponding particle.
pub const INVALID_VALUE: f64 = i32::MIN as f64;

/// Running weights and recorded cTau values for one event.
///
/// Shaped once from a [`RuleSet`] and reused across events via
/// [`reset`](Self::reset). Never shared between events in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct EventAccumulator {
    weights: Vec<f64>,
    /// `[rule][slot]` -> every accepted cTau, in collection order.
    ctaus: Vec<Vec<Vec<f64>>>,
    has_history: bool,
}

impl EventAccumulator {
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            weights: vec![1.0; rules.len()],
            ctaus: rules
                .iter()
                .map(|rule| vec![Vec::new(); rule.slots().len()])
                .collect(),
            has_history: false,
        }
    }

    /// Restores the neutral state: all weights 1.0, nothing recorded.
    pub fn reset(&mut self) {
        self.weights.iter_mut().for_each(|w| *w = 1.0);
        self.ctaus
            .iter_mut()
            .flatten()
            .for_each(|values| values.clear());
        self.has_history = false;
    }

    /// Marks that the event's generator history was available.
    pub fn set_has_history(&mut self) {
        self.has_history = true;
    }

    pub fn has_history(&self) -> bool {
        self.has_history
    }

    /// Current weight of rule `rule`.
    ///
    /// # Panics
    /// Panics if `rule` is not an index of the [`RuleSet`] this accumulator
    /// was shaped from.
    pub fn weight(&self, rule: usize) -> f64 {
        self.weights[rule]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Every cTau accepted for `(rule, slot)`, including those beyond
    /// [`DIAGNOSTIC_CAPACITY`].
    ///
    /// # Panics
    /// Panics if `rule` or `slot` is out of range for the shaping [`RuleSet`].
    pub fn ctaus(&self, rule: usize, slot: usize) -> &[f64] {
        &self.ctaus[rule][slot]
    }

    /// Appends an accepted cTau for `(rule, slot)`.
    ///
    /// # Panics
    /// Panics if `rule` or `slot` is out of range for the shaping [`RuleSet`].
    pub fn record(&mut self, rule: usize, slot: usize, ctau: f64) {
        self.ctaus[rule][slot].push(ctau);
    }

    /// Multiplies rule `index`'s weight by the density ratio of every cTau
    /// recorded for it, slot by slot.
    ///
    /// # Panics
    /// Panics if `index` is out of range for the shaping [`RuleSet`].
    pub fn apply(&mut self, index: usize, rule: &Rule) {
        let weight = &mut self.weights[index];
        for (slot, values) in rule.slots().iter().zip(&self.ctaus[index]) {
            for &ctau in values {
                *weight *= slot.weight_factor(ctau);
            }
        }
    }

    /// The fixed-size diagnostic row for `(rule, slot)`: recorded values
    /// first, then [`INVALID_VALUE`] padding.
    ///
    /// # Panics
    /// Panics if `rule` or `slot` is out of range for the shaping [`RuleSet`].
    pub fn diagnostics(&self, rule: usize, slot: usize) -> [f64; DIAGNOSTIC_CAPACITY] {
        let mut row = [INVALID_VALUE; DIAGNOSTIC_CAPACITY];
        for (dst, &src) in row.iter_mut().zip(&self.ctaus[rule][slot]) {
            *dst = src;
        }
        row
    }
}
