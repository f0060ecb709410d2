//! Validated, named rules.

use super::config::RuleSpec;
use super::naming::{rule_suffix, WEIGHT_PREFIX};
use crate::error::Result;
use crate::lifetime::pdf_ratio;
use tracing::warn;

/// One species column of a rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesSlot {
    pub pdg_id: i32,
    pub src_ctau: f64,
    pub dst_ctau: f64,
}

impl SpeciesSlot {
    /// Sign-insensitive species match.
    pub fn matches(&self, pdg_id: i32) -> bool {
        self.pdg_id.unsigned_abs() == pdg_id.unsigned_abs()
    }

    /// Weight factor for one decay observed at `ctau`.
    pub fn weight_factor(&self, ctau: f64) -> f64 {
        pdf_ratio(ctau, self.src_ctau, self.dst_ctau)
    }
}

/// A validated rule with its canonical name.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    name: String,
    suffix: String,
    slots: Vec<SpeciesSlot>,
    is_default: bool,
}

impl Rule {
    /// Validates `spec` and derives the rule's name. `index` is the rule's
    /// position, used in error reports.
    pub fn from_spec(spec: &RuleSpec, index: usize) -> Result<Self> {
        spec.validate(index)?;

        let slots = spec
            .pdg_ids
            .iter()
            .zip(&spec.src_ctaus)
            .zip(&spec.dst_ctaus)
            .map(|((&pdg_id, &src_ctau), &dst_ctau)| SpeciesSlot {
                pdg_id,
                src_ctau,
                dst_ctau,
            })
            .collect();
        let suffix = rule_suffix(&spec.pdg_ids, &spec.src_ctaus, &spec.dst_ctaus);

        Ok(Self {
            name: format!("{WEIGHT_PREFIX}{suffix}"),
            suffix,
            slots,
            is_default: spec.is_default,
        })
    }

    /// Output key of this rule's weight, e.g. `lifetimeWeight_1000024_100cmTo90cm`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The per-species part of the name, e.g. `_1000024_100cmTo90cm`.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn slots(&self) -> &[SpeciesSlot] {
        &self.slots
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

/// The ordered, immutable collection of rules.
///
/// # Examples
///
/// ```
/// use ctau_reweight::rules::{RuleSet, RuleSpec};
///
/// let rules = RuleSet::new(&[
///     RuleSpec::single(1000024, 100.0, 90.0),
///     RuleSpec::single(1000024, 100.0, 0.5).with_default(true),
/// ])
/// .unwrap();
///
/// assert_eq!(
///     rules.names(),
///     vec![
///         "lifetimeWeight_1000024_100cmTo90cm",
///         "lifetimeWeight_1000024_100cmTo0p5cm",
///     ]
/// );
/// assert_eq!(rules.default_index(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    default_rule: Option<usize>,
}

impl RuleSet {
    /// Validates and names every rule.
    ///
    /// When several rules are flagged default, the last one wins.
    pub fn new(specs: &[RuleSpec]) -> Result<Self> {
        let rules = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Rule::from_spec(spec, i))
            .collect::<Result<Vec<_>>>()?;

        let defaults: Vec<usize> = rules
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_default)
            .map(|(i, _)| i)
            .collect();
        if defaults.len() > 1 {
            warn!(
                rules = ?defaults,
                "several reweighting rules are flagged default; the last one is used"
            );
        }

        Ok(Self {
            default_rule: defaults.last().copied(),
            rules,
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::name).collect()
    }

    /// Index of the rule published under the unqualified key, if any.
    pub fn default_index(&self) -> Option<usize> {
        self.default_rule
    }

    pub fn default_rule(&self) -> Option<&Rule> {
        self.default_rule.and_then(|i| self.rules.get(i))
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
