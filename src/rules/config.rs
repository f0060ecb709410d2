//! Rule and engine configuration.

use crate::error::{ReweightError, Result};

/// One user-supplied reweighting rule, before validation.
///
/// `pdg_ids`, `src_ctaus` and `dst_ctaus` are column-aligned: slot `i`
/// reweights species `pdg_ids[i]` from `src_ctaus[i]` to `dst_ctaus[i]`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSpec {
    /// Species identifiers. Matching ignores the sign.
    #[cfg_attr(feature = "serde", serde(rename = "pdgIds"))]
    pub pdg_ids: Vec<i32>,

    /// Lifetimes the sample was generated with, in cm.
    #[cfg_attr(feature = "serde", serde(rename = "srcCTaus"))]
    pub src_ctaus: Vec<f64>,

    /// Lifetimes to reweight to, in cm.
    #[cfg_attr(feature = "serde", serde(rename = "dstCTaus"))]
    pub dst_ctaus: Vec<f64>,

    /// Also publish this rule's weight under the unqualified key.
    #[cfg_attr(feature = "serde", serde(rename = "isDefaultRule", default))]
    pub is_default: bool,
}

impl RuleSpec {
    /// A rule over a single species.
    pub fn single(pdg_id: i32, src_ctau: f64, dst_ctau: f64) -> Self {
        Self {
            pdg_ids: vec![pdg_id],
            src_ctaus: vec![src_ctau],
            dst_ctaus: vec![dst_ctau],
            is_default: false,
        }
    }

    /// Appends another species slot.
    pub fn with_species(mut self, pdg_id: i32, src_ctau: f64, dst_ctau: f64) -> Self {
        self.pdg_ids.push(pdg_id);
        self.src_ctaus.push(src_ctau);
        self.dst_ctaus.push(dst_ctau);
        self
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Checks list lengths and lifetime values. `rule` is only used for
    /// error reporting.
    pub fn validate(&self, rule: usize) -> Result<()> {
        let (species, src, dst) = (
            self.pdg_ids.len(),
            self.src_ctaus.len(),
            self.dst_ctaus.len(),
        );
        if species != src || species != dst {
            return Err(ReweightError::LengthMismatch {
                rule,
                species,
                src,
                dst,
            });
        }
        for (slot, &value) in self.src_ctaus.iter().chain(&self.dst_ctaus).enumerate() {
            if !(value.is_finite() && value > 0.0) {
                return Err(ReweightError::InvalidLifetime {
                    rule,
                    slot: slot % species,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Configuration for the [`WeightEngine`](crate::engine::WeightEngine).
///
/// # Examples
///
/// ```
/// use ctau_reweight::rules::{ReweightConfig, RuleSpec};
///
/// let config = ReweightConfig::default()
///     .with_rule(RuleSpec::single(1000024, 100.0, 90.0).with_default(true))
///     .with_rule(RuleSpec::single(1000024, 100.0, 0.5))
///     .with_require_last_not_first_copy(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReweightConfig {
    /// Rules in output order.
    #[cfg_attr(feature = "serde", serde(rename = "reweightingRules"))]
    pub rules: Vec<RuleSpec>,

    /// Selects particles by generator copy flags (last copy, not first copy)
    /// instead of by "first of its same-species chain".
    #[cfg_attr(feature = "serde", serde(rename = "requireLastNotFirstCopy"))]
    pub require_last_not_first_copy: bool,
}

impl Default for ReweightConfig {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            require_last_not_first_copy: true,
        }
    }
}

impl ReweightConfig {
    pub fn with_rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_require_last_not_first_copy(mut self, require: bool) -> Self {
        self.require_last_not_first_copy = require;
        self
    }

    /// Validates every rule.
    pub fn validate(&self) -> Result<()> {
        self.rules
            .iter()
            .enumerate()
            .try_for_each(|(i, rule)| rule.validate(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReweightConfig::default();
        assert!(config.rules.is_empty());
        assert!(config.require_last_not_first_copy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_length_mismatch() {
        let mut rule = RuleSpec::single(1000024, 100.0, 90.0);
        rule.src_ctaus.push(10.0);
        let config = ReweightConfig::default()
            .with_rule(RuleSpec::single(1000022, 1.0, 2.0))
            .with_rule(rule);
        assert_eq!(
            config.validate(),
            Err(ReweightError::LengthMismatch {
                rule: 1,
                species: 1,
                src: 2,
                dst: 1
            })
        );
    }

    #[test]
    fn test_validate_bad_lifetime() {
        let rule = RuleSpec::single(1000024, 100.0, 90.0).with_species(1000022, 10.0, 0.0);
        match rule.validate(0) {
            Err(ReweightError::InvalidLifetime { slot, value, .. }) => {
                assert_eq!(slot, 1);
                assert_eq!(value, 0.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_validate_nan_lifetime() {
        let rule = RuleSpec::single(1000024, f64::NAN, 90.0);
        assert!(rule.validate(0).is_err());
    }

    #[test]
    fn test_empty_rule_is_valid() {
        assert!(RuleSpec::default().validate(0).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_original_parameter_names() {
        let json = r#"{
            "reweightingRules": [
                {"pdgIds": [1000024], "srcCTaus": [100.0], "dstCTaus": [90.0], "isDefaultRule": true},
                {"pdgIds": [1000024, 1000022], "srcCTaus": [100.0, 30.0], "dstCTaus": [70.0, 5.0]}
            ],
            "requireLastNotFirstCopy": false
        }"#;
        let config: ReweightConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.rules.len(), 2);
        assert!(config.rules[0].is_default);
        assert!(!config.rules[1].is_default);
        assert!(!config.require_last_not_first_copy);
        assert!(config.validate().is_ok());
    }
}
