//! Output-key naming.
//!
//! Keys must stay byte-for-byte stable across releases since downstream
//! histogramming refers to them by name. Numbers are rendered like a default
//! C++ output stream (`%g` with six significant digits).

/// Prefix of every per-rule weight key. Also the unqualified default key.
pub const WEIGHT_PREFIX: &str = "lifetimeWeight";

/// Key under which the default rule's weight is repeated.
pub const DEFAULT_WEIGHT_KEY: &str = WEIGHT_PREFIX;

const SIGNIFICANT_DIGITS: usize = 6;

/// Renders `value` in `%g` style: six significant digits, trailing zeros
/// removed, scientific notation outside `[1e-4, 1e6)`.
///
/// ```
/// use ctau_reweight::rules::format_number;
///
/// assert_eq!(format_number(100.0), "100");
/// assert_eq!(format_number(0.25), "0.25");
/// assert_eq!(format_number(1234567.0), "1.23457e+06");
/// ```
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Round to the significant digits first; the exponent of the rounded
    // value decides between fixed and scientific notation.
    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return value.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exp) as usize;
        strip_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Renders a destination lifetime.
///
/// Below 1 cm the value is written as `0p` followed by ten times the value,
/// so `0.5` becomes `0p5`. At or above 1 cm it is written plainly.
pub fn format_ctau(dst_ctau: f64) -> String {
    if dst_ctau < 1.0 {
        format!("0p{}", format_number(dst_ctau * 10.0))
    } else {
        format_number(dst_ctau)
    }
}

/// Builds the `_<id>_<src>cmTo<dst>cm` segments of a rule, one per slot.
pub fn rule_suffix(pdg_ids: &[i32], src_ctaus: &[f64], dst_ctaus: &[f64]) -> String {
    let mut suffix = String::new();
    for ((pdg_id, &src), &dst) in pdg_ids.iter().zip(src_ctaus).zip(dst_ctaus) {
        suffix.push_str(&format!(
            "_{}_{}cmTo{}cm",
            pdg_id,
            format_number(src),
            format_ctau(dst)
        ));
    }
    suffix
}

/// Diagnostic key for the `index`-th recorded cTau of a species.
pub fn ctau_key(pdg_id: i32, index: usize) -> String {
    format!("cTau_{}_{}", pdg_id.unsigned_abs(), index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integers() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(999999.0), "999999");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_number(1e6), "1e+06");
        assert_eq!(format_number(0.00001), "1e-05");
        assert_eq!(format_number(2.5e-7), "2.5e-07");
        // Rounding carries into the exponent.
        assert_eq!(format_number(999999.7), "1e+06");
    }

    #[test]
    fn test_format_negative_and_special() {
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_format_ctau_below_one() {
        assert_eq!(format_ctau(0.5), "0p5");
        assert_eq!(format_ctau(0.1), "0p1");
        assert_eq!(format_ctau(0.3), "0p3");
        // Not a uniform scheme: hundredths keep a decimal point.
        assert_eq!(format_ctau(0.05), "0p0.5");
    }

    #[test]
    fn test_format_ctau_at_or_above_one() {
        assert_eq!(format_ctau(1.0), "1");
        assert_eq!(format_ctau(2.0), "2");
        assert_eq!(format_ctau(90.0), "90");
        assert_eq!(format_ctau(1.5), "1.5");
    }

    #[test]
    fn test_rule_suffix_multi_species() {
        let suffix = rule_suffix(&[1000024, 1000022], &[100.0, 30.0], &[70.0, 5.0]);
        assert_eq!(suffix, "_1000024_100cmTo70cm_1000022_30cmTo5cm");
    }

    #[test]
    fn test_rule_suffix_keeps_sign() {
        assert_eq!(rule_suffix(&[-1000024], &[10.0], &[0.5]), "_-1000024_10cmTo0p5cm");
    }

    #[test]
    fn test_rule_suffix_repeated_species() {
        let suffix = rule_suffix(&[1000024, -1000024], &[100.0, 100.0], &[50.0, 20.0]);
        assert_eq!(suffix, "_1000024_100cmTo50cm_-1000024_100cmTo20cm");
    }

    #[test]
    fn test_ctau_key_uses_abs() {
        assert_eq!(ctau_key(-1000024, 3), "cTau_1000024_3");
        assert_eq!(ctau_key(1000022, 0), "cTau_1000022_0");
    }
}
