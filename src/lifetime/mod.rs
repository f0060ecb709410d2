//! Proper decay length measurement and the exponential lifetime model.
//!
//! - [`DecayChainWalker`] finds where a particle's decay chain ends.
//! - [`LifetimeCalculator`] converts the lab-frame flight distance into the
//!   proper decay length `cTau = L / (βγ)`.
//!
//! Proper decay lengths of an unstable species follow an exponential
//! distribution with mean `cTau₀`. Reweighting a decay observed at `cTau`
//! from a sample generated with mean `src` to a target mean `dst` multiplies
//! the event by `pdf(cTau; dst) / pdf(cTau; src)`.

mod calculator;
mod walker;

pub use calculator::LifetimeCalculator;
pub use walker::DecayChainWalker;

/// Exponential probability density `exp(-x / mean) / mean`.
pub fn exponential_pdf(x: f64, mean: f64) -> f64 {
    (-x / mean).exp() / mean
}

/// Ratio of destination to source density at `ctau`,
/// `exponential_pdf(ctau, dst) / exponential_pdf(ctau, src)`.
///
/// Evaluated as `(src / dst) * exp(ctau / src - ctau / dst)` so that large
/// `ctau` does not underflow both densities to zero. Exactly 1 when
/// `src_ctau == dst_ctau`.
pub fn pdf_ratio(ctau: f64, src_ctau: f64, dst_ctau: f64) -> f64 {
    (src_ctau / dst_ctau) * (ctau / src_ctau - ctau / dst_ctau).exp()
}
