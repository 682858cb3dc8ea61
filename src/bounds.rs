use crate::table::ConcordanceTable;
use log::warn;
use serde::{Deserialize, Serialize};

/// Lower and upper bounds on the true performance of the tested method.
///
/// A field holds `f64::NAN` when the corresponding quantity is not
/// available: all eight at once when the prevalence implied by the reference
/// parameters is infeasible, or a single predictive value when its inputs
/// leave the open unit interval.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BoundsResult {
    pub min_sensitivity: f64,
    pub max_sensitivity: f64,
    pub min_specificity: f64,
    pub max_specificity: f64,
    pub min_ppv: f64,
    pub max_ppv: f64,
    pub min_npv: f64,
    pub max_npv: f64,
}

impl BoundsResult {
    /// All-NA result, returned when the reference parameters are
    /// incompatible with the observed table.
    pub fn not_available() -> BoundsResult {
        BoundsResult {
            min_sensitivity: f64::NAN,
            max_sensitivity: f64::NAN,
            min_specificity: f64::NAN,
            max_specificity: f64::NAN,
            min_ppv: f64::NAN,
            max_ppv: f64::NAN,
            min_npv: f64::NAN,
            max_npv: f64::NAN,
        }
    }

    /// True when the sensitivity and specificity bounds were computed. The
    /// predictive values may still be NA individually.
    pub fn is_available(&self) -> bool {
        !self.min_sensitivity.is_nan()
            && !self.max_sensitivity.is_nan()
            && !self.min_specificity.is_nan()
            && !self.max_specificity.is_nan()
    }

    /// Flatten to [min_sens, max_sens, min_spec, max_spec, min_ppv, max_ppv,
    /// min_npv, max_npv], the order resampling drivers aggregate over.
    pub fn values(&self) -> [f64; 8] {
        [
            self.min_sensitivity,
            self.max_sensitivity,
            self.min_specificity,
            self.max_specificity,
            self.min_ppv,
            self.max_ppv,
            self.min_npv,
            self.max_npv,
        ]
    }
}

/// Computes closed-form bounds on the true sensitivity, specificity, PPV and
/// NPV of the tested method from its concordance table against an imperfect
/// reference method with known sensitivity `alpha_r` and specificity
/// `beta_r`.
///
/// # Arguments
///
/// * `table` - Concordance table of the tested method against the reference
/// * `alpha_r` - Sensitivity of the reference method against the gold standard
/// * `beta_r` - Specificity of the reference method against the gold standard
///
/// # Returns
///
/// A `BoundsResult`. When the prevalence implied by `alpha_r`/`beta_r` and
/// the observed table falls outside (0,1) the result is all-NA and a
/// diagnostic is logged; this is a defined outcome, not an error. Degenerate
/// tables (zero column or zero total) propagate NaN through the same path
/// rather than panicking.
pub fn compute_bounds(table: &ConcordanceTable, alpha_r: f64, beta_r: f64) -> BoundsResult {
    let ref_pos = table.reference_positive() as f64;
    let ref_neg = table.reference_negative() as f64;
    let total = table.total() as f64;

    // Apparent rates of the tested method, taking the reference outcome at
    // face value.
    let apparent_sens = table.n11 as f64 / ref_pos;
    let apparent_spec = table.n00 as f64 / ref_neg;
    let prevalence_r = ref_pos / total;

    // Prevalence implied by correcting the observed reference-positive rate
    // for the reference method's own error rates.
    let theta = (prevalence_r + beta_r - 1.0) / (alpha_r + beta_r - 1.0);
    if !(theta > 0.0 && theta < 1.0) {
        warn!(
            "implied prevalence {:.4} is outside (0,1): reference parameters ({}, {}) are incompatible with the observed table",
            theta, alpha_r, beta_r
        );
        return BoundsResult::not_available();
    }

    // Reference accuracy conditional on the true status.
    let psi_r = alpha_r * theta / prevalence_r;
    let eta_r = beta_r * (1.0 - theta) / (1.0 - prevalence_r);

    // Frechet bounds on the joint rates of (test positive, truly positive)
    // and (test negative, truly negative).
    let min_tau_pos = (psi_r + apparent_sens - 1.0).max(0.0);
    let max_tau_pos = psi_r.min(apparent_sens);
    let min_tau_neg = (eta_r + apparent_spec - 1.0).max(0.0);
    let max_tau_neg = eta_r.min(apparent_spec);

    // Weight the tau bounds across the reference-positive and
    // reference-negative strata, then renormalise by the true prevalence
    // (or its complement for specificity).
    let min_sensitivity = (min_tau_pos * prevalence_r
        + (1.0 - eta_r - apparent_spec + min_tau_neg) * (1.0 - prevalence_r))
        / theta;
    let max_sensitivity = (max_tau_pos * prevalence_r
        + (1.0 - eta_r - apparent_spec + max_tau_neg) * (1.0 - prevalence_r))
        / theta;
    let min_specificity = ((1.0 - psi_r - apparent_sens + min_tau_pos) * prevalence_r
        + min_tau_neg * (1.0 - prevalence_r))
        / (1.0 - theta);
    let max_specificity = ((1.0 - psi_r - apparent_sens + max_tau_pos) * prevalence_r
        + max_tau_neg * (1.0 - prevalence_r))
        / (1.0 - theta);

    // Predictive values by direct substitution of the extreme
    // (sensitivity, specificity) pairs; each helper call guards its own
    // inputs, so one of min/max may be NA while the other is finite.
    BoundsResult {
        min_sensitivity,
        max_sensitivity,
        min_specificity,
        max_specificity,
        min_ppv: predictive_positive(min_sensitivity, min_specificity, theta),
        max_ppv: predictive_positive(max_sensitivity, max_specificity, theta),
        min_npv: predictive_negative(min_sensitivity, min_specificity, theta),
        max_npv: predictive_negative(max_sensitivity, max_specificity, theta),
    }
}

/// Positive predictive value of a test with sensitivity `alpha` and
/// specificity `beta` at prevalence `theta`. NA unless all three arguments
/// lie strictly inside (0,1).
pub fn predictive_positive(alpha: f64, beta: f64, theta: f64) -> f64 {
    if !in_open_unit(alpha) || !in_open_unit(beta) || !in_open_unit(theta) {
        return f64::NAN;
    }
    alpha * theta / (alpha * theta + (1.0 - beta) * (1.0 - theta))
}

/// Negative predictive value of a test with sensitivity `alpha` and
/// specificity `beta` at prevalence `theta`. NA unless all three arguments
/// lie strictly inside (0,1).
pub fn predictive_negative(alpha: f64, beta: f64, theta: f64) -> f64 {
    if !in_open_unit(alpha) || !in_open_unit(beta) || !in_open_unit(theta) {
        return f64::NAN;
    }
    beta * (1.0 - theta) / ((1.0 - alpha) * theta + beta * (1.0 - theta))
}

fn in_open_unit(x: f64) -> bool {
    x > 0.0 && x < 1.0
}
