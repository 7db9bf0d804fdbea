//! DPMO calculator - defects per million opportunities and sigma level.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use super::errors::AnalysisError;
use crate::domain::foundation::ValidationError;
use crate::domain::report::{fmt2, Report, Table};

/// Long-term process shift added to the short-term z score.
pub const SIGMA_SHIFT: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DpmoInput {
    pub defects: u64,
    pub units: u64,
    pub opportunities: u64,
}

/// Interpretation band for a sigma level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigmaBand {
    OutOfRange,
    Critical,
    Deficient,
    Acceptable,
    Good,
    Excellent,
    SixSigma,
}

impl SigmaBand {
    pub fn classify(sigma: f64) -> Self {
        if sigma < 0.0 {
            SigmaBand::OutOfRange
        } else if sigma < 2.0 {
            SigmaBand::Critical
        } else if sigma < 3.0 {
            SigmaBand::Deficient
        } else if sigma < 4.0 {
            SigmaBand::Acceptable
        } else if sigma < 5.0 {
            SigmaBand::Good
        } else if sigma < 6.0 {
            SigmaBand::Excellent
        } else {
            SigmaBand::SixSigma
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SigmaBand::OutOfRange => "Sigma level out of range.",
            SigmaBand::Critical => "Critical level: the process needs urgent improvement.",
            SigmaBand::Deficient => "Deficient level: significant improvements are required.",
            SigmaBand::Acceptable => "Acceptable level: there is room for improvement.",
            SigmaBand::Good => "Good level: the process performs well.",
            SigmaBand::Excellent => "Excellent level: the process is highly capable.",
            SigmaBand::SixSigma => "Six Sigma level: world-class process.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpmoResult {
    pub input: DpmoInput,
    pub dpmo: f64,
    /// Fraction of opportunities without a defect, in `[0, 1]`.
    pub yield_fraction: f64,
    /// `+inf` when there are no defects.
    pub sigma: f64,
    pub band: SigmaBand,
}

/// Row of the reference sigma table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaReference {
    pub sigma: u8,
    pub dpmo: f64,
    pub yield_percent: f64,
}

pub const SIGMA_REFERENCE: [SigmaReference; 5] = [
    SigmaReference { sigma: 2, dpmo: 308_537.0, yield_percent: 69.2 },
    SigmaReference { sigma: 3, dpmo: 66_807.0, yield_percent: 93.3 },
    SigmaReference { sigma: 4, dpmo: 6_210.0, yield_percent: 99.38 },
    SigmaReference { sigma: 5, dpmo: 233.0, yield_percent: 99.977 },
    SigmaReference { sigma: 6, dpmo: 3.4, yield_percent: 99.9997 },
];

/// The textbook sigma / DPMO / yield correspondence.
pub fn reference_table() -> Table {
    let mut table = Table::new("Sigma reference", &["Sigma", "DPMO", "Yield (%)"]);
    for row in SIGMA_REFERENCE {
        table.push_row(vec![
            format!("{}σ", row.sigma),
            row.dpmo.to_string(),
            row.yield_percent.to_string(),
        ]);
    }
    table
}

pub struct DpmoCalculator;

impl DpmoCalculator {
    /// Computes DPMO, yield and sigma level.
    ///
    /// Units and opportunities must be positive and defects cannot exceed
    /// `units × opportunities`.
    pub fn calculate(input: DpmoInput) -> Result<DpmoResult, AnalysisError> {
        if input.units == 0 {
            return Err(ValidationError::out_of_range("units", 1, i64::MAX, 0).into());
        }
        if input.opportunities == 0 {
            return Err(ValidationError::out_of_range("opportunities", 1, i64::MAX, 0).into());
        }
        let total = input.units.checked_mul(input.opportunities).ok_or_else(|| {
            ValidationError::invalid_format("opportunities", "units × opportunities is too large")
        })?;
        if input.defects > total {
            return Err(ValidationError::invalid_format(
                "defects",
                format!(
                    "defects ({}) cannot exceed units × opportunities ({})",
                    input.defects, total
                ),
            )
            .into());
        }

        let dpmo = input.defects as f64 * 1_000_000.0 / total as f64;
        let yield_fraction = 1.0 - dpmo / 1_000_000.0;
        let sigma = sigma_level(yield_fraction)?;

        Ok(DpmoResult {
            input,
            dpmo,
            yield_fraction,
            sigma,
            band: SigmaBand::classify(sigma),
        })
    }
}

/// Inverse normal CDF of the yield plus the 1.5 shift.
pub fn sigma_level(yield_fraction: f64) -> Result<f64, AnalysisError> {
    if yield_fraction >= 1.0 {
        return Ok(f64::INFINITY);
    }
    if yield_fraction <= 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| AnalysisError::computation(e.to_string()))?;
    Ok(normal.inverse_cdf(yield_fraction) + SIGMA_SHIFT)
}

impl DpmoResult {
    pub fn results_table(&self) -> Table {
        let mut table = Table::new("DPMO results", &["Metric", "Value"]);
        for (metric, value) in [
            ("Defects", self.input.defects.to_string()),
            ("Units", self.input.units.to_string()),
            ("Opportunities per unit", self.input.opportunities.to_string()),
            ("DPMO", fmt2(self.dpmo)),
            ("Yield (%)", format!("{:.4}", self.yield_fraction * 100.0)),
            ("Sigma level", fmt2(self.sigma)),
        ] {
            table.push_row(vec![metric.to_string(), value]);
        }
        table
    }

    pub fn to_report(&self) -> Report {
        Report::new("DPMO calculator")
            .with_table(self.results_table())
            .with_table(reference_table())
            .with_interpretation([self.band.message()])
    }
}
