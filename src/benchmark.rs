use serde::{Deserialize, Serialize};

use crate::{Fact, Industry};

/// Upper bounds of the performance ratio (emissions / benchmark) and the percentile assigned
/// to ratios up to that bound. Ratios above the last bound get [`WORST_PERCENTILE`].
const PERCENTILE_STEPS: [(f64, u8); 6] = [
    (0.5, 95),
    (0.7, 85),
    (0.9, 70),
    (1.1, 50),
    (1.3, 35),
    (1.5, 25),
];
const WORST_PERCENTILE: u8 = 15;

/// How a company performs relative to its industry
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    Excellent,
    Good,
    Average,
    BelowAverage,
    Poor,
}

impl Ranking {
    pub fn from_percentile(percentile: u8) -> Self {
        match percentile {
            85.. => Ranking::Excellent,
            70..=84 => Ranking::Good,
            50..=69 => Ranking::Average,
            25..=49 => Ranking::BelowAverage,
            _ => Ranking::Poor,
        }
    }

    /// The Dutch label of the ranking
    pub fn label(&self) -> &'static str {
        match self {
            Ranking::Excellent => "Uitstekend",
            Ranking::Good => "Goed",
            Ranking::Average => "Gemiddeld",
            Ranking::BelowAverage => "Onder gemiddeld",
            Ranking::Poor => "Slecht",
        }
    }
}

/// Comparison of a company's emissions with the average of its industry
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Benchmark {
    pub industry: Industry,
    /// Average tons of CO2e per employee per year in the industry
    pub average_per_employee_tons: Fact<f64>,
    /// Expected tons of CO2e of a company of this size in the industry
    pub industry_average_tons: f64,
    /// Emissions divided by [`Benchmark::industry_average_tons`]; infinite when a company
    /// without employees has emissions. Stored as `null` in that case.
    #[serde(with = "crate::serde::unbounded")]
    pub ratio: f64,
    pub percentile: u8,
    pub ranking: Ranking,
}

/// Returns the percentile of a performance ratio. Lower ratios are better;
/// the result is non-increasing in `ratio`.
pub fn percentile(ratio: f64) -> u8 {
    PERCENTILE_STEPS
        .iter()
        .find(|(bound, _)| ratio <= *bound)
        .map(|(_, percentile)| *percentile)
        .unwrap_or(WORST_PERCENTILE)
}

/// Emissions relative to the benchmark. Without a benchmark, no emissions is the best ratio
/// and any emissions the worst.
fn ratio(total_tons: f64, industry_average_tons: f64) -> f64 {
    if industry_average_tons > 0.0 {
        total_tons / industry_average_tons
    } else if total_tons > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Compares `total_tons` of a company with `employees` against its `industry`.
pub fn benchmark(industry: Industry, employees: u32, total_tons: f64) -> Benchmark {
    let average_per_employee_tons = industry.average_per_employee();
    let industry_average_tons = average_per_employee_tons.claim * employees as f64;
    let ratio = ratio(total_tons, industry_average_tons);
    let percentile = percentile(ratio);

    Benchmark {
        industry,
        average_per_employee_tons,
        industry_average_tons,
        ratio,
        percentile,
        ranking: Ranking::from_percentile(percentile),
    }
}
