use serde::{Deserialize, Serialize};

use crate::{
    benchmark, emissions, insights, recommendations, ActivityInput, Benchmark, CategoryBreakdown,
    CompanyProfile, EmissionFactors, Insight, Recommendation, ScopeBreakdown,
};

/// A request to calculate the footprint of a company, as submitted by the form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub company: CompanyProfile,
    #[serde(default, deserialize_with = "crate::serde::group")]
    pub activity: ActivityInput,
}

/// The footprint of a company over one year
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalculationResult {
    pub company: CompanyProfile,
    pub activity: ActivityInput,
    /// Total emissions in tons of CO2e
    pub total_tons: f64,
    /// Emissions per category, in the order of [`crate::Category::ALL`]
    pub breakdown: Vec<CategoryBreakdown>,
    pub scopes: Vec<ScopeBreakdown>,
    pub benchmark: Benchmark,
    pub recommendations: Vec<Recommendation>,
    /// Sum of the savings of all recommendations, in EUR per year
    pub cost_savings_eur: f64,
    pub insights: Vec<Insight>,
    #[serde(with = "time::serde::rfc3339")]
    pub calculated_at: time::OffsetDateTime,
}

/// Calculates the footprint of `company` given its yearly `activity`.
pub fn calculate(
    company: CompanyProfile,
    activity: ActivityInput,
    factors: &EmissionFactors,
) -> CalculationResult {
    calculate_at(company, activity, factors, time::OffsetDateTime::now_utc())
}

/// Same as [`calculate`], with an explicit time of calculation.
pub fn calculate_at(
    company: CompanyProfile,
    activity: ActivityInput,
    factors: &EmissionFactors,
    calculated_at: time::OffsetDateTime,
) -> CalculationResult {
    let emissions = emissions(&activity, factors);
    let total_tons = emissions.total_kg() / 1000.0;

    let benchmark = benchmark(company.industry, company.employees, total_tons);
    let recommendations = recommendations(&activity, &emissions, factors);
    let cost_savings_eur = recommendations.iter().map(|r| r.cost_savings_eur).sum();
    let insights = insights(&company, &emissions, &benchmark, &recommendations);

    log::info!(
        "{} ({}): {total_tons:.2} t CO2e, percentile {}",
        company.name,
        company.industry,
        benchmark.percentile
    );

    CalculationResult {
        total_tons,
        breakdown: emissions.breakdown(),
        scopes: emissions.scopes(),
        benchmark,
        recommendations,
        cost_savings_eur,
        insights,
        calculated_at,
        company,
        activity,
    }
}

impl CalculationRequest {
    pub fn calculate(self, factors: &EmissionFactors) -> CalculationResult {
        calculate(self.company, self.activity, factors)
    }
}

impl CalculationResult {
    /// Tons of CO2e per employee; `None` when the number of employees is unknown
    pub fn per_employee_tons(&self) -> Option<f64> {
        (self.company.employees > 0).then(|| self.total_tons / self.company.employees as f64)
    }
}
