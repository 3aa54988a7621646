//! Plain-language observations about a calculation.
//!
//! Insights are derived deterministically from the numbers of a calculation: the same
//! input always yields the same insights.
use serde::{Deserialize, Serialize};

use crate::report::format_decimal;
use crate::{Benchmark, CompanyProfile, Emissions, Ranking, Recommendation};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    LargestCategory,
    Benchmark,
    Intensity,
    Opportunity,
    Csrd,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
}

fn largest_category(emissions: &Emissions) -> Option<Insight> {
    let category = emissions.largest_category()?;
    Some(Insight {
        kind: InsightKind::LargestCategory,
        title: format!("{} is de grootste bron", category.label()),
        message: format!(
            "{} is goed voor {}% van de voetafdruk ({} ton CO2e). Hier hebben maatregelen het meeste effect.",
            category.label(),
            format_decimal(emissions.share(category) * 100.0, 0),
            format_decimal(emissions.category_kg(category) / 1000.0, 1),
        ),
    })
}

fn benchmark_position(benchmark: &Benchmark) -> Insight {
    let title = format!("{} in {}", benchmark.ranking.label(), benchmark.industry.label());
    if benchmark.industry_average_tons <= 0.0 {
        return Insight {
            kind: InsightKind::Benchmark,
            title,
            message: "Zonder medewerkers is er geen sectorgemiddelde om mee te vergelijken. Vul het aantal medewerkers in voor een benchmark.".to_string(),
        };
    }

    let difference = (benchmark.ratio - 1.0) * 100.0;
    let comparison = if difference.abs() < 0.5 {
        "gelijk aan".to_string()
    } else if difference < 0.0 {
        format!("{}% lager dan", format_decimal(-difference, 0))
    } else {
        format!("{}% hoger dan", format_decimal(difference, 0))
    };
    let advice = match benchmark.ranking {
        Ranking::Excellent | Ranking::Good => "Houd dit vast en deel de resultaten met klanten.",
        Ranking::Average => "Gerichte maatregelen brengen het bedrijf naar de top van de sector.",
        Ranking::BelowAverage | Ranking::Poor => "Ten opzichte van branchegenoten is er veel ruimte voor verbetering.",
    };
    Insight {
        kind: InsightKind::Benchmark,
        title,
        message: format!(
            "De uitstoot is {comparison} het sectorgemiddelde van {} ton CO2e; daarmee valt het bedrijf in het {}e percentiel. {advice}",
            format_decimal(benchmark.industry_average_tons, 1),
            benchmark.percentile,
        ),
    }
}

fn intensity(company: &CompanyProfile, total_tons: f64, benchmark: &Benchmark) -> Option<Insight> {
    (company.employees > 0).then(|| {
        let per_employee = total_tons / company.employees as f64;
        Insight {
            kind: InsightKind::Intensity,
            title: "Uitstoot per medewerker".to_string(),
            message: format!(
                "Per medewerker is de uitstoot {} ton CO2e per jaar, tegen {} ton in de sector.",
                format_decimal(per_employee, 1),
                format_decimal(benchmark.average_per_employee_tons.claim, 1)
            ),
        }
    })
}

fn opportunity(total_tons: f64, recommendations: &[Recommendation]) -> Option<Insight> {
    let top = recommendations.first()?;
    let reduction = recommendations
        .iter()
        .map(|r| r.co2_reduction_tons)
        .sum::<f64>();
    let share = if total_tons > 0.0 {
        reduction / total_tons * 100.0
    } else {
        0.0
    };
    Some(Insight {
        kind: InsightKind::Opportunity,
        title: format!("Begin met: {}", top.title),
        message: format!(
            "Samen voorkomen de aanbevolen maatregelen {} ton CO2e per jaar ({}% van de voetafdruk).",
            format_decimal(reduction, 1),
            format_decimal(share, 0)
        ),
    })
}

fn csrd(company: &CompanyProfile) -> Insight {
    let message = if company.csrd_applicable() {
        "Met minstens 250 medewerkers of 50 miljoen euro omzet valt het bedrijf onder de CSRD en moet het rapporteren over de uitstoot in scope 1, 2 en 3."
    } else {
        "Het bedrijf valt niet direct onder de CSRD, maar grotere klanten en banken vragen steeds vaker om uitstootgegevens uit hun keten."
    };
    Insight {
        kind: InsightKind::Csrd,
        title: "CSRD".to_string(),
        message: message.to_string(),
    }
}

/// Returns insights about a calculation, most relevant first.
pub fn insights(
    company: &CompanyProfile,
    emissions: &Emissions,
    benchmark: &Benchmark,
    recommendations: &[Recommendation],
) -> Vec<Insight> {
    let total_tons = emissions.total_kg() / 1000.0;
    [
        largest_category(emissions),
        Some(benchmark_position(benchmark)),
        intensity(company, total_tons, benchmark),
        opportunity(total_tons, recommendations),
        Some(csrd(company)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{emissions, ActivityInput, EmissionFactors, Industry};

    #[test]
    fn empty_input() {
        let company = CompanyProfile::new("Leeg BV", Industry::Ict, 0);
        let e = emissions(&ActivityInput::default(), &EmissionFactors::default());
        let b = crate::benchmark(company.industry, company.employees, 0.0);
        let kinds = insights(&company, &e, &b, &[])
            .into_iter()
            .map(|i| i.kind)
            .collect::<Vec<_>>();
        assert_eq!(kinds, vec![InsightKind::Benchmark, InsightKind::Csrd]);
    }

    #[test]
    fn no_employees() {
        let company = CompanyProfile::new("Eenmanszaak", Industry::Ict, 0);
        let mut input = ActivityInput::default();
        input.energy.electricity_kwh = 1_000.0;
        let e = emissions(&input, &EmissionFactors::default());
        let b = crate::benchmark(company.industry, company.employees, e.total_kg() / 1000.0);
        let benchmark = insights(&company, &e, &b, &[])
            .into_iter()
            .find(|i| i.kind == InsightKind::Benchmark)
            .unwrap();
        assert_eq!(benchmark.title, "Slecht in ICT");
        assert!(benchmark.message.starts_with("Zonder medewerkers"));
        assert!(!benchmark.message.contains("inf"));
    }

    #[test]
    fn deterministic() {
        let company = CompanyProfile::new("Jansen BV", Industry::Retail, 20);
        let mut input = ActivityInput::default();
        input.energy.gas_m3 = 10_000.0;
        let factors = EmissionFactors::default();
        let e = emissions(&input, &factors);
        let b = crate::benchmark(company.industry, company.employees, e.total_kg() / 1000.0);
        let r = crate::recommendations(&input, &e, &factors);
        let first = insights(&company, &e, &b, &r);
        assert_eq!(first, insights(&company, &e, &b, &r));
        assert_eq!(first.len(), 5);
        assert_eq!(first[0].title, "Energie is de grootste bron");
        assert!(first[1].message.contains("lager dan het sectorgemiddelde"));
    }
}
