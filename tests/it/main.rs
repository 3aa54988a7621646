use std::error::Error;

use footprint::*;
use time::macros::datetime;

fn abs_difference<T: std::ops::Sub<Output = T> + PartialOrd>(x: T, y: T) -> T {
    if x < y {
        y - x
    } else {
        x - y
    }
}

fn company(industry: Industry) -> CompanyProfile {
    CompanyProfile::new("Van Dijk Installatietechniek", industry, 25)
}

/// A deterministic spread of activity inputs, from empty to large.
fn inputs() -> Vec<ActivityInput> {
    (0..50u32)
        .map(|i| {
            let x = |k: u32| ((i * 37 + k * 101) % 97) as f64 * 1000.0 * (i % 5) as f64;
            let mut input = ActivityInput::default();
            input.energy.electricity_kwh = x(1);
            input.energy.gas_m3 = x(2) / 10.0;
            input.energy.heating_kwh = x(3);
            input.transport.fleet_km = x(4);
            input.transport.public_transport_km = x(5);
            input.transport.business_travel_km = x(6);
            input.waste.general_kg = x(7) / 10.0;
            input.waste.recycling_kg = x(8) / 10.0;
            input.water_m3 = x(9) / 100.0;
            input.materials.paper_kg = x(10) / 100.0;
            input.materials.plastic_kg = x(11) / 100.0;
            input.materials.metal_kg = x(12) / 100.0;
            input
        })
        .collect()
}

/// Σ quantity × factor over all activities, in tons
fn expected_total(input: &ActivityInput, factors: &EmissionFactors) -> f64 {
    ActivityType::ALL
        .iter()
        .map(|a| input.quantity(*a) * factors.kg_per_unit(*a))
        .sum::<f64>()
        / 1000.0
}

#[test]
fn totals_are_non_negative_and_add_up() {
    let factors = EmissionFactors::default();
    for input in inputs() {
        let expected = expected_total(&input, &factors);
        let result = calculate(company(Industry::Construction), input, &factors);

        assert!(result.total_tons >= 0.0);
        assert!(abs_difference(result.total_tons, expected) < 1e-9);

        let categories = result.breakdown.iter().map(|b| b.tons).sum::<f64>();
        assert!(abs_difference(categories, result.total_tons) < 1e-9);
        let scopes = result.scopes.iter().map(|s| s.tons).sum::<f64>();
        assert!(abs_difference(scopes, result.total_tons) < 1e-9);

        let percentages = result.breakdown.iter().map(|b| b.percentage).sum::<f64>();
        if result.total_tons > 0.0 {
            assert!(abs_difference(percentages, 100.0) < 1e-6);
        } else {
            assert_eq!(percentages, 0.0);
        }
        assert!(result.recommendations.len() <= MAX_RECOMMENDATIONS);
    }
}

#[test]
fn recycling_is_reduced_by_80_percent() {
    let factors = EmissionFactors::default();
    let waste_factor = factors
        .get(ActivityType::GeneralWaste)
        .map(|f| f.kg_co2e_per_unit)
        .unwrap();

    let mut input = ActivityInput::default();
    input.waste.recycling_kg = 1234.0;
    let result = calculate(company(Industry::Retail), input, &factors);

    let expected = 0.2 * 1234.0 * waste_factor / 1000.0;
    assert!(abs_difference(result.total_tons, expected) < 1e-12);
}

#[test]
fn zero_input_is_best_bucket() {
    let result = calculate(
        company(Industry::Manufacturing),
        ActivityInput::default(),
        &EmissionFactors::default(),
    );
    assert_eq!(result.total_tons, 0.0);
    assert_eq!(result.benchmark.percentile, 95);
    assert_eq!(result.benchmark.ranking, Ranking::Excellent);
}

#[test]
fn percentile_is_non_increasing_in_emissions() {
    let mut previous = u8::MAX;
    for kwh in (0..100).map(|i| i as f64 * 10_000.0) {
        let mut input = ActivityInput::default();
        input.energy.electricity_kwh = kwh;
        let result = calculate(company(Industry::Ict), input, &EmissionFactors::default());
        assert!(result.benchmark.percentile <= previous);
        previous = result.benchmark.percentile;
    }
    assert_eq!(previous, 15);
}

#[test]
fn unknown_industry_uses_other() -> Result<(), Box<dyn Error>> {
    let request: CalculationRequest = serde_json::from_str(
        r#"{"company": {"name": "X", "industry": "Ruimtevaart", "employees": 10}, "activity": {}}"#,
    )?;
    let result = request.calculate(&EmissionFactors::default());
    assert_eq!(result.benchmark.industry, Industry::Other);
    assert!(abs_difference(result.benchmark.industry_average_tons, 80.0) < 1e-9);
    Ok(())
}

#[test]
fn invalid_numbers_are_zero() -> Result<(), Box<dyn Error>> {
    let request: CalculationRequest = serde_json::from_str(
        r#"{
            "company": {"name": "X", "industry": "Bouw", "employees": "veel"},
            "activity": {
                "energy": {"electricity_kwh": "n.v.t.", "gas_m3": -100, "heating_kwh": null},
                "transport": {"fleet_km": "1000"},
                "water_m3": [1]
            }
        }"#,
    )?;
    assert_eq!(request.company.employees, 0);
    let result = request.calculate(&EmissionFactors::default());
    assert!(abs_difference(result.total_tons, 0.193) < 1e-12);

    let request: CalculationRequest = serde_json::from_str(
        r#"{
            "company": {"name": "X", "industry": 42, "employees": 3},
            "activity": {"energy": null, "transport": {"fleet_km": 1000}, "waste": null, "materials": null}
        }"#,
    )?;
    assert_eq!(request.company.industry, Industry::Other);
    let result = request.calculate(&EmissionFactors::default());
    assert!(abs_difference(result.total_tons, 0.193) < 1e-12);

    let request: CalculationRequest = serde_json::from_str(
        r#"{"company": {"name": "X", "industry": {"naam": "Bouw"}}, "activity": null}"#,
    )?;
    assert_eq!(request.company.industry, Industry::Other);
    assert!(request.activity.is_empty());
    Ok(())
}

#[test]
fn no_employees_has_no_benchmark() -> Result<(), Box<dyn Error>> {
    let mut input = ActivityInput::default();
    input.energy.electricity_kwh = 30_000.0;
    let result = calculate(
        CompanyProfile::new("X", Industry::Other, 0),
        input,
        &EmissionFactors::default(),
    );
    assert_eq!(result.benchmark.industry_average_tons, 0.0);
    assert_eq!(result.benchmark.ratio, f64::INFINITY);
    assert_eq!(result.benchmark.percentile, 15);
    assert_eq!(result.benchmark.ranking, Ranking::Poor);

    // the result can be stored and read back
    let read: CalculationResult = serde_json::from_str(&serde_json::to_string(&result)?)?;
    assert_eq!(read.benchmark.ratio, f64::INFINITY);
    assert!(report::render(&result)?.contains("15e percentiel"));

    let result = calculate(
        CompanyProfile::new("X", Industry::Other, 0),
        ActivityInput::default(),
        &EmissionFactors::default(),
    );
    assert_eq!(result.benchmark.percentile, 95);
    Ok(())
}

#[tokio::test]
async fn store_and_read() -> Result<(), Box<dyn Error>> {
    let root = std::env::temp_dir().join(format!("footprint-it-{}", std::process::id()));
    let disk = LocalDisk::new(&root);

    let mut input = ActivityInput::default();
    input.energy.gas_m3 = 4_000.0;
    let result = calculate_at(
        company(Industry::Healthcare),
        input,
        &EmissionFactors::default(),
        datetime!(2024-05-01 08:00 UTC),
    );
    let rendered = report::render(&result)?;

    let key = fs::store_calculation(&result, &rendered, &disk).await?;
    assert_eq!(key, "van-dijk-installatietechniek/1714550400000000000");
    assert!(root.join(&key).join("report.md").exists());

    let read = fs::read_calculation(&key, &disk).await?.unwrap();
    assert_eq!(read.company, result.company);
    assert_eq!(read.recommendations.len(), result.recommendations.len());

    assert!(fs::read_calculation("unknown/0", &disk).await?.is_none());

    std::fs::remove_dir_all(root)?;
    Ok(())
}

#[test]
fn factors_from_csv() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join(format!("footprint-factors-{}.csv", std::process::id()));
    let factors = EmissionFactors::default()
        .iter()
        .cloned()
        .map(|mut f| {
            f.kg_co2e_per_unit *= 2.0;
            f
        })
        .collect::<Vec<_>>();
    std::fs::write(&path, footprint::csv::serialize(factors.iter())?)?;

    let loaded = load_emission_factors(path.to_str().unwrap())?;
    assert!(abs_difference(loaded.kg_per_unit(ActivityType::Gas), 2.0 * 1.884) < 1e-12);

    std::fs::remove_file(path)?;
    Ok(())
}
