use std::error::Error;

use clap::Parser;
use simple_logger::SimpleLogger;

use footprint::*;

const ABOUT: &str = r#"Calculates the yearly carbon footprint of a company from a JSON request
(`{"company": {...}, "activity": {...}}`) and writes `result.json` and `report.md` to
`{output}/{company}/{timestamp}/`.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// Path to the JSON request
    #[arg(short, long)]
    input: String,
    /// Optional CSV with emission factors replacing the Dutch defaults
    #[arg(long)]
    factors: Option<String>,
    /// The directory to write the result and report to
    #[arg(short, long, default_value = "reports")]
    output: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let cli = Cli::parse();

    let factors = match &cli.factors {
        Some(path) => load_emission_factors(path)?,
        None => EmissionFactors::default(),
    };

    let request: CalculationRequest = serde_json::from_slice(&std::fs::read(&cli.input)?)?;
    if request.activity.is_empty() {
        log::warn!("No activity entered for {}", request.company.name);
    }

    let result = request.calculate(&factors);
    for category in &result.breakdown {
        log::info!(
            "{}: {:.2} t CO2e ({:.1}%)",
            category.category.label(),
            category.tons,
            category.percentage
        );
    }
    log::info!(
        "Benchmark: {:.2} t CO2e in {} -> {} ({}th percentile)",
        result.benchmark.industry_average_tons,
        result.benchmark.industry,
        result.benchmark.ranking.label(),
        result.benchmark.percentile
    );
    for recommendation in &result.recommendations {
        log::info!(
            "Recommendation: {} (-{:.2} t CO2e, {})",
            recommendation.title,
            recommendation.co2_reduction_tons,
            report::format_eur(recommendation.cost_savings_eur)
        );
    }

    let rendered = report::render(&result)?;

    let disk = LocalDisk::new(&cli.output);
    let key = fs::store_calculation(&result, &rendered, &disk).await?;
    log::info!("Report written to {}/{key}/report.md", cli.output);

    Ok(())
}
