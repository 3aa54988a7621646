use std::error::Error;

use clap::Parser;
use itertools::Itertools;
use simple_logger::SimpleLogger;

use footprint::{
    BlobStorageProvider, Category, EmissionFactors, Industry, LocalDisk, RECYCLING_MULTIPLIER,
};

const ABOUT: &str = r#"Exports the emission factors and industry benchmarks used in calculations
to `emission_factors.csv` and `industries.csv`, with their description at `description.md`.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// The directory to write to
    #[arg(short, long, default_value = ".")]
    output: String,
}

#[derive(serde::Serialize)]
struct IndustryRow {
    industry: &'static str,
    average_per_employee_tons: f64,
    source: String,
    date: String,
}

fn description() -> String {
    let categories = Category::ALL.iter().map(|c| c.label()).join(", ");
    let industries = Industry::ALL.iter().map(|i| format!("`{}`", i.label())).join(", ");
    format!(
        r#"# Emission factors and benchmarks

`emission_factors.csv` contains one row per activity with the columns
* `activity`: the activity (e.g. `electricity`)
* `unit`: the unit the activity is measured in
* `kg_co2e_per_unit`: kg of CO2e emitted per unit
* `source` and `date`: where the factor comes from and when it was retrieved

Activities are grouped in the categories {categories}.
Recycled waste uses the factor of `general_waste` times {RECYCLING_MULTIPLIER}.

`industries.csv` contains the average yearly emissions per employee, in tons of CO2e,
of the industries {industries}. Companies in unknown industries are compared against `Anders`.
"#
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let cli = Cli::parse();
    let disk = LocalDisk::new(&cli.output);

    let factors = EmissionFactors::default();
    disk.put("emission_factors.csv", footprint::csv::serialize(factors.iter())?)
        .await?;

    let industries = Industry::ALL.iter().map(|industry| {
        let average = industry.average_per_employee();
        IndustryRow {
            industry: industry.label(),
            average_per_employee_tons: average.claim,
            source: average.source,
            date: average.date,
        }
    });
    disk.put("industries.csv", footprint::csv::serialize(industries)?)
        .await?;

    disk.put("description.md", description().into_bytes()).await?;
    log::info!("Tables written to {}", cli.output);
    Ok(())
}
