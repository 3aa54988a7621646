use std::error::Error;

use num_format::{Locale, ToFormattedString};
use tinytemplate::TinyTemplate;

use crate::CalculationResult;

static TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/report_template.md"
));
static TEMPLATE_NAME: &str = "t";

#[derive(serde::Serialize)]
struct Row {
    label: String,
    tons: String,
    percentage: String,
}

#[derive(serde::Serialize)]
struct BenchmarkContext {
    average_per_employee: String,
    industry_average: String,
    percentile: u8,
    ranking: &'static str,
    source: String,
    date: String,
}

#[derive(serde::Serialize)]
struct RecommendationRow {
    position: usize,
    title: String,
    description: String,
    priority: &'static str,
    reduction: String,
    savings: String,
}

#[derive(serde::Serialize)]
struct InsightRow {
    title: String,
    message: String,
}

#[derive(serde::Serialize)]
struct Context {
    company: String,
    industry: &'static str,
    employees: String,
    date: String,
    total_tons: String,
    per_employee: String,
    breakdown: Vec<Row>,
    scopes: Vec<Row>,
    benchmark: BenchmarkContext,
    has_recommendations: bool,
    recommendations: Vec<RecommendationRow>,
    cost_savings: String,
    insights: Vec<InsightRow>,
}

/// Formats `value` with Dutch separators and `decimals` decimals, e.g. `12.345,6`
pub fn format_decimal(value: f64, decimals: u32) -> String {
    let scale = 10u64.pow(decimals);
    let scaled = (value.max(0.0) * scale as f64).round() as u64;
    let integer = (scaled / scale).to_formatted_string(&Locale::nl);
    if decimals == 0 {
        integer
    } else {
        format!(
            "{integer},{:0width$}",
            scaled % scale,
            width = decimals as usize
        )
    }
}

/// Formats an amount of EUR, e.g. `€ 1.250`
pub fn format_eur(value: f64) -> String {
    format!("€ {}", format_decimal(value, 0))
}

fn context(result: &CalculationResult) -> Result<Context, Box<dyn Error>> {
    let benchmark = &result.benchmark;
    Ok(Context {
        company: result.company.name.clone(),
        industry: result.company.industry.label(),
        employees: result.company.employees.to_formatted_string(&Locale::nl),
        date: result.calculated_at.date().format(time::macros::format_description!(
            "[day]-[month]-[year]"
        ))?,
        total_tons: format_decimal(result.total_tons, 1),
        per_employee: result
            .per_employee_tons()
            .map(|t| format_decimal(t, 1))
            .unwrap_or_else(|| "-".to_string()),
        breakdown: result
            .breakdown
            .iter()
            .map(|b| Row {
                label: b.category.label().to_string(),
                tons: format_decimal(b.tons, 1),
                percentage: format_decimal(b.percentage, 1),
            })
            .collect(),
        scopes: result
            .scopes
            .iter()
            .map(|s| Row {
                label: s.scope.label().to_string(),
                tons: format_decimal(s.tons, 1),
                percentage: String::new(),
            })
            .collect(),
        benchmark: BenchmarkContext {
            average_per_employee: format_decimal(benchmark.average_per_employee_tons.claim, 1),
            industry_average: format_decimal(benchmark.industry_average_tons, 1),
            percentile: benchmark.percentile,
            ranking: benchmark.ranking.label(),
            source: benchmark.average_per_employee_tons.source.clone(),
            date: benchmark.average_per_employee_tons.date.clone(),
        },
        has_recommendations: !result.recommendations.is_empty(),
        recommendations: result
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, r)| RecommendationRow {
                position: i + 1,
                title: r.title.clone(),
                description: r.description.clone(),
                priority: r.priority.label(),
                reduction: format_decimal(r.co2_reduction_tons, 1),
                savings: format_eur(r.cost_savings_eur),
            })
            .collect(),
        cost_savings: format_eur(result.cost_savings_eur),
        insights: result
            .insights
            .iter()
            .map(|i| InsightRow {
                title: i.title.clone(),
                message: i.message.clone(),
            })
            .collect(),
    })
}

/// Renders `result` as a markdown report.
pub fn render(result: &CalculationResult) -> Result<String, Box<dyn Error>> {
    let context = context(result)?;

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, TEMPLATE)?;

    Ok(tt.render(TEMPLATE_NAME, &context)?)
}
