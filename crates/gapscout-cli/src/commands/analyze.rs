use anyhow::{Context, Result};
use console::style;
use tabled::Tabled;

use gapscout_core::config::EngineConfig;
use gapscout_core::models::{AnalysisRequest, AnalysisResult, BusinessType, Point};
use gapscout_core::scoring::{VERDICT_BALANCED, VERDICT_HIGH};
use gapscout_core::MarketAnalyzer;
use gapscout_osm::OverpassClient;

use crate::cli::AnalyzeArgs;
use crate::output::OutputWriter;

#[derive(Tabled)]
struct DemandRow {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Count")]
    count: u32,
}

#[derive(Tabled)]
struct CompetitorRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Lat")]
    lat: f64,
    #[tabled(rename = "Lon")]
    lon: f64,
}

pub async fn execute(args: AnalyzeArgs, output: &OutputWriter) -> Result<()> {
    let business_type: BusinessType =
        args.business_type.parse().context("Unknown business type (try `gapscout types`)")?;

    let config = EngineConfig::default().load_from_env();
    config.validate().context("Invalid configuration")?;

    let source = OverpassClient::public().context("Failed to initialize Overpass client")?;
    let analyzer = MarketAnalyzer::new(source, config);

    let request =
        AnalysisRequest::new(Point::new(args.lat, args.lon), args.radius, business_type);

    let result = analyzer.analyze(&request).await.context("Analysis failed")?;

    if output.is_json() {
        return output.result(&result);
    }

    output.section("Market Analysis");
    output.kv("Business type", business_type);
    output.kv("Center", format!("{:.4}, {:.4}", args.lat, args.lon));
    output.kv("Radius", format!("{} m", args.radius));

    output.section("Result");
    output.kv("Score", format!("{:.2} / 5.00", result.score));
    output.kv("Verdict", styled_verdict(&result));
    output.kv("Growth", result.growth_status);
    output.kv("Competitors", result.supply_count);
    output.kv("Demand signals", result.demand_count);
    output.kv("Under construction", result.construction_count);

    output.section("Demand Breakdown");
    output.table(vec![
        DemandRow { category: "Office", count: result.demand_breakdown.office },
        DemandRow { category: "Students", count: result.demand_breakdown.students },
        DemandRow { category: "Residential", count: result.demand_breakdown.residential },
        DemandRow { category: "Transport", count: result.demand_breakdown.transport },
    ]);

    if args.competitors {
        output.section("Competitors");
        let rows: Vec<CompetitorRow> = result
            .supply_points
            .iter()
            .map(|p| CompetitorRow { name: p.name.clone(), lat: p.lat, lon: p.lon })
            .collect();
        output.table(rows);
    }

    Ok(())
}

fn styled_verdict(result: &AnalysisResult) -> String {
    let styled = match result.verdict.as_str() {
        VERDICT_HIGH => style(&result.verdict).green().bold(),
        VERDICT_BALANCED => style(&result.verdict).yellow().bold(),
        _ => style(&result.verdict).red().bold(),
    };
    styled.to_string()
}
