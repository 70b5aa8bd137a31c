use anyhow::{Context, Result};
use tabled::Tabled;

use gapscout_osm::NominatimClient;

use crate::cli::SearchArgs;
use crate::output::OutputWriter;

const USER_AGENT: &str = "gapscout-cli/0.1 (market-gap analyzer)";

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "Place")]
    place: String,
    #[tabled(rename = "Lat")]
    lat: f64,
    #[tabled(rename = "Lon")]
    lon: f64,
}

pub async fn execute(args: SearchArgs, output: &OutputWriter) -> Result<()> {
    let client = NominatimClient::public(USER_AGENT)
        .context("Failed to initialize Nominatim client")?;

    let suggestions = client
        .autocomplete(&args.query, args.country.as_deref())
        .await
        .context("Place search failed")?;

    if output.is_json() {
        return output.result(&suggestions);
    }

    if suggestions.is_empty() {
        output.error(format!("No places found for \"{}\"", args.query));
        return Ok(());
    }

    output.section("Places");
    let rows: Vec<SuggestionRow> = suggestions
        .into_iter()
        .map(|s| SuggestionRow { place: s.display_name, lat: s.lat, lon: s.lon })
        .collect();
    output.table(rows);

    Ok(())
}
