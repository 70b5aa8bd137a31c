use clap::{Parser, Subcommand};

/// GapScout - Market gap analysis for business locations
#[derive(Parser, Debug)]
#[command(name = "gapscout")]
#[command(about = "Market gap analysis for business locations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze market opportunity around a location
    Analyze(AnalyzeArgs),

    /// Search for a place by name
    Search(SearchArgs),

    /// List supported business types
    Types,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Latitude of the center point
    #[arg(long)]
    pub lat: f64,

    /// Longitude of the center point
    #[arg(long)]
    pub lon: f64,

    /// Business type to analyze (e.g. "Cafe", "Bar/Pub")
    #[arg(long, short = 'b')]
    pub business_type: String,

    /// Search radius in meters
    #[arg(long, short = 'r', default_value = "1000")]
    pub radius: f64,

    /// Show individual competitor locations
    #[arg(long)]
    pub competitors: bool,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Free-text place query
    pub query: String,

    /// Restrict results to an ISO country code (e.g. "th")
    #[arg(long)]
    pub country: Option<String>,
}
