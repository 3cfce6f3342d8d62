use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "irrigation-advisor",
    version,
    about = "Irrigation demand and scheduling from historical climate"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup
    Init,
    /// Validate config and test the analysis service connection
    Check,
    /// Whole-cycle irrigation deficit split at a soil-based interval
    Simple(FieldArgs),
    /// Per-event net/gross depths and watering interval
    Plan(FieldArgs),
    /// Both models plus aridity classification
    Advise(FieldArgs),
    /// Pull form answers and climate from the analysis service, then advise
    Fetch,
    /// Follow a running climate analysis until it completes (Ctrl-C cancels)
    Watch {
        /// Analysis job identifier
        #[arg(short, long)]
        job: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FieldArgs {
    /// Crop (e.g. bean, milho, soja)
    #[arg(long)]
    pub crop: String,

    /// Cycle duration range in days, as min_max
    #[arg(long)]
    pub cycle: Option<String>,

    /// Soil texture (e.g. sandy, arenoso, clay loam)
    #[arg(long)]
    pub soil: Option<String>,

    /// Irrigation system (fixed-sprinkler, center-pivot, drip)
    #[arg(long)]
    pub system: Option<String>,

    /// Climate JSON file: yearly series or the analysis chart payload
    #[arg(long, conflicts_with_all = ["et", "precip"])]
    pub climate: Option<PathBuf>,

    /// Yearly reference ET values (mm/year)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub et: Vec<f64>,

    /// Yearly precipitation values (mm/year)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub precip: Vec<f64>,
}
