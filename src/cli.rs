use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ward-aqi", version, about = "Ward-wise AQI dashboard")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Config file (default: ~/.config/ward-aqi/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Ward catalog CSV (ward_no,ward_name,zone)")]
    pub wards: Option<PathBuf>,
    #[arg(long, global = true, help = "Rolling history CSV (ward_no,day1..day5)")]
    pub history: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or repair the history store for every catalog ward
    Init,
    /// List zones in catalog order
    Zones,
    /// List wards, optionally within one zone
    Wards {
        #[arg(long)]
        zone: Option<String>,
    },
    /// Fetch the live AQI and record it for a ward
    Fetch {
        #[command(flatten)]
        ward: WardArgs,
    },
    /// Record a manually observed AQI for a ward
    Record {
        #[command(flatten)]
        ward: WardArgs,
        #[arg(long)]
        aqi: f64,
    },
    /// Show a ward's five-day window
    History {
        #[command(flatten)]
        ward: WardArgs,
    },
    /// Forecast the next reading from the current window
    Predict {
        #[command(flatten)]
        ward: WardArgs,
    },
    /// Category and advisories for an AQI value
    Classify { aqi: f64 },
    /// Rank wards or zones by average AQI
    Rank {
        #[arg(value_enum)]
        scope: RankScope,
        #[arg(long, value_enum, default_value_t = SortOrder::Desc)]
        order: SortOrder,
        #[arg(long)]
        top: Option<usize>,
    },
    /// Most and least polluted wards and zones
    Dashboard {
        #[arg(long)]
        top: Option<usize>,
        #[arg(long, default_value_t = false, help = "Re-render on the refresh interval")]
        watch: bool,
        #[arg(long, help = "Stop watching after this many renders")]
        ticks: Option<u64>,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct WardArgs {
    #[arg(long, help = "Ward number or name")]
    pub ward: String,
    #[arg(long, help = "Zone to resolve the ward name in")]
    pub zone: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RankScope {
    Wards,
    Zones,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Desc,
    Asc,
}
