use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "climate-dashboard")]
#[command(about = "Filter and summarise daily climate observations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Only log warnings and errors, no spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file (toml, json, yaml)")]
    pub config: Option<PathBuf>,
}

/// Where to read observations from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(short, long, help = "CSV file path or http(s) URL [default: from config]")]
    pub source: Option<String>,

    #[arg(long, help = "Reject out-of-range measurements while loading")]
    pub strict: bool,
}

/// Dashboard selection controls
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, help = "First date, inclusive (YYYY-MM-DD) [default: earliest in data]")]
    pub start: Option<String>,

    #[arg(long, help = "Last date, inclusive (YYYY-MM-DD) [default: latest in data]")]
    pub end: Option<String>,

    #[arg(short, long, help = "Exact province name [default: all provinces]")]
    pub province: Option<String>,

    #[arg(long, help = "Exact station name [default: all stations]")]
    pub station: Option<String>,

    #[arg(short, long, help = "Provinces per temperature ranking [default: from config]")]
    pub top: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the dashboard metrics and chart series as text
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, help = "Only print the metrics block")]
        brief: bool,
    },

    /// Write the dashboard views as JSON
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(
            short,
            long,
            help = "Output JSON path, '-' for stdout [default: output/climate-dashboard-{YYMMDD}.json]"
        )]
        output: Option<PathBuf>,

        #[arg(long, help = "Pretty-print the JSON")]
        pretty: bool,
    },

    /// List the date bounds, provinces and stations available for filtering
    Options {
        #[command(flatten)]
        source: SourceArgs,
    },
}
