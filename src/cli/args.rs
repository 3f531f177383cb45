use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};

#[derive(Parser)]
#[command(name = "weather-charts")]
#[command(about = "Aggregate and chart CSV weather observations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter one location and date range, aggregate per day and render charts
    Render {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Location to filter on [default: first location in the file]"
        )]
        location: Option<String>,

        #[arg(long, help = "Start date, YYYY-MM-DD [default: earliest date in the file]")]
        start_date: Option<NaiveDate>,

        #[arg(long, help = "End date, YYYY-MM-DD [default: latest date in the file]")]
        end_date: Option<NaiveDate>,

        #[arg(
            short,
            long,
            default_value = ".",
            help = "Directory for the rendered chart images"
        )]
        output_dir: PathBuf,

        #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
        width: u32,

        #[arg(long, default_value_t = DEFAULT_CHART_HEIGHT)]
        height: u32,

        #[arg(long, help = "Print the aggregate table as JSON instead of text")]
        json: bool,
    },

    /// Show the locations, date span and column classification of a CSV file
    Info {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,
    },
}
