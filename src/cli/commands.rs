use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::charts::{ChartKind, ChartRenderer};
use crate::cli::args::{Cli, Commands};
use crate::error::{Result, WeatherError};
use crate::models::{DailyAggregateTable, DateRange, ObservationTable};
use crate::processors::DailyAggregator;
use crate::readers::ObservationReader;
use crate::utils::text_table::{format_number, format_table, MISSING_CELL};

pub fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("weather_charts=debug")),
            )
            .init();
    }

    match cli.command {
        Commands::Render {
            input,
            location,
            start_date,
            end_date,
            output_dir,
            width,
            height,
            json,
        } => render(
            &input, location, start_date, end_date, &output_dir, width, height, json,
        ),

        Commands::Info { input } => info(&input),
    }
}

#[allow(clippy::too_many_arguments)]
fn render(
    input: &Path,
    location: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    output_dir: &Path,
    width: u32,
    height: u32,
    json: bool,
) -> Result<()> {
    let table = ObservationReader::new().read_path(input)?;

    println!("Uploaded Data");
    println!("{}", raw_table(&table));

    let location = match location {
        Some(location) => location,
        None => table
            .locations()
            .first()
            .map(|l| l.to_string())
            .ok_or_else(|| {
                WeatherError::InvalidFormat("CSV file contains no observation rows".to_string())
            })?,
    };

    // Selected dates default to the span present in the file
    let (earliest, latest) = table.date_span().ok_or_else(|| {
        WeatherError::InvalidFormat("CSV file contains no observation rows".to_string())
    })?;
    let start = start_date.unwrap_or(earliest);
    let end = end_date.unwrap_or(latest);

    // Validated before the aggregator runs; it does not re-check
    let range = DateRange::new(start, end)?;

    let aggregate = DailyAggregator::new().aggregate(&table, &range, &location);

    println!(
        "Data from {} to {} for {}",
        range.start(),
        range.end(),
        location
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&aggregate.to_json_rows())?);
    } else {
        println!("{}", aggregate_table(&aggregate));
    }

    std::fs::create_dir_all(output_dir)?;
    for kind in ChartKind::ALL {
        let path: PathBuf = output_dir.join(format!("{}.png", kind.file_stem()));
        ChartRenderer::new(kind)
            .with_size(width, height)
            .render_to_file(&aggregate, &path)?;
        println!("{}: {}", kind.title(), path.display());
    }

    Ok(())
}

fn info(input: &Path) -> Result<()> {
    let table = ObservationReader::new().read_path(input)?;

    println!("Rows: {}", table.len());
    println!("Locations: {}", table.locations().join(", "));
    match table.date_span() {
        Some((earliest, latest)) => println!("Date span: {} to {}", earliest, latest),
        None => println!("Date span: (none)"),
    }
    println!(
        "Measurement columns: {}",
        table.measurement_names().join(", ")
    );
    if !table.ignored_names().is_empty() {
        println!(
            "Ignored (non-numeric) columns: {}",
            table.ignored_names().join(", ")
        );
    }

    Ok(())
}

/// The uploaded table, echoed back before filtering.
fn raw_table(table: &ObservationTable) -> String {
    let mut headers = vec!["Date".to_string(), "Location".to_string()];
    headers.extend(table.measurement_names().iter().cloned());
    headers.extend(table.ignored_names().iter().cloned());

    let rows: Vec<Vec<String>> = table
        .records()
        .iter()
        .map(|record| {
            let mut row = vec![record.date.to_string(), record.location.clone()];
            row.extend(record.measurements.iter().map(|value| match value {
                Some(v) => format_number(*v),
                None => MISSING_CELL.to_string(),
            }));
            row.extend(record.extras.iter().cloned());
            row
        })
        .collect();

    format_table(&headers, &rows)
}

fn aggregate_table(aggregate: &DailyAggregateTable) -> String {
    let mut headers = vec!["Date".to_string()];
    headers.extend(aggregate.measurement_names().iter().cloned());

    let rows: Vec<Vec<String>> = aggregate
        .rows()
        .iter()
        .map(|row| {
            let mut cells = vec![row.date.to_string()];
            cells.extend(row.means.iter().map(|mean| match mean {
                Some(v) => format_number(*v),
                None => MISSING_CELL.to_string(),
            }));
            cells
        })
        .collect();

    format_table(&headers, &rows)
}
