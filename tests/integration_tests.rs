use std::io::Write;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::{NamedTempFile, TempDir};

use weather_charts::charts::{ChartKind, ChartRenderer};
use weather_charts::models::DateRange;
use weather_charts::processors::DailyAggregator;
use weather_charts::readers::ObservationReader;
use weather_charts::WeatherError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_sample_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "Date,Location,Temperature,Humidity,Sky").unwrap();
    writeln!(file, "2024-01-01,NYC,50,80,cloudy").unwrap();
    writeln!(file, "2024-01-01,NYC,60,,clear").unwrap();
    writeln!(file, "2024-01-02,NYC,70,75,clear").unwrap();
    writeln!(file, "2024-01-02,Boston,30,90,snow").unwrap();
    file
}

#[test]
fn test_csv_to_charts_pipeline() {
    let csv = write_sample_csv();
    let output_dir = TempDir::new().expect("Failed to create temp directory");

    let table = ObservationReader::new().read_path(csv.path()).unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.measurement_names(), ["Temperature", "Humidity"]);
    assert_eq!(table.ignored_names(), ["Sky"]);
    assert_eq!(table.locations(), vec!["NYC", "Boston"]);
    assert_eq!(
        table.date_span(),
        Some((date(2024, 1, 1), date(2024, 1, 2)))
    );

    let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 2)).unwrap();
    let aggregate = DailyAggregator::new().aggregate(&table, &range, "NYC");

    assert_eq!(aggregate.rows().len(), 2);
    assert_eq!(aggregate.rows()[0].date, date(2024, 1, 1));
    assert_eq!(aggregate.rows()[0].means, vec![Some(55.0), Some(80.0)]);
    assert_eq!(aggregate.rows()[1].date, date(2024, 1, 2));
    assert_eq!(aggregate.rows()[1].means, vec![Some(70.0), Some(75.0)]);

    for kind in ChartKind::ALL {
        let path = output_dir
            .path()
            .join(format!("{}.png", kind.file_stem()));
        ChartRenderer::new(kind)
            .with_size(640, 480)
            .render_to_file(&aggregate, &path)
            .unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

#[test]
fn test_empty_match_still_renders() {
    let csv = write_sample_csv();
    let output_dir = TempDir::new().expect("Failed to create temp directory");

    let table = ObservationReader::new().read_path(csv.path()).unwrap();

    // A location absent from the table is an empty result, not an error
    let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 2)).unwrap();
    let aggregate = DailyAggregator::new().aggregate(&table, &range, "Chicago");
    assert!(aggregate.is_empty());

    for kind in ChartKind::ALL {
        let path = output_dir
            .path()
            .join(format!("empty_{}.png", kind.file_stem()));
        ChartRenderer::new(kind)
            .with_size(640, 480)
            .render_to_file(&aggregate, &path)
            .unwrap();
        assert!(path.exists());
    }
}

#[test]
fn test_range_validation_precedes_aggregation() {
    // Inverted range
    let err = DateRange::new(date(2024, 1, 5), date(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, WeatherError::InvalidRange { .. }));

    // 10-day selection is over the cap
    let err = DateRange::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap_err();
    assert!(matches!(err, WeatherError::RangeTooWide { .. }));
}

#[test]
fn test_schema_validation() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "Day,City,Temperature").unwrap();
    writeln!(file, "2024-01-01,NYC,50").unwrap();

    let err = ObservationReader::new().read_path(file.path()).unwrap_err();
    assert!(matches!(err, WeatherError::Schema { .. }));
}
