use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::debug;

use crate::error::{Result, WeatherError};
use crate::models::DailyAggregateTable;
use crate::utils::constants::{
    DATE_FORMAT, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, Y_AXIS_MAX, Y_AXIS_MIN,
    Y_TICK_INTERVAL,
};

/// The three supported chart styles. All share one axis convention and
/// differ only in how each series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
}

impl ChartKind {
    /// Every kind, in the fixed presentation order.
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Bar, ChartKind::Scatter];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line Graph",
            ChartKind::Bar => "Bar Graph",
            ChartKind::Scatter => "Scatter Plot",
        }
    }

    /// Output file stem, e.g. `line` for `line.png`.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
        }
    }
}

/// Renders a [`DailyAggregateTable`] as a chart image.
///
/// The vertical axis is fixed to `[0, 100]` with a tick every 10 units;
/// values outside that range clip against the plot area rather than
/// rescaling it. The horizontal axis is the discrete sequence of dates in
/// the table, with no gap filling. An empty table still produces a valid
/// chart with configured axes and no series.
pub struct ChartRenderer {
    kind: ChartKind,
    width: u32,
    height: u32,
}

impl ChartRenderer {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// Render to a PNG file at `path`.
    pub fn render_to_file(&self, table: &DailyAggregateTable, path: &Path) -> Result<()> {
        let root =
            BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        self.draw(table, &root)?;
        root.present().map_err(chart_err)?;
        debug!(kind = self.kind.title(), path = %path.display(), "rendered chart");
        Ok(())
    }

    /// Render into a caller-supplied RGB buffer of `width * height * 3`
    /// bytes. Used by tests to exercise drawing without touching disk.
    pub fn render_to_rgb_buffer(
        &self,
        table: &DailyAggregateTable,
        buffer: &mut [u8],
    ) -> Result<()> {
        let root = BitMapBackend::with_buffer(buffer, (self.width, self.height))
            .into_drawing_area();
        self.draw(table, &root)?;
        root.present().map_err(chart_err)?;
        Ok(())
    }

    fn draw<DB: DrawingBackend>(
        &self,
        table: &DailyAggregateTable,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<()> {
        root.fill(&WHITE).map_err(chart_err)?;

        let day_count = table.rows().len();
        let date_labels: Vec<String> = table
            .rows()
            .iter()
            .map(|row| row.date.format(DATE_FORMAT).to_string())
            .collect();

        // One x-axis slot per date; keep a non-degenerate range when empty
        let x_max = day_count.max(1) as f64 - 0.5;
        let y_ticks = ((Y_AXIS_MAX - Y_AXIS_MIN) / Y_TICK_INTERVAL) as usize + 1;

        let mut chart = ChartBuilder::on(root)
            .caption(self.kind.title(), ("sans-serif", 28))
            .margin(12)
            .x_label_area_size(90)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5f64..x_max, Y_AXIS_MIN..Y_AXIS_MAX)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Value")
            .x_labels(day_count + 1)
            .y_labels(y_ticks)
            .y_label_formatter(&|v| format!("{:.0}", v))
            .x_label_formatter(&|x| {
                let index = x.round();
                if (x - index).abs() > 1e-6 || index < 0.0 {
                    return String::new();
                }
                date_labels
                    .get(index as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .x_label_style(("sans-serif", 13).into_font().transform(FontTransform::Rotate90))
            .draw()
            .map_err(chart_err)?;

        if !table.has_series() {
            return Ok(());
        }

        let series_count = table.measurement_names().len();
        for (series_idx, name) in table.measurement_names().iter().enumerate() {
            let color = Palette99::pick(series_idx).to_rgba();
            let points: Vec<(f64, f64)> = table
                .rows()
                .iter()
                .enumerate()
                .filter_map(|(day_idx, row)| {
                    row.means[series_idx].map(|v| (day_idx as f64, v))
                })
                .collect();

            // The y axis is fixed: values beyond it clip instead of
            // rescaling. Bars truncate at the axis bounds; line and
            // scatter markers outside the bounds are not drawn.
            let visible: Vec<(f64, f64)> = points
                .iter()
                .copied()
                .filter(|&(_, v)| (Y_AXIS_MIN..=Y_AXIS_MAX).contains(&v))
                .collect();

            match self.kind {
                ChartKind::Line => {
                    chart
                        .draw_series(
                            LineSeries::new(visible.iter().copied(), color.stroke_width(2))
                                .point_size(4),
                        )
                        .map_err(chart_err)?
                        .label(name.as_str())
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                        });
                }
                ChartKind::Bar => {
                    // Cluster the bars for one date inside a 0.8-wide slot
                    let bar_width = 0.8 / series_count as f64;
                    let offset = -0.4 + series_idx as f64 * bar_width;
                    chart
                        .draw_series(points.iter().map(|&(x, v)| {
                            let top = v.clamp(Y_AXIS_MIN, Y_AXIS_MAX);
                            Rectangle::new(
                                [(x + offset, Y_AXIS_MIN), (x + offset + bar_width, top)],
                                color.filled(),
                            )
                        }))
                        .map_err(chart_err)?
                        .label(name.as_str())
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                        });
                }
                ChartKind::Scatter => {
                    chart
                        .draw_series(
                            visible
                                .iter()
                                .map(|&(x, v)| Circle::new((x, v), 4, color.filled())),
                        )
                        .map_err(chart_err)?
                        .label(name.as_str())
                        .legend(move |(x, y)| Circle::new((x + 9, y), 4, color.filled()));
                }
            }
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(chart_err)?;

        Ok(())
    }
}

fn chart_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> WeatherError {
    WeatherError::Chart(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyAggregate;
    use chrono::NaiveDate;

    const WIDTH: u32 = 400;
    const HEIGHT: u32 = 300;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_table() -> DailyAggregateTable {
        DailyAggregateTable::new(
            vec!["Temperature".to_string(), "Humidity".to_string()],
            vec![
                DailyAggregate {
                    date: date(2024, 1, 1),
                    means: vec![Some(55.0), Some(80.0)],
                },
                DailyAggregate {
                    date: date(2024, 1, 2),
                    means: vec![Some(70.0), None],
                },
            ],
        )
    }

    fn render(kind: ChartKind, table: &DailyAggregateTable) -> Vec<u8> {
        let mut buffer = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
        ChartRenderer::new(kind)
            .with_size(WIDTH, HEIGHT)
            .render_to_rgb_buffer(table, &mut buffer)
            .unwrap();
        buffer
    }

    #[test]
    fn test_render_each_kind() {
        let table = sample_table();
        for kind in ChartKind::ALL {
            let buffer = render(kind, &table);
            // The white background alone proves the backend drew something
            assert!(buffer.iter().any(|&b| b == 255));
        }
    }

    #[test]
    fn test_render_empty_table_succeeds() {
        let empty = DailyAggregateTable::default();
        for kind in ChartKind::ALL {
            let buffer = render(kind, &empty);
            assert!(buffer.iter().any(|&b| b == 255));
        }
    }

    #[test]
    fn test_render_without_numeric_columns_succeeds() {
        let table = DailyAggregateTable::new(
            vec![],
            vec![DailyAggregate {
                date: date(2024, 1, 1),
                means: vec![],
            }],
        );
        for kind in ChartKind::ALL {
            render(kind, &table);
        }
    }

    #[test]
    fn test_out_of_range_values_clip_without_error() {
        let table = DailyAggregateTable::new(
            vec!["Pressure".to_string()],
            vec![DailyAggregate {
                date: date(2024, 1, 1),
                means: vec![Some(1013.25)],
            }],
        );
        for kind in ChartKind::ALL {
            render(kind, &table);
        }
    }

    #[test]
    fn test_file_stems() {
        assert_eq!(ChartKind::Line.file_stem(), "line");
        assert_eq!(ChartKind::Bar.file_stem(), "bar");
        assert_eq!(ChartKind::Scatter.file_stem(), "scatter");
    }
}
