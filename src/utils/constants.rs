/// Maximum number of days a selected date range may span.
pub const MAX_RANGE_DAYS: i64 = 7;

/// Fixed vertical axis range shared by every chart kind.
pub const Y_AXIS_MIN: f64 = 0.0;
pub const Y_AXIS_MAX: f64 = 100.0;

/// Spacing of tick marks on the vertical axis.
pub const Y_TICK_INTERVAL: f64 = 10.0;

/// Default chart image dimensions in pixels.
pub const DEFAULT_CHART_WIDTH: u32 = 1024;
pub const DEFAULT_CHART_HEIGHT: u32 = 768;

/// Date format used for axis labels and CLI date arguments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
