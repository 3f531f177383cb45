pub mod renderer;

pub use renderer::{ChartKind, ChartRenderer};
