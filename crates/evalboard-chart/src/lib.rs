//! # evalboard-chart
//!
//! Chart data contracts for evalboard.
//!
//! Nothing here knows about pixels, canvases or a charting library: a
//! [`ChartSpec`] is the full description a renderer needs (dataset, axes,
//! legend, colours) and nothing more.

mod axis;
mod chart;
mod dataset;
mod legend;
pub mod palette;

pub use axis::{Axis, AxisPosition};
pub use chart::{ChartSpec, ChartType};
pub use dataset::{ComparisonDataset, DataSeries, SeriesStyle};
pub use legend::{Legend, LegendPosition};
