//! Chart types

use std::fmt;
use std::str::FromStr;

use crate::axis::Axis;
use crate::dataset::ComparisonDataset;
use crate::legend::Legend;

/// Chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChartType {
    /// Vertical bars, one group per label
    Bar,
    /// One line per series across the labels
    Line,
    /// One closed polygon per series, one spoke per label
    Radar,
}

impl ChartType {
    /// Lowercase name, as renderers usually spell it
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Radar => "radar",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            "radar" => Ok(ChartType::Radar),
            other => Err(format!("unknown chart type: {}", other)),
        }
    }
}

/// Everything a renderer needs to draw one chart
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChartSpec {
    /// Chart type
    pub chart_type: ChartType,
    /// Chart title
    pub title: Option<String>,
    /// Short explanation shown next to the chart
    pub description: Option<String>,
    /// Labels and series
    pub dataset: ComparisonDataset,
    /// Category axis (X); radar charts have none
    pub category_axis: Option<Axis>,
    /// Value axis (Y, or the radial scale for radar charts)
    pub value_axis: Option<Axis>,
    /// Legend
    pub legend: Legend,
}

impl ChartSpec {
    /// Create a new chart over a dataset
    pub fn new(chart_type: ChartType, dataset: ComparisonDataset) -> Self {
        Self {
            chart_type,
            title: None,
            description: None,
            dataset,
            category_axis: None,
            value_axis: None,
            legend: Legend::default(),
        }
    }

    /// Set chart title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set chart description
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category axis
    pub fn with_category_axis(mut self, axis: Axis) -> Self {
        self.category_axis = Some(axis);
        self
    }

    /// Set the value axis
    pub fn with_value_axis(mut self, axis: Axis) -> Self {
        self.value_axis = Some(axis);
        self
    }

    /// Set the legend
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = legend;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AxisPosition, DataSeries};

    #[test]
    fn test_chart_type_round_trips_through_str() {
        for ty in [ChartType::Bar, ChartType::Line, ChartType::Radar] {
            assert_eq!(ty.as_str().parse::<ChartType>(), Ok(ty));
        }
        assert!("pie".parse::<ChartType>().is_err());
        assert_eq!(" Radar ".parse::<ChartType>(), Ok(ChartType::Radar));
    }

    #[test]
    fn test_builder() {
        let dataset =
            ComparisonDataset::new(["GPT"]).with_series(DataSeries::new("Overall Score", vec![8.7]));
        let chart = ChartSpec::new(ChartType::Bar, dataset)
            .with_title("Overall")
            .with_value_axis(Axis::new(AxisPosition::Left).with_bounds(0.0, 10.0))
            .with_legend(Legend::hidden());

        assert_eq!(chart.title.as_deref(), Some("Overall"));
        assert_eq!(chart.value_axis.as_ref().and_then(|a| a.maximum), Some(10.0));
        assert!(!chart.legend.visible);
        assert!(chart.category_axis.is_none());
    }
}
