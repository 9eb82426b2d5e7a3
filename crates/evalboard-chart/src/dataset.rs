//! Comparison dataset types

/// Colours applied to one series
///
/// Each list holds either one colour (applied to every point) or one colour
/// per label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SeriesStyle {
    /// Fill colours
    pub background: Vec<String>,
    /// Border/line colours
    pub border: Vec<String>,
}

impl SeriesStyle {
    /// A style using one fill and one border colour for every point
    pub fn uniform<B: Into<String>, L: Into<String>>(background: B, border: L) -> Self {
        Self {
            background: vec![background.into()],
            border: vec![border.into()],
        }
    }

    /// Check whether no colours have been assigned
    pub fn is_unset(&self) -> bool {
        self.background.is_empty() && self.border.is_empty()
    }
}

/// One named numeric series
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DataSeries {
    /// Series name (a model or metric)
    pub name: String,
    /// One value per dataset label
    pub values: Vec<f64>,
    /// Colours
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "SeriesStyle::is_unset"))]
    pub style: SeriesStyle,
}

impl DataSeries {
    /// Create a new data series
    pub fn new<S: Into<String>>(name: S, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            style: SeriesStyle::default(),
        }
    }
}

/// Labels plus named numeric series, shared by every chart type
///
/// Every series holds exactly one value per label. Series added through
/// [`push_series`](Self::push_series) are padded with `0.0` or truncated to
/// keep that true.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComparisonDataset {
    /// Categories or models, in display order
    pub labels: Vec<String>,
    /// Series in display order
    pub series: Vec<DataSeries>,
}

impl ComparisonDataset {
    /// Create a dataset with the given labels and no series
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            series: Vec::new(),
        }
    }

    /// Add a series, fitting its values to the label count
    pub fn push_series(&mut self, mut series: DataSeries) {
        series.values.resize(self.labels.len(), 0.0);
        self.series.push(series);
    }

    /// Builder-style [`push_series`](Self::push_series)
    pub fn with_series(mut self, series: DataSeries) -> Self {
        self.push_series(series);
        self
    }

    /// Get a series by name
    pub fn series_named(&self, name: &str) -> Option<&DataSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the dataset has no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Check that every series has one value per label
    pub fn is_well_formed(&self) -> bool {
        self.series.iter().all(|s| s.values.len() == self.labels.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_push_series_pads_and_truncates() {
        let mut dataset = ComparisonDataset::new(["Accuracy", "Recall"]);
        dataset.push_series(DataSeries::new("GPT", vec![9.1]));
        dataset.push_series(DataSeries::new("Claude", vec![7.0, 6.0, 5.0]));

        assert_eq!(dataset.series[0].values, vec![9.1, 0.0]);
        assert_eq!(dataset.series[1].values, vec![7.0, 6.0]);
        assert!(dataset.is_well_formed());
    }

    #[test]
    fn test_series_named() {
        let dataset = ComparisonDataset::new(["x"]).with_series(DataSeries::new("GPT", vec![1.0]));
        assert_eq!(dataset.series_named("GPT").map(|s| s.values.clone()), Some(vec![1.0]));
        assert!(dataset.series_named("gpt").is_none());
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_manual_construction_can_be_checked() {
        let dataset = ComparisonDataset {
            labels: vec!["a".into(), "b".into()],
            series: vec![DataSeries::new("s", vec![1.0])],
        };
        assert!(!dataset.is_well_formed());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_skips_unset_style() {
        let dataset = ComparisonDataset::new(["Accuracy"]).with_series(DataSeries::new("GPT", vec![9.1]));
        let json = serde_json::to_string(&dataset).unwrap();
        assert_eq!(
            json,
            r#"{"labels":["Accuracy"],"series":[{"name":"GPT","values":[9.1]}]}"#
        );
    }
}
