//! Chart kinds, selection context and view dispatch

use std::fmt;
use std::str::FromStr;

use evalboard_chart::palette::{
    border_color, series_color, with_alpha, RADAR_FILL_ALPHA, SERIES_FILL_ALPHA,
};
use evalboard_chart::{
    Axis, AxisPosition, ChartSpec, ChartType, ComparisonDataset, Legend, LegendPosition,
    SeriesStyle,
};
use evalboard_core::Workbook;

use crate::category::{build_category_series, build_overall_bars};
use crate::error::ViewResult;
use crate::metric::CanonicalMetric;
use crate::radar::build_radar_dataset;
use crate::sheets::{self, find_sheet};
use crate::table::{build_table, ComparisonTable};

/// Title of the value axis on bar and line charts
pub const SCORE_AXIS_TITLE: &str = "Score (0-10)";

/// The charts of the comparison dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ChartKind {
    /// Bar chart of each model's overall score
    #[default]
    Overall,
    Faithfulness,
    AnswerRelevance,
    ContextRelevance,
    Correctness,
    /// Radar chart of all metrics per model
    CategoryComparison,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Overall,
        ChartKind::Faithfulness,
        ChartKind::AnswerRelevance,
        ChartKind::ContextRelevance,
        ChartKind::Correctness,
        ChartKind::CategoryComparison,
    ];

    /// Dashboard tab id
    pub fn tab_id(&self) -> &'static str {
        match self {
            ChartKind::Overall => "overall",
            ChartKind::Faithfulness => "faithfulness",
            ChartKind::AnswerRelevance => "answer-relevance",
            ChartKind::ContextRelevance => "context-relevance",
            ChartKind::Correctness => "correctness",
            ChartKind::CategoryComparison => "category-comparison",
        }
    }

    /// Sheet the chart is built from
    pub fn sheet_name(&self) -> &'static str {
        match self {
            ChartKind::Overall => sheets::OVERALL_SCORE_COMPARISON,
            ChartKind::Faithfulness => sheets::FAITHFULNESS_COMPARISON,
            ChartKind::AnswerRelevance => sheets::ANSWER_RELEVANCE_COMPARISON,
            ChartKind::ContextRelevance => sheets::CONTEXT_RELEVANCE_COMPARISON,
            ChartKind::Correctness => sheets::CORRECTNESS_COMPARISON,
            ChartKind::CategoryComparison => sheets::MODEL_COMPARISON,
        }
    }

    /// The metric a per-metric line chart shows
    pub fn metric(&self) -> Option<CanonicalMetric> {
        match self {
            ChartKind::Faithfulness => Some(CanonicalMetric::Faithfulness),
            ChartKind::AnswerRelevance => Some(CanonicalMetric::AnswerRelevance),
            ChartKind::ContextRelevance => Some(CanonicalMetric::ContextRelevance),
            ChartKind::Correctness => Some(CanonicalMetric::Correctness),
            ChartKind::Overall | ChartKind::CategoryComparison => None,
        }
    }

    pub fn chart_type(&self) -> ChartType {
        match self {
            ChartKind::Overall => ChartType::Bar,
            ChartKind::CategoryComparison => ChartType::Radar,
            _ => ChartType::Line,
        }
    }

    /// Title drawn on the chart
    pub fn title(&self) -> String {
        match self {
            ChartKind::Overall => "Overall Model Performance Comparison".to_string(),
            ChartKind::CategoryComparison => "Multi-Metric Model Comparison".to_string(),
            _ => self.heading(),
        }
    }

    /// Heading shown above the chart
    pub fn heading(&self) -> String {
        match (self, self.metric()) {
            (_, Some(metric)) => format!("{} Scores", metric.label()),
            (ChartKind::Overall, None) => "Overall Performance Comparison".to_string(),
            (_, None) => "Multi-Metric Comparison".to_string(),
        }
    }

    /// One-line explanation shown under the heading
    pub fn description(&self) -> String {
        match self {
            ChartKind::Overall => "Comparing overall scores across all LLM models".to_string(),
            ChartKind::CategoryComparison => {
                "Radar chart showing model performance across all metrics".to_string()
            }
            _ => format!(
                "Performance comparison across different categories for {}",
                self.heading().to_lowercase()
            ),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tab_id())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.tab_id() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.tab_id()).collect();
                format!("unknown chart kind '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

/// What the dashboard is currently showing
///
/// Passed explicitly into every view builder; nothing is remembered between
/// calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Active chart tab
    pub chart: ChartKind,
    /// Sheet for the table view
    pub sheet: String,
    /// Model whose results workbook is open, if any
    pub model: Option<String>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            chart: ChartKind::default(),
            sheet: sheets::MODEL_COMPARISON.to_string(),
            model: None,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a chart
    pub fn with_chart(mut self, chart: ChartKind) -> Self {
        self.chart = chart;
        self
    }

    /// Select a sheet for the table view
    pub fn with_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.sheet = sheet.into();
        self
    }

    /// Select a model
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }
}

fn score_axis() -> Axis {
    Axis::new(AxisPosition::Left)
        .with_title(SCORE_AXIS_TITLE)
        .with_bounds(0.0, 10.0)
}

/// One colour per bar, with darker borders
fn color_bars(dataset: &mut ComparisonDataset) {
    let count = dataset.labels.len();
    for series in &mut dataset.series {
        series.style = SeriesStyle {
            background: (0..count).map(|i| series_color(i).to_string()).collect(),
            border: (0..count).map(|i| border_color(i).to_string()).collect(),
        };
    }
}

/// One colour per series, translucent fill
fn color_series(dataset: &mut ComparisonDataset, alpha: &str) {
    for (i, series) in dataset.series.iter_mut().enumerate() {
        let color = series_color(i);
        series.style = SeriesStyle::uniform(with_alpha(color, alpha), color);
    }
}

/// Build the chart for the selected tab
pub fn build_chart(workbook: &Workbook, selection: &Selection) -> ViewResult<ChartSpec> {
    let kind = selection.chart;
    let sheet = find_sheet(workbook, kind.sheet_name())?;

    let chart = match kind.chart_type() {
        ChartType::Bar => {
            let mut dataset = build_overall_bars(sheet)?;
            color_bars(&mut dataset);
            ChartSpec::new(ChartType::Bar, dataset)
                .with_category_axis(Axis::new(AxisPosition::Bottom).with_title("Models"))
                .with_value_axis(score_axis())
                .with_legend(Legend::hidden())
        }
        ChartType::Line => {
            let mut dataset = build_category_series(sheet)?;
            color_series(&mut dataset, SERIES_FILL_ALPHA);
            ChartSpec::new(ChartType::Line, dataset)
                .with_category_axis(Axis::new(AxisPosition::Bottom).with_title("Categories"))
                .with_value_axis(score_axis())
                .with_legend(Legend::new(LegendPosition::Top))
        }
        ChartType::Radar => {
            let mut dataset = build_radar_dataset(sheet)?;
            color_series(&mut dataset, RADAR_FILL_ALPHA);
            ChartSpec::new(ChartType::Radar, dataset)
                .with_value_axis(
                    Axis::new(AxisPosition::Radial)
                        .with_bounds(0.0, 10.0)
                        .with_step(2.0),
                )
                .with_legend(Legend::new(LegendPosition::Top))
        }
    };

    tracing::debug!(
        chart = kind.tab_id(),
        sheet = sheet.name(),
        labels = chart.dataset.labels.len(),
        series = chart.dataset.series.len(),
        "built chart"
    );

    Ok(chart.with_title(kind.title()).with_description(kind.description()))
}

/// Build the table view for the selected sheet
pub fn build_sheet_table(workbook: &Workbook, selection: &Selection) -> ViewResult<ComparisonTable> {
    build_table(find_sheet(workbook, &selection.sheet)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewError;
    use evalboard_core::{Sheet, SheetRow};
    use pretty_assertions::assert_eq;

    fn pivot(name: &str) -> Sheet {
        let mut sheet = Sheet::new(name);
        for (category, gpt, claude) in [("Accuracy", 9.1, 7.0), ("Recall", 8.0, 6.0), ("OVERALL", 8.55, 6.5)] {
            sheet.push_row(
                SheetRow::new()
                    .with("Category", category)
                    .with("GPT", gpt)
                    .with("Claude", claude),
            );
        }
        sheet
    }

    fn report() -> Workbook {
        let mut long = Sheet::new(sheets::MODEL_COMPARISON);
        long.push_row(
            SheetRow::new()
                .with("Model", "GPT")
                .with("Category", "OVERALL")
                .with("Faithfulness", 9.0)
                .with("Answer Relevance", 8.0)
                .with("Context Relevance", 7.0)
                .with("correctness", 6.0)
                .with("Overall Score", 7.5),
        );

        vec![
            long,
            pivot(sheets::FAITHFULNESS_COMPARISON),
            pivot(sheets::CORRECTNESS_COMPARISON),
            pivot(sheets::OVERALL_SCORE_COMPARISON),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_chart_kind_parses_tab_ids() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.tab_id().parse::<ChartKind>(), Ok(kind));
        }
        assert_eq!("answer_relevance".parse::<ChartKind>(), Ok(ChartKind::AnswerRelevance));
        assert!("pie".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_chart_kind_text() {
        assert_eq!(ChartKind::Correctness.title(), "Correctness Scores");
        assert_eq!(
            ChartKind::Faithfulness.description(),
            "Performance comparison across different categories for faithfulness scores"
        );
        assert_eq!(ChartKind::Overall.heading(), "Overall Performance Comparison");
        assert_eq!(ChartKind::CategoryComparison.heading(), "Multi-Metric Comparison");
    }

    #[test]
    fn test_overall_chart() {
        let chart = build_chart(&report(), &Selection::new()).unwrap();

        assert_eq!(chart.chart_type, ChartType::Bar);
        assert_eq!(chart.title.as_deref(), Some("Overall Model Performance Comparison"));
        assert_eq!(chart.dataset.labels, vec!["GPT", "Claude"]);
        assert_eq!(chart.dataset.series[0].values, vec![8.55, 6.5]);
        assert_eq!(
            chart.dataset.series[0].style.background,
            vec!["#3498db", "#e74c3c"]
        );
        assert_eq!(chart.dataset.series[0].style.border, vec!["#2980b9", "#c0392b"]);
        assert!(!chart.legend.visible);
        assert_eq!(
            chart.category_axis.and_then(|a| a.title).as_deref(),
            Some("Models")
        );
    }

    #[test]
    fn test_metric_chart_reads_lowercase_sheet() {
        let selection = Selection::new().with_chart(ChartKind::Correctness);
        let chart = build_chart(&report(), &selection).unwrap();

        assert_eq!(chart.chart_type, ChartType::Line);
        assert_eq!(chart.dataset.labels, vec!["Accuracy", "Recall"]);
        assert_eq!(chart.dataset.series[1].style, SeriesStyle::uniform("#e74c3c80", "#e74c3c"));
        assert_eq!(
            chart.value_axis.as_ref().and_then(|a| a.title.as_deref()),
            Some(SCORE_AXIS_TITLE)
        );
    }

    #[test]
    fn test_radar_chart() {
        let selection = Selection::new().with_chart(ChartKind::CategoryComparison);
        let chart = build_chart(&report(), &selection).unwrap();

        assert_eq!(chart.chart_type, ChartType::Radar);
        assert!(chart.category_axis.is_none());
        assert_eq!(chart.value_axis.as_ref().and_then(|a| a.step), Some(2.0));
        assert_eq!(chart.dataset.series[0].values, vec![9.0, 8.0, 7.0, 6.0, 7.5]);
        assert_eq!(chart.dataset.series[0].style.background, vec!["#3498db40"]);
    }

    #[test]
    fn test_missing_sheet() {
        let selection = Selection::new().with_chart(ChartKind::AnswerRelevance);
        let err = build_chart(&report(), &selection).unwrap_err();
        assert_eq!(
            err,
            ViewError::MissingSheet {
                sheet: "Answer Relevance Comparison".into()
            }
        );
        assert_eq!(err.user_message(), "Sheet not found: Answer Relevance Comparison");
    }

    #[test]
    fn test_sheet_table() {
        let selection = Selection::new().with_sheet(sheets::FAITHFULNESS_COMPARISON);
        let table = build_sheet_table(&report(), &selection).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows[2].aggregate);
    }
}
