//! Chart series derived from a breakdown

use super::breakdown::Breakdown;

/// Parallel labels and values ready for a plotting backend
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    /// Totals rounded to cents
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// (value, label) pairs in breakdown order
    pub fn pairs(&self) -> impl Iterator<Item = (f64, &str)> {
        self.values
            .iter()
            .copied()
            .zip(self.labels.iter().map(String::as_str))
    }
}

/// Series for a breakdown, or `None` when it has no rows
pub fn to_chart_series(breakdown: &Breakdown) -> Option<ChartSeries> {
    if breakdown.is_empty() {
        return None;
    }

    let (labels, values) = breakdown
        .rows
        .iter()
        .map(|row| (row.category.clone(), row.total.to_f64()))
        .unzip();

    Some(ChartSeries { labels, values })
}
