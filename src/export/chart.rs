//! Monthly report image
//!
//! Lays the four report panels (expense pie, income pie, expense bar,
//! income bar) out as a 2x2 grid in a single `charming` chart and rasterizes
//! it to `report_<year>_<MM>.png` with the bundled ECharts renderer.

use std::fs;
use std::path::{Path, PathBuf};

use charming::{
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisType, ItemStyle, Label, TextAlign},
    series::{bar, Pie},
    Chart, ImageFormat, ImageRenderer,
};

use crate::error::{TallyError, TallyResult};
use crate::models::TransactionKind;
use crate::reports::{to_chart_series, ChartSeries, MonthlyReport};

/// Image size in pixels
pub const CHART_WIDTH: u32 = 1400;
pub const CHART_HEIGHT: u32 = 1000;

fn kind_label(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "Income",
        TransactionKind::Expense => "Expense",
    }
}

fn bar_color(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "green",
        TransactionKind::Expense => "crimson",
    }
}

/// Horizontal centre of the kind's column and the left edge of its bar grid
fn column(kind: TransactionKind) -> (&'static str, &'static str) {
    match kind {
        TransactionKind::Expense => ("25%", "6%"),
        TransactionKind::Income => ("75%", "56%"),
    }
}

fn panel_title(text: String, left: &str, top: &str) -> Title {
    Title::new()
        .text(text)
        .left(left)
        .top(top)
        .text_align(TextAlign::Center)
}

fn with_pie(chart: Chart, kind: TransactionKind, series: &ChartSeries) -> Chart {
    let (center, _) = column(kind);
    let data: Vec<(f64, &str)> = series.pairs().collect();

    chart
        .title(panel_title(
            format!("{} Breakdown", kind_label(kind)),
            center,
            "6%",
        ))
        .series(
            Pie::new()
                .name(format!("{} by category", kind_label(kind)))
                .center(vec![center, "30%"])
                .radius("28%")
                .label(Label::new().formatter("{b}\n{d}%"))
                .data(data),
        )
}

fn with_bar(chart: Chart, kind: TransactionKind, series: &ChartSeries, grid_index: u32) -> Chart {
    let (center, grid_left) = column(kind);
    let index = f64::from(grid_index);

    chart
        .title(panel_title(
            format!("{} by Category", kind_label(kind)),
            center,
            "52%",
        ))
        .grid(
            Grid::new()
                .left(grid_left)
                .top("58%")
                .width("38%")
                .height("34%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .grid_index(index)
                .type_(AxisType::Category)
                .axis_label(AxisLabel::new().rotate(30.0))
                .data(series.labels.clone()),
        )
        .y_axis(Axis::new().grid_index(index).type_(AxisType::Value))
        .series(
            bar::Bar::new()
                .name(kind_label(kind))
                .x_axis_index(index)
                .y_axis_index(index)
                .item_style(ItemStyle::new().color(bar_color(kind)))
                .data(series.values.clone()),
        )
}

/// "No <Kind> Data" in both of the kind's quadrants
fn with_placeholders(chart: Chart, kind: TransactionKind) -> Chart {
    let (center, _) = column(kind);
    let text = || format!("No {} Data", kind_label(kind));

    chart
        .title(panel_title(text(), center, "28%"))
        .title(panel_title(text(), center, "74%"))
}

/// Build the four-panel chart for a monthly report
pub fn monthly_chart(report: &MonthlyReport) -> Chart {
    let mut chart = Chart::new().background_color("#ffffff").title(
        Title::new()
            .text(format!("Financial Report - {}", report.period))
            .left("center")
            .top("1%"),
    );

    let mut grids = 0;
    for breakdown in [&report.expense_breakdown, &report.income_breakdown] {
        chart = match to_chart_series(breakdown) {
            Some(series) => {
                let chart = with_pie(chart, breakdown.kind, &series);
                let chart = with_bar(chart, breakdown.kind, &series, grids);
                grids += 1;
                chart
            }
            None => with_placeholders(chart, breakdown.kind),
        };
    }

    chart
}

/// Render `report_<year>_<MM>.png` into `dir` and return its path
pub fn write_monthly_charts(report: &MonthlyReport, dir: &Path) -> TallyResult<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| TallyError::Export(format!("Failed to create {}: {}", dir.display(), e)))?;

    let path = dir.join(format!("{}.png", report.period.report_stem()));
    ImageRenderer::new(CHART_WIDTH, CHART_HEIGHT)
        .save_format(ImageFormat::Png, &monthly_chart(report), &path)
        .map_err(|e| TallyError::Export(format!("Failed to render {}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), "wrote chart image");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthPeriod, Transaction, TransactionId};
    use chrono::NaiveDate;
    use serde_json::Value;
    use tempfile::TempDir;

    fn txn(id: u64, kind: TransactionKind, category: &str, units: i64) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            kind,
            category: category.to_string(),
            amount: Money::from_units(units),
            description: None,
        }
    }

    fn november() -> MonthPeriod {
        MonthPeriod::new(2024, 11).unwrap()
    }

    fn options(report: &MonthlyReport) -> Value {
        serde_json::from_str(&monthly_chart(report).to_string()).unwrap()
    }

    fn titles(options: &Value) -> Vec<String> {
        options["title"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["text"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_four_panels() {
        let report = MonthlyReport::generate(
            november(),
            &[
                txn(3, TransactionKind::Expense, "Groceries", 350),
                txn(2, TransactionKind::Expense, "Rent", 1500),
                txn(1, TransactionKind::Income, "Salary", 5000),
            ],
        );

        let options = options(&report);
        assert_eq!(
            titles(&options),
            vec![
                "Financial Report - 2024-11",
                "Expense Breakdown",
                "Expense by Category",
                "Income Breakdown",
                "Income by Category",
            ]
        );

        let series = options["series"].as_array().unwrap();
        let types: Vec<&str> = series.iter().map(|s| s["type"].as_str().unwrap()).collect();
        assert_eq!(types, vec!["pie", "bar", "pie", "bar"]);

        // Each bar series sits on its own grid
        assert_eq!(options["grid"].as_array().unwrap().len(), 2);
        assert_eq!(series[1]["xAxisIndex"], 0.0);
        assert_eq!(series[3]["xAxisIndex"], 1.0);
        assert_eq!(options["xAxis"][0]["data"][0], "Rent");
        assert_eq!(options["xAxis"][1]["data"][0], "Salary");
    }

    #[test]
    fn test_placeholder_for_missing_kind() {
        let report = MonthlyReport::generate(
            november(),
            &[txn(1, TransactionKind::Expense, "Rent", 1500)],
        );

        let options = options(&report);
        let titles = titles(&options);
        assert_eq!(titles.iter().filter(|t| *t == "No Income Data").count(), 2);
        assert!(!titles.contains(&"No Expense Data".to_string()));

        // The expense bar keeps grid 0 even without an income grid
        assert_eq!(options["grid"].as_array().unwrap().len(), 1);
        assert_eq!(options["series"][1]["xAxisIndex"], 0.0);
    }

    #[test]
    fn test_income_only_uses_first_grid() {
        let report = MonthlyReport::generate(
            november(),
            &[txn(1, TransactionKind::Income, "Salary", 5000)],
        );

        let options = options(&report);
        assert_eq!(options["series"][1]["type"], "bar");
        assert_eq!(options["series"][1]["xAxisIndex"], 0.0);
        assert!(titles(&options).contains(&"No Expense Data".to_string()));
    }

    #[test]
    fn test_empty_month_is_all_placeholders() {
        let report = MonthlyReport::generate(MonthPeriod::new(2024, 10).unwrap(), &[]);
        let options = options(&report);

        assert!(options.get("series").is_none());
        assert_eq!(titles(&options).len(), 5);
    }

    #[test]
    fn test_write_png() {
        let temp_dir = TempDir::new().unwrap();
        let report = MonthlyReport::generate(
            november(),
            &[
                txn(2, TransactionKind::Expense, "Rent", 1500),
                txn(1, TransactionKind::Income, "Salary", 5000),
            ],
        );

        let path = write_monthly_charts(&report, &temp_dir.path().join("charts")).unwrap();
        assert_eq!(path, temp_dir.path().join("charts").join("report_2024_11.png"));

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}
