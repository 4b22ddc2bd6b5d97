//! Report engine for tally
//!
//! Pure functions over in-memory transaction sets: summaries, category
//! breakdowns, monthly reports and chart series. Nothing here touches
//! storage.

pub mod breakdown;
pub mod chart;
pub mod monthly;
pub mod summary;

pub use breakdown::{category_breakdown, Breakdown, CategoryTotal};
pub use chart::{to_chart_series, ChartSeries};
pub use monthly::{MonthlyReport, RECENT_LIMIT};
pub use summary::{summarize, Summary};
