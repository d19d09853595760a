//! Balance sheet and income statement KPIs.
//!
//! Subtotals are derived fresh from the raw figures on every call, every
//! ratio with a zero denominator is reported as 0, and periods are computed
//! independently of one another.

pub mod earnings;
pub mod engine;
pub mod explain;
pub mod figures;
pub mod metric;
pub mod result;

pub use earnings::{quick_earnings, EarningsInput, EarningsOutput};
pub use engine::{
    calculate_kpis, calculate_periodic_kpis, compute_kpis, compute_periodic_kpis, KpiInput,
    PeriodicKpiInput, Subtotals,
};
pub use figures::{FinancialFigures, PeriodedFigures};
pub use metric::{Metric, MetricKind};
pub use result::{KpiResult, KpiValue, PeriodicKpiResult};
