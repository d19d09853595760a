use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::explain::explain;
use super::figures::{FinancialFigures, PeriodedFigures};
use super::metric::Metric;
use super::result::{KpiResult, KpiValue, PeriodicKpiResult};
use crate::types::{with_metadata, ComputationOutput, KpiOptions, Money};
use crate::{FinAnalystError, FinAnalystResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KpiInput {
    pub figures: FinancialFigures,
    #[serde(default)]
    pub options: KpiOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodicKpiInput {
    pub data: PeriodedFigures,
    #[serde(default)]
    pub options: KpiOptions,
}

/// Aggregates derived from the raw figures before any ratio is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtotals {
    pub non_current_assets: Money,
    pub current_assets: Money,
    pub total_assets: Money,
    /// Short- plus long-term liabilities only
    pub total_liabilities: Money,
    pub ebitda: Money,
    pub ebit: Money,
    pub net_income: Money,
}

impl Subtotals {
    pub fn from_figures(f: &FinancialFigures) -> FinAnalystResult<Self> {
        let non_current_assets = sum(
            "non_current_assets",
            &[
                f.intangible_assets,
                f.property_plant_and_equipment,
                f.other_non_current_assets,
            ],
            &[],
        )?;
        let current_assets = sum(
            "current_assets",
            &[
                f.inventories,
                f.trade_receivables,
                f.cash_and_cash_equivalents,
                f.other_current_assets,
            ],
            &[],
        )?;
        let total_assets = sum(
            "total_assets",
            &[
                non_current_assets,
                current_assets,
                f.other_assets,
                f.active_accruals_deferrals,
            ],
            &[],
        )?;
        let total_liabilities = sum(
            "total_liabilities",
            &[f.short_term_liabilities, f.long_term_liabilities],
            &[],
        )?;
        let ebitda = sum(
            "EBITDA",
            &[f.sales_revenue, f.other_operational_income],
            &[f.cogs, f.other_operational_expense],
        )?;
        let ebit = sum("EBIT", &[ebitda], &[f.depreciation])?;
        let net_income = sum(
            "net_income",
            &[ebit, f.interest_income, f.other_income],
            &[f.interest_expenses, f.other_expenses],
        )?;

        Ok(Self {
            non_current_assets,
            current_assets,
            total_assets,
            total_liabilities,
            ebitda,
            ebit,
            net_income,
        })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the KPI set for one period.
///
/// Pure: the same figures and options always yield the same result.
pub fn compute_kpis(figures: &FinancialFigures, options: &KpiOptions) -> FinAnalystResult<KpiResult> {
    figures.validate(options.validation)?;
    let evaluation = evaluate(figures, options.include_alternates)?;
    Ok(assemble(&evaluation, options))
}

/// Compute the KPI set for every period independently, keeping period order.
pub fn compute_periodic_kpis(
    periods: &PeriodedFigures,
    options: &KpiOptions,
) -> FinAnalystResult<PeriodicKpiResult> {
    periods.validate(options.validation)?;
    let mut output = PeriodicKpiResult::default();
    for (label, figures) in periods.iter() {
        debug!(period = label, "computing period KPIs");
        let evaluation = evaluate(figures, options.include_alternates)?;
        output.push(label, assemble(&evaluation, options));
    }
    Ok(output)
}

/// Single-period KPIs wrapped in the standard computation envelope.
pub fn calculate_kpis(input: &KpiInput) -> FinAnalystResult<ComputationOutput<KpiResult>> {
    let start = Instant::now();
    input.figures.validate(input.options.validation)?;

    let evaluation = evaluate(&input.figures, input.options.include_alternates)?;
    let warnings = zero_denominator_warnings(&evaluation.zeroed, None);
    let result = assemble(&evaluation, &input.options);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        METHODOLOGY,
        &assumptions(&input.options),
        warnings,
        elapsed,
        result,
    ))
}

/// Multi-period KPIs wrapped in the standard computation envelope.
pub fn calculate_periodic_kpis(
    input: &PeriodicKpiInput,
) -> FinAnalystResult<ComputationOutput<PeriodicKpiResult>> {
    let start = Instant::now();
    input.data.validate(input.options.validation)?;

    let mut warnings = Vec::new();
    let mut result = PeriodicKpiResult::default();
    for (label, figures) in input.data.iter() {
        let evaluation = evaluate(figures, input.options.include_alternates)?;
        warnings.extend(zero_denominator_warnings(&evaluation.zeroed, Some(label)));
        result.push(label, assemble(&evaluation, &input.options));
    }
    if result.is_empty() {
        warnings.push("No periods supplied; result is empty.".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        METHODOLOGY,
        &assumptions(&input.options),
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

const METHODOLOGY: &str = "Balance sheet and income statement KPIs (zero-denominator ratios reported as 0)";

/// Raw metric values for one period plus the ratios whose denominator was zero.
struct Evaluation {
    values: Vec<(Metric, Decimal)>,
    zeroed: Vec<Metric>,
}

impl Evaluation {
    fn ratio(&mut self, metric: Metric, numerator: Decimal, denominator: Decimal) -> FinAnalystResult<()> {
        let value = if denominator.is_zero() {
            debug!(metric = metric.label(), "zero denominator, reporting 0");
            self.zeroed.push(metric);
            Decimal::ZERO
        } else {
            numerator
                .checked_div(denominator)
                .ok_or_else(|| overflow(metric.label()))?
        };
        self.values.push((metric, value));
        Ok(())
    }

    fn absolute(&mut self, metric: Metric, value: Decimal) {
        self.values.push((metric, value));
    }
}

fn evaluate(f: &FinancialFigures, include_alternates: bool) -> FinAnalystResult<Evaluation> {
    let s = Subtotals::from_figures(f)?;
    let mut e = Evaluation {
        values: Vec::with_capacity(Metric::CANONICAL.len() + Metric::ALTERNATES.len()),
        zeroed: Vec::new(),
    };

    let effective_debt = sum(
        "Effective Debt",
        &[f.short_term_liabilities, f.long_term_liabilities],
        &[s.current_assets],
    )?;
    let working_capital = sum(
        "Working Capital",
        &[s.current_assets],
        &[f.short_term_liabilities],
    )?;
    let fixed_assets_and_long_term = sum(
        "Equity-to-Fixed Assets Ratio II",
        &[s.non_current_assets, f.long_term_liabilities],
        &[],
    )?;
    let capital = sum("Return on Investment", &[f.equity, s.total_liabilities], &[])?;
    let quick_assets = sum("Quick Ratio", &[s.current_assets], &[f.inventories])?;

    e.absolute(Metric::Ebitda, s.ebitda);
    e.absolute(Metric::Ebit, s.ebit);
    e.absolute(Metric::NetIncome, s.net_income);
    e.ratio(Metric::EquityRatio, f.equity, s.total_assets)?;
    e.ratio(Metric::DebtRatio, s.total_liabilities, s.total_assets)?;
    e.ratio(Metric::EquityToFixedAssetsI, f.equity, s.non_current_assets)?;
    e.ratio(Metric::EquityToFixedAssetsII, f.equity, fixed_assets_and_long_term)?;
    e.absolute(Metric::EffectiveDebt, effective_debt);
    e.ratio(Metric::StaticGearing, s.total_liabilities, f.equity)?;
    e.ratio(Metric::DynamicGearing, effective_debt, f.op_cash_flow)?;
    e.ratio(Metric::IntensityOfInventories, f.inventories, s.total_assets)?;
    e.absolute(Metric::WorkingCapital, working_capital);
    e.ratio(Metric::PropertyConstitution, s.non_current_assets, s.total_assets)?;
    e.ratio(Metric::CurrentRatio, s.current_assets, f.short_term_liabilities)?;
    e.ratio(Metric::QuickRatio, quick_assets, f.short_term_liabilities)?;
    e.ratio(Metric::CashRatio, f.cash_and_cash_equivalents, f.short_term_liabilities)?;
    e.ratio(Metric::ReturnOnSales, s.net_income, f.sales_revenue)?;
    e.ratio(Metric::ReturnOnAssets, s.net_income, s.total_assets)?;
    e.ratio(Metric::ReturnOnEquity, s.net_income, f.equity)?;
    e.ratio(Metric::FrequencyOfCapitalTurnover, f.sales_revenue, s.total_assets)?;
    e.ratio(Metric::ReturnOnInvestment, s.net_income, capital)?;

    if include_alternates {
        let broad_liabilities = sum(
            "broad liabilities",
            &[
                s.total_liabilities,
                f.provisions,
                f.passive_accruals_deferrals,
            ],
            &[],
        )?;
        let gross_income = sum(
            "Return on Assets (incl. Interest)",
            &[s.net_income, f.interest_expenses],
            &[],
        )?;

        e.ratio(Metric::DebtRatioBroad, broad_liabilities, s.total_assets)?;
        e.ratio(Metric::StaticGearingBroad, broad_liabilities, f.equity)?;
        e.ratio(Metric::ReturnOnAssetsGross, gross_income, s.total_assets)?;
        e.ratio(Metric::EquityRatioOnCapitalEmployed, f.equity, capital)?;
    }

    Ok(e)
}

fn assemble(evaluation: &Evaluation, options: &KpiOptions) -> KpiResult {
    let mut result = KpiResult::default();
    for &(metric, raw) in &evaluation.values {
        let value = match options.round_dp {
            Some(dp) => raw.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
            None => raw,
        }
        .normalize();
        let entry = if options.explain {
            KpiValue::Explained {
                value,
                explanation: explain(metric, value),
            }
        } else {
            KpiValue::Bare(value)
        };
        result.push(metric, entry);
    }
    result
}

fn zero_denominator_warnings(zeroed: &[Metric], period: Option<&str>) -> Vec<String> {
    zeroed
        .iter()
        .map(|metric| match period {
            Some(label) => format!("{label}: {metric} has a zero denominator; reported as 0."),
            None => format!("{metric} has a zero denominator; reported as 0."),
        })
        .collect()
}

fn assumptions(options: &KpiOptions) -> serde_json::Value {
    serde_json::json!({
        "total_liabilities": "short_term_liabilities + long_term_liabilities",
        "zero_denominator": "ratio reported as 0",
        "validation": options.validation.to_string(),
        "rounding": options
            .round_dp
            .map(|dp| format!("{dp} dp, half away from zero"))
            .unwrap_or_else(|| "none".into()),
    })
}

/// Checked `sum(add) - sum(sub)`.
fn sum(context: &str, add: &[Decimal], sub: &[Decimal]) -> FinAnalystResult<Decimal> {
    let total = add
        .iter()
        .try_fold(Decimal::ZERO, |acc, term| acc.checked_add(*term))
        .ok_or_else(|| overflow(context))?;
    sub.iter()
        .try_fold(total, |acc, term| acc.checked_sub(*term))
        .ok_or_else(|| overflow(context))
}

fn overflow(context: &str) -> FinAnalystError {
    FinAnalystError::ArithmeticOverflow {
        context: context.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidationMode;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    /// Scenario with every line item populated.
    fn sample_figures() -> FinancialFigures {
        FinancialFigures {
            intangible_assets: dec!(1_000),
            property_plant_and_equipment: dec!(6_000),
            other_non_current_assets: dec!(1_000),
            inventories: dec!(2_000),
            trade_receivables: dec!(3_000),
            cash_and_cash_equivalents: dec!(1_000),
            other_current_assets: dec!(2_000),
            other_assets: dec!(500),
            active_accruals_deferrals: dec!(500),
            equity: dec!(8_500),
            short_term_liabilities: dec!(4_000),
            long_term_liabilities: dec!(4_000),
            provisions: dec!(600),
            passive_accruals_deferrals: dec!(400),
            sales_revenue: dec!(20_000),
            cogs: dec!(12_000),
            other_operational_expense: dec!(3_000),
            depreciation: dec!(1_000),
            interest_expenses: dec!(400),
            other_expenses: dec!(200),
            other_operational_income: dec!(500),
            other_income: dec!(100),
            interest_income: dec!(50),
            op_cash_flow: dec!(2_000),
        }
    }

    fn value(result: &KpiResult, metric: Metric) -> Decimal {
        result.value(metric).unwrap()
    }

    #[test]
    fn test_subtotals() {
        let s = Subtotals::from_figures(&sample_figures()).unwrap();
        assert_eq!(s.non_current_assets, dec!(8_000));
        assert_eq!(s.current_assets, dec!(8_000));
        assert_eq!(s.total_assets, dec!(17_000));
        assert_eq!(s.total_liabilities, dec!(8_000));
        // 20000 - 12000 - 3000 + 500
        assert_eq!(s.ebitda, dec!(5_500));
        assert_eq!(s.ebit, dec!(4_500));
        // 4500 - 400 + 50 - 200 + 100
        assert_eq!(s.net_income, dec!(4_050));
    }

    #[test]
    fn test_total_liabilities_excludes_provisions_and_accruals() {
        let mut f = sample_figures();
        let before = Subtotals::from_figures(&f).unwrap().total_liabilities;
        f.provisions = dec!(99_999);
        f.passive_accruals_deferrals = dec!(12_345);
        assert_eq!(Subtotals::from_figures(&f).unwrap().total_liabilities, before);
    }

    #[test]
    fn test_full_kpi_set() {
        let r = compute_kpis(&sample_figures(), &KpiOptions::default()).unwrap();
        assert_eq!(r.len(), 21);

        assert_eq!(value(&r, Metric::EquityRatio), dec!(8_500) / dec!(17_000));
        assert_eq!(value(&r, Metric::DebtRatio), dec!(8_000) / dec!(17_000));
        assert_eq!(value(&r, Metric::EquityToFixedAssetsI), dec!(1.0625));
        assert_eq!(value(&r, Metric::EquityToFixedAssetsII), dec!(8_500) / dec!(12_000));
        assert_eq!(value(&r, Metric::EffectiveDebt), Decimal::ZERO);
        assert_eq!(value(&r, Metric::StaticGearing), dec!(8_000) / dec!(8_500));
        assert_eq!(value(&r, Metric::DynamicGearing), Decimal::ZERO);
        assert_eq!(value(&r, Metric::IntensityOfInventories), dec!(2_000) / dec!(17_000));
        assert_eq!(value(&r, Metric::WorkingCapital), dec!(4_000));
        assert_eq!(value(&r, Metric::PropertyConstitution), dec!(8_000) / dec!(17_000));
        assert_eq!(value(&r, Metric::CurrentRatio), dec!(2));
        assert_eq!(value(&r, Metric::QuickRatio), dec!(1.5));
        assert_eq!(value(&r, Metric::CashRatio), dec!(0.25));
        assert_eq!(value(&r, Metric::ReturnOnSales), dec!(0.2025));
        assert_eq!(value(&r, Metric::ReturnOnAssets), dec!(4_050) / dec!(17_000));
        assert_eq!(value(&r, Metric::ReturnOnEquity), dec!(4_050) / dec!(8_500));
        assert_eq!(value(&r, Metric::FrequencyOfCapitalTurnover), dec!(20_000) / dec!(17_000));
        assert_eq!(value(&r, Metric::ReturnOnInvestment), dec!(4_050) / dec!(16_500));
    }

    #[test]
    fn test_output_order_is_canonical() {
        let r = compute_kpis(&sample_figures(), &KpiOptions::default()).unwrap();
        let order: Vec<Metric> = r.metrics().collect();
        assert_eq!(order, Metric::CANONICAL.to_vec());
    }

    #[test]
    fn test_dynamic_gearing_in_years() {
        let mut f = sample_figures();
        f.long_term_liabilities = dec!(10_000);
        let r = compute_kpis(&f, &KpiOptions::default()).unwrap();
        // (4000 + 10000 - 8000) / 2000
        assert_eq!(value(&r, Metric::EffectiveDebt), dec!(6_000));
        assert_eq!(value(&r, Metric::DynamicGearing), dec!(3));
    }

    #[test]
    fn test_scenario_a_equity_and_current_ratio() {
        let f = FinancialFigures {
            intangible_assets: dec!(1_000),
            property_plant_and_equipment: dec!(5_000),
            other_non_current_assets: dec!(2_000),
            inventories: dec!(2_000),
            trade_receivables: dec!(3_000),
            cash_and_cash_equivalents: dec!(2_000),
            other_current_assets: dec!(1_000),
            equity: dec!(15_000),
            short_term_liabilities: dec!(5_000),
            long_term_liabilities: dec!(8_000),
            sales_revenue: dec!(10_000),
            cogs: dec!(7_000),
            ..Default::default()
        };
        let r = compute_kpis(&f, &KpiOptions::default()).unwrap();
        assert_eq!(value(&r, Metric::EquityRatio), dec!(0.9375));
        assert_eq!(value(&r, Metric::CurrentRatio), dec!(1.6));
        assert_eq!(value(&r, Metric::Ebitda), dec!(3_000));
        assert_eq!(value(&r, Metric::NetIncome), dec!(3_000));
    }

    #[test]
    fn test_scenario_b_zero_short_term_liabilities() {
        let mut f = sample_figures();
        f.short_term_liabilities = Decimal::ZERO;
        let r = compute_kpis(&f, &KpiOptions::default()).unwrap();
        assert_eq!(value(&r, Metric::CurrentRatio), Decimal::ZERO);
        assert_eq!(value(&r, Metric::QuickRatio), Decimal::ZERO);
        assert_eq!(value(&r, Metric::CashRatio), Decimal::ZERO);
        // Differences still computed
        assert_eq!(value(&r, Metric::WorkingCapital), dec!(8_000));
    }

    #[test]
    fn test_scenario_c_zero_equity() {
        let mut f = sample_figures();
        f.equity = Decimal::ZERO;
        let r = compute_kpis(&f, &KpiOptions::default()).unwrap();
        assert_eq!(value(&r, Metric::StaticGearing), Decimal::ZERO);
        assert_eq!(value(&r, Metric::ReturnOnEquity), Decimal::ZERO);
        assert_eq!(value(&r, Metric::EquityToFixedAssetsI), Decimal::ZERO);
        assert_eq!(value(&r, Metric::EquityToFixedAssetsII), Decimal::ZERO);
        // ROI denominator is equity + liabilities, still non-zero
        assert_eq!(value(&r, Metric::ReturnOnInvestment), dec!(4_050) / dec!(8_000));
    }

    #[test]
    fn test_all_zero_figures_yield_all_zero_kpis() {
        let r = compute_kpis(&FinancialFigures::default(), &KpiOptions::default()).unwrap();
        assert_eq!(r.len(), 21);
        assert!(r.iter().all(|(_, v)| v.value().is_zero()));
    }

    #[test]
    fn test_negative_net_income_flows_through() {
        let mut f = sample_figures();
        f.cogs = dec!(25_000);
        let r = compute_kpis(&f, &KpiOptions::default()).unwrap();
        // EBITDA = 20000 - 25000 - 3000 + 500
        assert_eq!(value(&r, Metric::Ebitda), dec!(-7_500));
        assert!(value(&r, Metric::ReturnOnSales) < Decimal::ZERO);
    }

    #[test]
    fn test_idempotent() {
        let f = sample_figures();
        let options = KpiOptions {
            explain: true,
            include_alternates: true,
            ..Default::default()
        };
        let a = compute_kpis(&f, &options).unwrap();
        let b = compute_kpis(&f, &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_explain_mode_pairs_every_value() {
        let options = KpiOptions {
            explain: true,
            ..Default::default()
        };
        let r = compute_kpis(&sample_figures(), &options).unwrap();
        assert!(r.iter().all(|(_, v)| v.explanation().is_some()));
        assert_eq!(
            r.get(Metric::CurrentRatio).unwrap().explanation(),
            Some("A current ratio of 2.00 means current assets cover short-term liabilities 2.00 times.")
        );
    }

    #[test]
    fn test_explain_mode_succeeds_wherever_bare_mode_does() {
        let f = FinancialFigures {
            sales_revenue: dec!(1_000_000_000_000_000_000_000_000_000),
            ..Default::default()
        };
        let bare = compute_kpis(&f, &KpiOptions::default()).unwrap();
        let explained = compute_kpis(
            &f,
            &KpiOptions {
                explain: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(value(&bare, Metric::Ebitda), dec!(1_000_000_000_000_000_000_000_000_000));
        assert_eq!(value(&explained, Metric::Ebitda), value(&bare, Metric::Ebitda));
        assert!(explained.iter().all(|(_, v)| v.explanation().is_some()));
    }

    #[test]
    fn test_rounding_applies_to_reported_values_only() {
        let options = KpiOptions {
            round_dp: Some(4),
            ..Default::default()
        };
        let r = compute_kpis(&sample_figures(), &options).unwrap();
        // 8500 / 17000 = 0.5 exactly; 2000 / 17000 = 0.117647...
        assert_eq!(value(&r, Metric::EquityRatio), dec!(0.5));
        assert_eq!(value(&r, Metric::IntensityOfInventories), dec!(0.1176));
        // Ratios built on unrounded net income
        assert_eq!(value(&r, Metric::ReturnOnEquity), dec!(0.4765));
    }

    #[test]
    fn test_alternates_appended_after_canonical() {
        let options = KpiOptions {
            include_alternates: true,
            ..Default::default()
        };
        let r = compute_kpis(&sample_figures(), &options).unwrap();
        assert_eq!(r.len(), 25);
        let tail: Vec<Metric> = r.metrics().skip(21).collect();
        assert_eq!(tail, Metric::ALTERNATES.to_vec());

        // (8000 + 600 + 400) / 17000
        assert_eq!(value(&r, Metric::DebtRatioBroad), dec!(9_000) / dec!(17_000));
        assert_eq!(value(&r, Metric::StaticGearingBroad), dec!(9_000) / dec!(8_500));
        assert_eq!(value(&r, Metric::ReturnOnAssetsGross), dec!(4_450) / dec!(17_000));
        assert_eq!(value(&r, Metric::EquityRatioOnCapitalEmployed), dec!(8_500) / dec!(16_500));
        // Canonical values unchanged by the alternates
        assert_eq!(value(&r, Metric::DebtRatio), dec!(8_000) / dec!(17_000));
    }

    #[test]
    fn test_strict_validation_rejects_zero_line_item() {
        let mut f = sample_figures();
        f.other_income = Decimal::ZERO;
        let options = KpiOptions {
            validation: ValidationMode::Strict,
            ..Default::default()
        };
        match compute_kpis(&f, &options).unwrap_err() {
            FinAnalystError::InvalidInput { field, .. } => assert_eq!(field, "other_income"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
        assert!(compute_kpis(&sample_figures(), &options).is_ok());
    }

    #[test]
    fn test_overflow_is_an_error_not_a_panic() {
        let f = FinancialFigures {
            intangible_assets: Decimal::MAX,
            property_plant_and_equipment: Decimal::MAX,
            ..Default::default()
        };
        match compute_kpis(&f, &KpiOptions::default()).unwrap_err() {
            FinAnalystError::ArithmeticOverflow { context } => {
                assert_eq!(context, "non_current_assets")
            }
            other => panic!("Expected ArithmeticOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_warns_on_zero_denominators() {
        let input = KpiInput {
            figures: FinancialFigures {
                equity: dec!(100),
                ..Default::default()
            },
            options: KpiOptions::default(),
        };
        let out = calculate_kpis(&input).unwrap();
        assert!(out
            .warnings
            .iter()
            .any(|w| w == "Current Ratio has a zero denominator; reported as 0."));
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert_eq!(out.assumptions["validation"], "lenient");
    }

    #[test]
    fn test_periodic_matches_single_period() {
        let mut later = sample_figures();
        later.sales_revenue = dec!(30_000);
        let periods = PeriodedFigures::new()
            .with_period("2022", sample_figures())
            .unwrap()
            .with_period("2023", later.clone())
            .unwrap();
        let options = KpiOptions::default();
        let r = compute_periodic_kpis(&periods, &options).unwrap();

        assert_eq!(r.labels().collect::<Vec<_>>(), vec!["2022", "2023"]);
        assert_eq!(
            r.get("2022").unwrap(),
            &compute_kpis(&sample_figures(), &options).unwrap()
        );
        assert_eq!(r.get("2023").unwrap(), &compute_kpis(&later, &options).unwrap());
    }

    #[test]
    fn test_periodic_envelope_labels_warnings() {
        let input = PeriodicKpiInput {
            data: PeriodedFigures::new()
                .with_period("FY23", FinancialFigures::default())
                .unwrap(),
            options: KpiOptions::default(),
        };
        let out = calculate_periodic_kpis(&input).unwrap();
        assert!(out.warnings.iter().all(|w| w.starts_with("FY23: ")));
        assert_eq!(out.result.len(), 1);
    }
}
