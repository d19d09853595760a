use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fin_analyst_core::kpi::{
    self, EarningsInput, FinancialFigures, KpiInput, PeriodedFigures, PeriodicKpiInput,
};
use fin_analyst_core::KpiOptions;

use crate::config;
use crate::input;

/// Arguments for a single-period KPI calculation.
///
/// Omitted figures are 0. `--input` or piped stdin replaces the flags and may
/// either be the bare figures or `{"figures": ..., "options": ...}`.
#[derive(Args, Default)]
#[command(allow_hyphen_values = true)]
pub struct KpiArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Intangible assets
    #[arg(long)]
    pub intangible_assets: Option<Decimal>,

    /// Property, plant and equipment
    #[arg(long, alias = "ppe")]
    pub property_plant_and_equipment: Option<Decimal>,

    /// Other non-current assets
    #[arg(long)]
    pub other_non_current_assets: Option<Decimal>,

    /// Inventories
    #[arg(long)]
    pub inventories: Option<Decimal>,

    /// Trade receivables
    #[arg(long)]
    pub trade_receivables: Option<Decimal>,

    /// Cash and cash equivalents
    #[arg(long, alias = "cash")]
    pub cash_and_cash_equivalents: Option<Decimal>,

    /// Other current assets
    #[arg(long)]
    pub other_current_assets: Option<Decimal>,

    /// Other assets
    #[arg(long)]
    pub other_assets: Option<Decimal>,

    /// Active (prepaid) accruals and deferrals
    #[arg(long)]
    pub active_accruals_deferrals: Option<Decimal>,

    /// Equity
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Short-term and current liabilities
    #[arg(long)]
    pub short_term_liabilities: Option<Decimal>,

    /// Long-term debt and non-current liabilities
    #[arg(long)]
    pub long_term_liabilities: Option<Decimal>,

    /// Provisions
    #[arg(long)]
    pub provisions: Option<Decimal>,

    /// Passive (deferred income) accruals and deferrals
    #[arg(long)]
    pub passive_accruals_deferrals: Option<Decimal>,

    /// Sales revenue
    #[arg(long, alias = "revenue")]
    pub sales_revenue: Option<Decimal>,

    /// Cost of goods sold
    #[arg(long)]
    pub cogs: Option<Decimal>,

    /// Other operational expense
    #[arg(long)]
    pub other_operational_expense: Option<Decimal>,

    /// Depreciation
    #[arg(long)]
    pub depreciation: Option<Decimal>,

    /// Interest expenses
    #[arg(long)]
    pub interest_expenses: Option<Decimal>,

    /// Other expenses
    #[arg(long)]
    pub other_expenses: Option<Decimal>,

    /// Other operational income
    #[arg(long)]
    pub other_operational_income: Option<Decimal>,

    /// Other income
    #[arg(long)]
    pub other_income: Option<Decimal>,

    /// Interest income
    #[arg(long)]
    pub interest_income: Option<Decimal>,

    /// Operating cash flow
    #[arg(long, alias = "ocf")]
    pub op_cash_flow: Option<Decimal>,
}

impl KpiArgs {
    fn figures(&self) -> FinancialFigures {
        FinancialFigures {
            intangible_assets: self.intangible_assets.unwrap_or_default(),
            property_plant_and_equipment: self.property_plant_and_equipment.unwrap_or_default(),
            other_non_current_assets: self.other_non_current_assets.unwrap_or_default(),
            inventories: self.inventories.unwrap_or_default(),
            trade_receivables: self.trade_receivables.unwrap_or_default(),
            cash_and_cash_equivalents: self.cash_and_cash_equivalents.unwrap_or_default(),
            other_current_assets: self.other_current_assets.unwrap_or_default(),
            other_assets: self.other_assets.unwrap_or_default(),
            active_accruals_deferrals: self.active_accruals_deferrals.unwrap_or_default(),
            equity: self.equity.unwrap_or_default(),
            short_term_liabilities: self.short_term_liabilities.unwrap_or_default(),
            long_term_liabilities: self.long_term_liabilities.unwrap_or_default(),
            provisions: self.provisions.unwrap_or_default(),
            passive_accruals_deferrals: self.passive_accruals_deferrals.unwrap_or_default(),
            sales_revenue: self.sales_revenue.unwrap_or_default(),
            cogs: self.cogs.unwrap_or_default(),
            other_operational_expense: self.other_operational_expense.unwrap_or_default(),
            depreciation: self.depreciation.unwrap_or_default(),
            interest_expenses: self.interest_expenses.unwrap_or_default(),
            other_expenses: self.other_expenses.unwrap_or_default(),
            other_operational_income: self.other_operational_income.unwrap_or_default(),
            other_income: self.other_income.unwrap_or_default(),
            interest_income: self.interest_income.unwrap_or_default(),
            op_cash_flow: self.op_cash_flow.unwrap_or_default(),
        }
    }
}

/// Arguments for a multi-period KPI calculation
#[derive(Args)]
pub struct PeriodsArgs {
    /// Path to JSON or YAML input file keyed by period label
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for quick earnings. Omitted figures are 0.
#[derive(Args, Default)]
#[command(allow_hyphen_values = true)]
pub struct EarningsArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Sales revenue
    #[arg(long, alias = "revenue")]
    pub sales_revenue: Option<Decimal>,

    /// Cost of goods sold
    #[arg(long)]
    pub cogs: Option<Decimal>,

    /// Equity
    #[arg(long)]
    pub equity: Option<Decimal>,
}

impl EarningsArgs {
    fn figures(&self) -> EarningsInput {
        EarningsInput {
            sales_revenue: self.sales_revenue.unwrap_or_default(),
            cogs: self.cogs.unwrap_or_default(),
            equity: self.equity.unwrap_or_default(),
        }
    }
}

pub fn run_kpis(args: KpiArgs, options: &KpiOptions) -> Result<Value, Box<dyn std::error::Error>> {
    let kpi_input = match input::load::<Value>(args.input.as_deref())? {
        Some(document) => single_period_input(document, options)?,
        None => KpiInput {
            figures: args.figures(),
            options: options.clone(),
        },
    };
    let result = kpi::calculate_kpis(&kpi_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_periods(
    args: PeriodsArgs,
    options: &KpiOptions,
) -> Result<Value, Box<dyn std::error::Error>> {
    let document = input::load::<Value>(args.input.as_deref())?
        .ok_or("--input is required (or pipe periods on stdin)")?;
    let periodic_input = multi_period_input(document, options)?;
    let result = kpi::calculate_periodic_kpis(&periodic_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_earnings(
    args: EarningsArgs,
    options: &KpiOptions,
) -> Result<Value, Box<dyn std::error::Error>> {
    let earnings_input: EarningsInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => args.figures(),
    };
    let result = kpi::quick_earnings(&earnings_input, options.validation)?;
    Ok(serde_json::to_value(result)?)
}

/// Accept either the `{"figures", "options"}` envelope or bare figures.
fn single_period_input(
    document: Value,
    flags: &KpiOptions,
) -> Result<KpiInput, Box<dyn std::error::Error>> {
    if document.get("figures").is_some() {
        let parsed: KpiInput = serde_json::from_value(document.clone())?;
        let embedded = document.get("options").map(|_| parsed.options);
        return Ok(KpiInput {
            figures: parsed.figures,
            options: config::merge(flags, embedded),
        });
    }
    Ok(KpiInput {
        figures: serde_json::from_value(document)?,
        options: flags.clone(),
    })
}

/// Accept either the `{"data", "options"}` envelope or periods keyed by label.
fn multi_period_input(
    document: Value,
    flags: &KpiOptions,
) -> Result<PeriodicKpiInput, Box<dyn std::error::Error>> {
    let is_envelope = document.as_object().is_some_and(|map| {
        map.contains_key("data") && map.keys().all(|k| k == "data" || k == "options")
    });
    if is_envelope {
        let parsed: PeriodicKpiInput = serde_json::from_value(document.clone())?;
        let embedded = document.get("options").map(|_| parsed.options);
        return Ok(PeriodicKpiInput {
            data: parsed.data,
            options: config::merge(flags, embedded),
        });
    }
    let data: PeriodedFigures = serde_json::from_value(document)?;
    Ok(PeriodicKpiInput {
        data,
        options: flags.clone(),
    })
}
