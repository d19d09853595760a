use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::metric::{Metric, MetricKind};

/// Render the fixed explanation sentence for a metric.
///
/// `v` is the reported value to two decimals; `p` is the value x 100, only
/// used by percentage metrics. A share too large to scale is shown unscaled.
/// The output depends on nothing but the inputs.
pub fn explain(metric: Metric, value: Decimal) -> String {
    let v = two_places(value);
    let p = match metric.kind() {
        MetricKind::Percentage => two_places(value.checked_mul(dec!(100)).unwrap_or(value)),
        MetricKind::Absolute | MetricKind::Multiple | MetricKind::Years => v.clone(),
    };

    let text = match metric {
        Metric::Ebitda => format!(
            "EBITDA of {v} is the operating result before interest, taxes, depreciation and amortization."
        ),
        Metric::Ebit => format!(
            "EBIT of {v} is the operating result after depreciation, before interest and taxes."
        ),
        Metric::NetIncome => format!(
            "Net income of {v} is the result after interest and all other income and expenses."
        ),
        Metric::EquityRatio => format!(
            "An equity ratio of {v} means {p}% of total assets are financed with equity."
        ),
        Metric::DebtRatio => format!(
            "A debt ratio of {v} means {p}% of total assets are financed with short- and long-term liabilities."
        ),
        Metric::EquityToFixedAssetsI => format!(
            "Equity covers {p}% of non-current assets (equity-to-fixed assets ratio I of {v})."
        ),
        Metric::EquityToFixedAssetsII => format!(
            "Equity covers {p}% of non-current assets plus long-term liabilities (equity-to-fixed assets ratio II of {v})."
        ),
        Metric::EffectiveDebt => format!(
            "Effective debt of {v} is what remains of short- and long-term liabilities after deducting current assets."
        ),
        Metric::StaticGearing => format!(
            "A static gearing of {v} means liabilities amount to {v} times equity."
        ),
        Metric::DynamicGearing => format!(
            "A dynamic gearing of {v} means operating cash flow would repay the effective debt in {v} years."
        ),
        Metric::IntensityOfInventories => format!(
            "Inventories make up {p}% of total assets (intensity of inventories of {v})."
        ),
        Metric::WorkingCapital => format!(
            "Working capital of {v} is the surplus of current assets over short-term liabilities."
        ),
        Metric::PropertyConstitution => format!(
            "Non-current assets make up {p}% of total assets (property constitution of {v})."
        ),
        Metric::CurrentRatio => format!(
            "A current ratio of {v} means current assets cover short-term liabilities {v} times."
        ),
        Metric::QuickRatio => format!(
            "A quick ratio of {v} means current assets excluding inventories cover short-term liabilities {v} times."
        ),
        Metric::CashRatio => format!(
            "A cash ratio of {v} means cash and cash equivalents cover short-term liabilities {v} times."
        ),
        Metric::ReturnOnSales => format!(
            "A return on sales of {p}% means each unit of sales revenue yields {v} of net income."
        ),
        Metric::ReturnOnAssets => format!(
            "A return on assets of {p}% means net income amounts to {p}% of total assets."
        ),
        Metric::ReturnOnEquity => format!(
            "A return on equity of {p}% means net income amounts to {p}% of equity."
        ),
        Metric::FrequencyOfCapitalTurnover => format!(
            "A capital turnover of {v} means sales revenue turned over total assets {v} times."
        ),
        Metric::ReturnOnInvestment => format!(
            "A return on investment of {p}% means net income amounts to {p}% of equity plus liabilities."
        ),
        Metric::DebtRatioBroad => format!(
            "Including provisions and passive accruals, {p}% of total assets are financed with outside capital."
        ),
        Metric::StaticGearingBroad => format!(
            "Including provisions and passive accruals, outside capital amounts to {v} times equity."
        ),
        Metric::ReturnOnAssetsGross => format!(
            "Net income plus interest expenses amounts to {p}% of total assets."
        ),
        Metric::EquityRatioOnCapitalEmployed => format!(
            "Equity makes up {p}% of equity plus short- and long-term liabilities."
        ),
    };
    text
}

fn two_places(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}
