use serde::{Deserialize, Serialize};
use std::fmt;

/// Every figure the KPI engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Ebitda,
    Ebit,
    NetIncome,
    EquityRatio,
    DebtRatio,
    EquityToFixedAssetsI,
    EquityToFixedAssetsII,
    EffectiveDebt,
    StaticGearing,
    DynamicGearing,
    IntensityOfInventories,
    WorkingCapital,
    PropertyConstitution,
    CurrentRatio,
    QuickRatio,
    CashRatio,
    ReturnOnSales,
    ReturnOnAssets,
    ReturnOnEquity,
    FrequencyOfCapitalTurnover,
    ReturnOnInvestment,
    // Alternate formula variants, reported under their own names
    DebtRatioBroad,
    StaticGearingBroad,
    ReturnOnAssetsGross,
    EquityRatioOnCapitalEmployed,
}

/// How a metric's value reads, which drives its explanation template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// A money amount
    Absolute,
    /// A share of a whole, explained as value x 100 percent
    Percentage,
    /// A coverage or turnover multiple
    Multiple,
    /// A duration in years
    Years,
}

impl Metric {
    /// The canonical metric set in reporting order.
    pub const CANONICAL: [Metric; 21] = [
        Metric::Ebitda,
        Metric::Ebit,
        Metric::NetIncome,
        Metric::EquityRatio,
        Metric::DebtRatio,
        Metric::EquityToFixedAssetsI,
        Metric::EquityToFixedAssetsII,
        Metric::EffectiveDebt,
        Metric::StaticGearing,
        Metric::DynamicGearing,
        Metric::IntensityOfInventories,
        Metric::WorkingCapital,
        Metric::PropertyConstitution,
        Metric::CurrentRatio,
        Metric::QuickRatio,
        Metric::CashRatio,
        Metric::ReturnOnSales,
        Metric::ReturnOnAssets,
        Metric::ReturnOnEquity,
        Metric::FrequencyOfCapitalTurnover,
        Metric::ReturnOnInvestment,
    ];

    pub const ALTERNATES: [Metric; 4] = [
        Metric::DebtRatioBroad,
        Metric::StaticGearingBroad,
        Metric::ReturnOnAssetsGross,
        Metric::EquityRatioOnCapitalEmployed,
    ];

    /// Human-readable name used as the key in every result mapping.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ebitda => "EBITDA",
            Self::Ebit => "EBIT",
            Self::NetIncome => "Net Income",
            Self::EquityRatio => "Equity Ratio",
            Self::DebtRatio => "Debt Ratio",
            Self::EquityToFixedAssetsI => "Equity-to-Fixed Assets Ratio I",
            Self::EquityToFixedAssetsII => "Equity-to-Fixed Assets Ratio II",
            Self::EffectiveDebt => "Effective Debt",
            Self::StaticGearing => "Static Gearing",
            Self::DynamicGearing => "Dynamic Gearing in years",
            Self::IntensityOfInventories => "Intensity of Inventories",
            Self::WorkingCapital => "Working Capital",
            Self::PropertyConstitution => "Property Constitution",
            Self::CurrentRatio => "Current Ratio",
            Self::QuickRatio => "Quick Ratio",
            Self::CashRatio => "Cash Ratio",
            Self::ReturnOnSales => "Return on Sales",
            Self::ReturnOnAssets => "Return on Assets",
            Self::ReturnOnEquity => "Return on Equity",
            Self::FrequencyOfCapitalTurnover => "Frequency of Capital Turnover",
            Self::ReturnOnInvestment => "Return on Investment",
            Self::DebtRatioBroad => "Debt Ratio (incl. Provisions & Accruals)",
            Self::StaticGearingBroad => "Static Gearing (incl. Provisions & Accruals)",
            Self::ReturnOnAssetsGross => "Return on Assets (incl. Interest)",
            Self::EquityRatioOnCapitalEmployed => "Equity Ratio (on Capital Employed)",
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Self::Ebitda
            | Self::Ebit
            | Self::NetIncome
            | Self::EffectiveDebt
            | Self::WorkingCapital => MetricKind::Absolute,
            Self::EquityRatio
            | Self::DebtRatio
            | Self::EquityToFixedAssetsI
            | Self::EquityToFixedAssetsII
            | Self::IntensityOfInventories
            | Self::PropertyConstitution
            | Self::ReturnOnSales
            | Self::ReturnOnAssets
            | Self::ReturnOnEquity
            | Self::ReturnOnInvestment
            | Self::DebtRatioBroad
            | Self::ReturnOnAssetsGross
            | Self::EquityRatioOnCapitalEmployed => MetricKind::Percentage,
            Self::StaticGearing
            | Self::StaticGearingBroad
            | Self::CurrentRatio
            | Self::QuickRatio
            | Self::CashRatio
            | Self::FrequencyOfCapitalTurnover => MetricKind::Multiple,
            Self::DynamicGearing => MetricKind::Years,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
