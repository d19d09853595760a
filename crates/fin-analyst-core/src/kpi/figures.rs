use rust_decimal::Decimal;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Money, ValidationMode};
use crate::{FinAnalystError, FinAnalystResult};

// ---------------------------------------------------------------------------
// Single period
// ---------------------------------------------------------------------------

/// One reporting period of balance sheet and income statement figures.
///
/// Every field is optional on input; absent and `null` fields are zero.
/// Unknown fields are rejected so a misspelt line item cannot silently
/// become zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinancialFigures {
    // Non-current assets
    #[serde(deserialize_with = "zero_if_null")]
    pub intangible_assets: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub property_plant_and_equipment: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_non_current_assets: Money,
    // Current assets
    #[serde(deserialize_with = "zero_if_null")]
    pub inventories: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub trade_receivables: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub cash_and_cash_equivalents: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_current_assets: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_assets: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub active_accruals_deferrals: Money,
    // Equity and liabilities
    #[serde(deserialize_with = "zero_if_null")]
    pub equity: Money,
    #[serde(
        alias = "short_term_and_current_liabilities",
        deserialize_with = "zero_if_null"
    )]
    pub short_term_liabilities: Money,
    #[serde(
        alias = "long_term_debt_and_non_current_liabilities",
        deserialize_with = "zero_if_null"
    )]
    pub long_term_liabilities: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub provisions: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub passive_accruals_deferrals: Money,
    // Income statement
    #[serde(deserialize_with = "zero_if_null")]
    pub sales_revenue: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub cogs: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_operational_expense: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub depreciation: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub interest_expenses: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_expenses: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_operational_income: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub other_income: Money,
    #[serde(deserialize_with = "zero_if_null")]
    pub interest_income: Money,
    // Cash flow
    #[serde(deserialize_with = "zero_if_null")]
    pub op_cash_flow: Money,
}

fn zero_if_null<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Money>::deserialize(deserializer)?.unwrap_or_default())
}

impl FinancialFigures {
    /// Every line item paired with its field name, in declaration order.
    pub fn fields(&self) -> [(&'static str, Money); 24] {
        [
            ("intangible_assets", self.intangible_assets),
            ("property_plant_and_equipment", self.property_plant_and_equipment),
            ("other_non_current_assets", self.other_non_current_assets),
            ("inventories", self.inventories),
            ("trade_receivables", self.trade_receivables),
            ("cash_and_cash_equivalents", self.cash_and_cash_equivalents),
            ("other_current_assets", self.other_current_assets),
            ("other_assets", self.other_assets),
            ("active_accruals_deferrals", self.active_accruals_deferrals),
            ("equity", self.equity),
            ("short_term_liabilities", self.short_term_liabilities),
            ("long_term_liabilities", self.long_term_liabilities),
            ("provisions", self.provisions),
            ("passive_accruals_deferrals", self.passive_accruals_deferrals),
            ("sales_revenue", self.sales_revenue),
            ("cogs", self.cogs),
            ("other_operational_expense", self.other_operational_expense),
            ("depreciation", self.depreciation),
            ("interest_expenses", self.interest_expenses),
            ("other_expenses", self.other_expenses),
            ("other_operational_income", self.other_operational_income),
            ("other_income", self.other_income),
            ("interest_income", self.interest_income),
            ("op_cash_flow", self.op_cash_flow),
        ]
    }

    /// Check the figures against the requested validation mode.
    pub fn validate(&self, mode: ValidationMode) -> FinAnalystResult<()> {
        match mode {
            ValidationMode::Lenient => Ok(()),
            ValidationMode::Strict => {
                for (field, value) in self.fields() {
                    if value <= Decimal::ZERO {
                        return Err(FinAnalystError::InvalidInput {
                            field: field.into(),
                            reason: "must be greater than zero in strict validation mode".into(),
                        });
                    }
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Multiple periods
// ---------------------------------------------------------------------------

/// Figures for several reporting periods, keyed by a caller-chosen label.
///
/// Serialised as a JSON object. Period order is the order in which the
/// caller supplied the labels and survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodedFigures {
    periods: Vec<(String, FinancialFigures)>,
}

impl PeriodedFigures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a period. Labels must be unique.
    pub fn insert(
        &mut self,
        label: impl Into<String>,
        figures: FinancialFigures,
    ) -> FinAnalystResult<()> {
        let label = label.into();
        if self.get(&label).is_some() {
            return Err(FinAnalystError::InvalidInput {
                field: label,
                reason: "duplicate period label".into(),
            });
        }
        self.periods.push((label, figures));
        Ok(())
    }

    /// Builder form of [`PeriodedFigures::insert`].
    pub fn with_period(
        mut self,
        label: impl Into<String>,
        figures: FinancialFigures,
    ) -> FinAnalystResult<Self> {
        self.insert(label, figures)?;
        Ok(self)
    }

    pub fn get(&self, label: &str) -> Option<&FinancialFigures> {
        self.periods
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, figures)| figures)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.periods.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FinancialFigures)> {
        self.periods
            .iter()
            .map(|(label, figures)| (label.as_str(), figures))
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Validate every period; a strict-mode failure names `<period>.<field>`.
    pub fn validate(&self, mode: ValidationMode) -> FinAnalystResult<()> {
        for (label, figures) in self.iter() {
            figures.validate(mode).map_err(|e| match e {
                FinAnalystError::InvalidInput { field, reason } => FinAnalystError::InvalidInput {
                    field: format!("{label}.{field}"),
                    reason,
                },
                other => other,
            })?;
        }
        Ok(())
    }
}

impl Serialize for PeriodedFigures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.periods.len()))?;
        for (label, figures) in &self.periods {
            map.serialize_entry(label, figures)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PeriodedFigures {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PeriodedFiguresVisitor)
    }
}

struct PeriodedFiguresVisitor;

impl<'de> Visitor<'de> for PeriodedFiguresVisitor {
    type Value = PeriodedFigures;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of period labels to financial figures")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut periods = PeriodedFigures::new();
        while let Some((label, figures)) = access.next_entry::<String, FinancialFigures>()? {
            periods.insert(label, figures).map_err(de::Error::custom)?;
        }
        Ok(periods)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
