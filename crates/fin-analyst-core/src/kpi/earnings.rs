use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate, ValidationMode};
use crate::{FinAnalystError, FinAnalystResult};

/// Minimal figures for a quick profitability check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EarningsInput {
    pub sales_revenue: Money,
    pub cogs: Money,
    pub equity: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsOutput {
    /// Sales revenue less cost of goods sold
    pub earnings: Money,
    /// Earnings over equity, 0 when equity is 0
    pub return_on_equity: Rate,
}

impl EarningsInput {
    /// Same rule as [`FinancialFigures::validate`](super::FinancialFigures::validate).
    pub fn validate(&self, mode: ValidationMode) -> FinAnalystResult<()> {
        if mode == ValidationMode::Lenient {
            return Ok(());
        }
        for (field, value) in [
            ("sales_revenue", self.sales_revenue),
            ("cogs", self.cogs),
            ("equity", self.equity),
        ] {
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

/// Gross earnings and the return they represent on equity.
pub fn quick_earnings(
    input: &EarningsInput,
    validation: ValidationMode,
) -> FinAnalystResult<EarningsOutput> {
    input.validate(validation)?;
    let earnings = input
        .sales_revenue
        .checked_sub(input.cogs)
        .ok_or_else(|| FinAnalystError::ArithmeticOverflow {
            context: "earnings".into(),
        })?;
    let return_on_equity = if input.equity.is_zero() {
        Decimal::ZERO
    } else {
        earnings
            .checked_div(input.equity)
            .ok_or_else(|| FinAnalystError::ArithmeticOverflow {
                context: "return_on_equity".into(),
            })?
    };
    Ok(EarningsOutput {
        earnings,
        return_on_equity,
    })
}
