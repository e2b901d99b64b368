//! Funeral benefit calculation.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::StatutoryTables;
use crate::error::EngineResult;
use crate::models::{AuditStep, AverageWage};

use super::rounding::{round_won, wage_multiple};

/// The result of a funeral benefit calculation.
#[derive(Debug, Clone, Serialize)]
pub struct FuneralBenefitResult {
    /// The benefit in whole won.
    pub amount: Decimal,
    /// `wage * day_multiplier` before any statutory bound, rounded.
    pub unbounded_amount: Decimal,
    /// True if the statutory minimum or maximum changed the amount.
    pub bounded: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the funeral benefit as 120 days of average wage.
///
/// No statutory bound is applied; see [`calculate_bounded_funeral_benefit`]
/// for the amount actually paid out under the yearly minimum and maximum.
///
/// # Examples
///
/// ```
/// use sanjae_benefit_engine::calculation::calculate_funeral_benefit;
/// use sanjae_benefit_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let result = calculate_funeral_benefit(Decimal::from(100_000), loader.latest_tables(), 1).unwrap();
/// assert_eq!(result.amount, Decimal::from(12_000_000));
/// ```
pub fn calculate_funeral_benefit(
    average_wage: Decimal,
    tables: &StatutoryTables,
    step_number: u32,
) -> EngineResult<FuneralBenefitResult> {
    let wage = AverageWage::new(average_wage)?.amount();
    let rule = tables.funeral_rule();
    let amount = round_won(wage_multiple(wage, rule.day_multiplier)?);

    let audit_step = AuditStep {
        step_number,
        rule_id: "funeral_benefit".to_string(),
        rule_name: "Funeral Benefit".to_string(),
        clause_ref: rule.clause.clone(),
        input: serde_json::json!({
            "average_wage": wage.normalize().to_string(),
            "day_multiplier": rule.day_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.to_string()
        }),
        reasoning: format!(
            "{} x {} days = {}",
            wage.normalize(),
            rule.day_multiplier.normalize(),
            amount
        ),
    };

    Ok(FuneralBenefitResult {
        amount,
        unbounded_amount: amount,
        bounded: false,
        audit_step,
    })
}

/// Calculates the funeral benefit limited to the year's statutory minimum
/// and maximum amounts.
pub fn calculate_bounded_funeral_benefit(
    average_wage: Decimal,
    tables: &StatutoryTables,
    step_number: u32,
) -> EngineResult<FuneralBenefitResult> {
    let wage = AverageWage::new(average_wage)?.amount();
    let rule = tables.funeral_rule();
    let bounds = tables.funeral_bounds();

    let unbounded_amount = round_won(wage_multiple(wage, rule.day_multiplier)?);
    let amount = unbounded_amount.clamp(bounds.min_amount, bounds.max_amount);
    let bounded = amount != unbounded_amount;

    let reasoning = if amount > unbounded_amount {
        format!(
            "{} x {} days = {} is below the statutory minimum - raised to {}",
            wage.normalize(),
            rule.day_multiplier.normalize(),
            unbounded_amount,
            amount.normalize()
        )
    } else if amount < unbounded_amount {
        format!(
            "{} x {} days = {} exceeds the statutory maximum - lowered to {}",
            wage.normalize(),
            rule.day_multiplier.normalize(),
            unbounded_amount,
            amount.normalize()
        )
    } else {
        format!(
            "{} x {} days = {} (within {} - {})",
            wage.normalize(),
            rule.day_multiplier.normalize(),
            amount,
            bounds.min_amount.normalize(),
            bounds.max_amount.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "funeral_benefit_bounded".to_string(),
        rule_name: "Funeral Benefit (Statutory Bounds)".to_string(),
        clause_ref: rule.clause.clone(),
        input: serde_json::json!({
            "average_wage": wage.normalize().to_string(),
            "day_multiplier": rule.day_multiplier.normalize().to_string(),
            "min_amount": bounds.min_amount.normalize().to_string(),
            "max_amount": bounds.max_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "unbounded_amount": unbounded_amount.to_string(),
            "amount": amount.normalize().to_string(),
            "bounded": bounded
        }),
        reasoning,
    };

    Ok(FuneralBenefitResult {
        amount,
        unbounded_amount,
        bounded,
        audit_step,
    })
}
