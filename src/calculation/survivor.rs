//! Survivor compensation pension estimate.
//!
//! The annual pension is a basic share of one year's wage plus an addition
//! for each qualified survivor, with the additions capped.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::config::StatutoryTables;
use crate::error::EngineResult;
use crate::models::{AuditStep, AverageWage};

use super::rounding::{round_won, wage_multiple};

/// The result of a survivor pension calculation.
#[derive(Debug, Clone, Serialize)]
pub struct SurvivorPensionResult {
    /// The number of qualified survivors counted for additions.
    pub qualified_survivors: u32,
    /// The total rate applied to one year's wage.
    pub applied_rate: Decimal,
    /// The annual pension in whole won.
    pub annual_amount: Decimal,
    /// One monthly instalment of the annual pension.
    pub monthly_amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the survivor pension.
///
/// `annual = wage * 365 * (0.47 + min(0.05 * survivors, 0.20))`, rounded
/// once. The monthly amount divides the rounded annual figure into the
/// disability pension's instalments per year.
///
/// # Errors
///
/// Returns `InvalidWage` for a non-positive wage or one too large to
/// multiply into a yearly amount.
pub fn calculate_survivor_pension(
    average_wage: Decimal,
    qualified_survivors: u32,
    tables: &StatutoryTables,
    step_number: u32,
) -> EngineResult<SurvivorPensionResult> {
    let wage = AverageWage::new(average_wage)?.amount();
    let rule = tables.survivor_pension_rule();

    let addition = (rule.additional_rate_per_survivor * Decimal::from(qualified_survivors))
        .min(rule.max_additional_rate);
    let applied_rate = rule.basic_rate + addition;

    let annual_amount = round_won(wage_multiple(wage, rule.days_per_year * applied_rate)?);
    let installments = Decimal::from(tables.disability_pension_rule().installments_per_year);
    let monthly_amount = round_won(annual_amount / installments);

    let audit_step = AuditStep {
        step_number,
        rule_id: "survivor_pension".to_string(),
        rule_name: "Survivor Compensation Pension".to_string(),
        clause_ref: rule.clause.clone(),
        input: serde_json::json!({
            "average_wage": wage.normalize().to_string(),
            "qualified_survivors": qualified_survivors,
            "basic_rate": rule.basic_rate.normalize().to_string(),
            "additional_rate": addition.normalize().to_string()
        }),
        output: serde_json::json!({
            "applied_rate": applied_rate.normalize().to_string(),
            "annual_amount": annual_amount.to_string(),
            "monthly_amount": monthly_amount.to_string()
        }),
        reasoning: format!(
            "{} x {} days x {}% ({} survivors) = {} per year",
            wage.normalize(),
            rule.days_per_year.normalize(),
            (applied_rate * Decimal::ONE_HUNDRED).normalize(),
            qualified_survivors,
            annual_amount
        ),
    };

    Ok(SurvivorPensionResult {
        qualified_survivors,
        applied_rate,
        annual_amount,
        monthly_amount,
        audit_step,
    })
}

/// Returns the fewest qualified survivors that reach the capped addition.
pub fn survivors_for_maximum_addition(tables: &StatutoryTables) -> u32 {
    let rule = tables.survivor_pension_rule();
    rule.max_additional_rate
        .checked_div(rule.additional_rate_per_survivor)
        .and_then(|count| count.ceil().to_u32())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{dec, tables};
    use crate::error::EngineError;

    #[test]
    fn test_basic_rate_without_additional_survivors() {
        let tables = tables();
        let result = calculate_survivor_pension(dec("100000"), 0, &tables, 1).unwrap();

        assert_eq!(result.applied_rate, dec("0.47"));
        assert_eq!(result.annual_amount, dec("17155000"));
        assert_eq!(result.monthly_amount, dec("1429583"));
    }

    #[test]
    fn test_one_additional_survivor() {
        let tables = tables();
        let result = calculate_survivor_pension(dec("100000"), 1, &tables, 1).unwrap();

        assert_eq!(result.applied_rate, dec("0.52"));
        assert_eq!(result.annual_amount, dec("18980000"));
    }

    #[test]
    fn test_additions_are_capped() {
        let tables = tables();
        let four = calculate_survivor_pension(dec("100000"), 4, &tables, 1).unwrap();
        let ten = calculate_survivor_pension(dec("100000"), 10, &tables, 1).unwrap();

        assert_eq!(four.applied_rate, dec("0.67"));
        assert_eq!(ten.applied_rate, dec("0.67"));
        assert_eq!(four.annual_amount, dec("24455000"));
        assert_eq!(four.annual_amount, ten.annual_amount);
    }

    #[test]
    fn test_survivors_for_maximum_addition() {
        let tables = tables();
        assert_eq!(survivors_for_maximum_addition(&tables), 4);
    }

    #[test]
    fn test_huge_wage_is_invalid_not_a_panic() {
        let tables = tables();
        let huge = dec("1000000000000000000000000000");
        let result = calculate_survivor_pension(huge, 4, &tables, 1);
        assert!(matches!(result, Err(EngineError::InvalidWage { .. })));
    }

    #[test]
    fn test_rejects_invalid_wage() {
        let tables = tables();
        assert!(matches!(
            calculate_survivor_pension(dec("-1"), 0, &tables, 1),
            Err(EngineError::InvalidWage { .. })
        ));
    }

    #[test]
    fn test_audit_step() {
        let tables = tables();
        let result = calculate_survivor_pension(dec("100000"), 2, &tables, 9).unwrap();

        assert_eq!(result.audit_step.step_number, 9);
        assert_eq!(result.audit_step.clause_ref, "Art. 62, Schedule 3");
        assert_eq!(result.audit_step.input["qualified_survivors"], 2);
        assert_eq!(result.audit_step.output["applied_rate"], "0.57");
        assert!(result.audit_step.reasoning.contains("57%"));
    }
}
