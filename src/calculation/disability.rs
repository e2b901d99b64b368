//! Permanent disability benefit calculation.
//!
//! A disability grade entitles the claimant to a pension, a lump sum, or a
//! choice between the two. The grade table row decides which amounts exist;
//! the calculator never chooses on the claimant's behalf.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::StatutoryTables;
use crate::error::EngineResult;
use crate::models::{AuditStep, AverageWage, DisabilityGrade, PayoutMode};

use super::rounding::{round_won, wage_multiple};

/// The result of a disability benefit calculation.
#[derive(Debug, Clone, Serialize)]
pub struct DisabilityResult {
    /// The disability grade, 1 to 14.
    pub grade: u8,
    /// How the benefit may be paid.
    pub payout_mode: PayoutMode,
    /// The one-time lump sum, if the grade has a lump-sum path.
    pub lump_sum: Option<Decimal>,
    /// The annual pension, if the grade has a pension path.
    pub pension: Option<Decimal>,
    /// One instalment of the annual pension.
    pub pension_monthly: Option<Decimal>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the disability benefit for a grade.
///
/// `lump_sum = wage * lump_sum_days` and `pension = wage * pension_days`,
/// each present only when the grade's payout mode includes that path and
/// rounded once to whole won. The monthly instalment divides the rounded
/// annual pension by the instalments per year.
///
/// # Errors
///
/// Returns `InvalidWage` for a non-positive wage or one too large to
/// multiply by the grade's day count, and `InvalidGrade` for a grade
/// outside 1 to 14.
///
/// # Examples
///
/// ```
/// use sanjae_benefit_engine::calculation::calculate_disability;
/// use sanjae_benefit_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let tables = loader.latest_tables();
///
/// let result = calculate_disability(Decimal::from(100_000), 14, tables, 1).unwrap();
/// assert_eq!(result.lump_sum, Some(Decimal::from(5_500_000)));
/// assert_eq!(result.pension, None);
/// ```
pub fn calculate_disability(
    average_wage: Decimal,
    grade: i32,
    tables: &StatutoryTables,
    step_number: u32,
) -> EngineResult<DisabilityResult> {
    let wage = AverageWage::new(average_wage)?.amount();
    let grade = DisabilityGrade::new(grade)?;

    let entry = tables.grade_entry(grade);
    let mode = entry.payout_mode;

    let lump_sum = if mode.has_lump_sum() {
        Some(round_won(wage_multiple(wage, entry.lump_sum_days)?))
    } else {
        None
    };

    let pension = match entry.pension_days {
        Some(days) if mode.has_pension() => Some(round_won(wage_multiple(wage, days)?)),
        _ => None,
    };

    let installments = Decimal::from(tables.disability_pension_rule().installments_per_year);
    let pension_monthly = pension.map(|annual| round_won(annual / installments));

    let reasoning = match (lump_sum, pension) {
        (Some(lump), Some(annual)) => format!(
            "Grade {} ({}): lump sum {} x {} days = {}, or pension {} x {} days = {} per year - claimant chooses",
            grade.value(),
            mode.as_str(),
            wage.normalize(),
            entry.lump_sum_days.normalize(),
            lump,
            wage.normalize(),
            entry.pension_days.unwrap_or_default().normalize(),
            annual
        ),
        (None, Some(annual)) => format!(
            "Grade {} ({}): pension {} x {} days = {} per year",
            grade.value(),
            mode.as_str(),
            wage.normalize(),
            entry.pension_days.unwrap_or_default().normalize(),
            annual
        ),
        (Some(lump), None) => format!(
            "Grade {} ({}): lump sum {} x {} days = {}",
            grade.value(),
            mode.as_str(),
            wage.normalize(),
            entry.lump_sum_days.normalize(),
            lump
        ),
        (None, None) => format!("Grade {} has no payable benefit", grade.value()),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "disability_benefit".to_string(),
        rule_name: "Disability Benefit".to_string(),
        clause_ref: tables.grade_clause().to_string(),
        input: serde_json::json!({
            "average_wage": wage.normalize().to_string(),
            "grade": grade.value(),
            "payout_mode": mode.as_str(),
            "lump_sum_days": entry.lump_sum_days.normalize().to_string(),
            "pension_days": entry.pension_days.map(|d| d.normalize().to_string())
        }),
        output: serde_json::json!({
            "lump_sum": lump_sum.map(|v| v.to_string()),
            "pension": pension.map(|v| v.to_string()),
            "pension_monthly": pension_monthly.map(|v| v.to_string())
        }),
        reasoning,
    };

    Ok(DisabilityResult {
        grade: grade.value(),
        payout_mode: mode,
        lump_sum,
        pension,
        pension_monthly,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{dec, tables};
    use crate::error::EngineError;

    /// DB-001: grade 1 pays a pension only
    #[test]
    fn test_grade_1_pension_only() {
        let tables = tables();
        let result = calculate_disability(dec("100000"), 1, &tables, 1).unwrap();

        assert_eq!(result.payout_mode, PayoutMode::PensionOnly);
        assert_eq!(result.pension, Some(dec("32900000")));
        assert_eq!(result.lump_sum, None);
        assert_eq!(result.pension_monthly, Some(dec("2741667")));
    }

    /// DB-002: grade 14 pays a lump sum only
    #[test]
    fn test_grade_14_lump_sum_only() {
        let tables = tables();
        let result = calculate_disability(dec("100000"), 14, &tables, 1).unwrap();

        assert_eq!(result.payout_mode, PayoutMode::LumpSumOnly);
        assert_eq!(result.lump_sum, Some(dec("5500000")));
        assert_eq!(result.pension, None);
        assert_eq!(result.pension_monthly, None);
    }

    /// DB-003: choice grades return both amounts
    #[test]
    fn test_choice_grade_returns_both() {
        let tables = tables();
        let result = calculate_disability(dec("100000"), 5, &tables, 1).unwrap();

        assert_eq!(result.payout_mode, PayoutMode::Choice);
        assert_eq!(result.lump_sum, Some(dec("86900000")));
        assert_eq!(result.pension, Some(dec("19300000")));
        assert_eq!(result.pension_monthly, Some(dec("1608333")));
    }

    #[test]
    fn test_every_grade_matches_its_payout_mode() {
        let tables = tables();
        for grade in 1..=14 {
            let result = calculate_disability(dec("85000"), grade, &tables, 1).unwrap();
            assert_eq!(result.lump_sum.is_some(), result.payout_mode.has_lump_sum());
            assert_eq!(result.pension.is_some(), result.payout_mode.has_pension());
        }
    }

    #[test]
    fn test_amounts_round_once_half_up() {
        let tables = tables();
        // 100,000.5 x 55 = 5,500,027.5
        let result = calculate_disability(dec("100000.5"), 14, &tables, 1).unwrap();
        assert_eq!(result.lump_sum, Some(dec("5500028")));
    }

    #[test]
    fn test_huge_wage_is_invalid_not_a_panic() {
        let tables = tables();
        let huge = dec("1000000000000000000000000000");
        for grade in [1, 5, 14] {
            let result = calculate_disability(huge, grade, &tables, 1);
            assert!(matches!(result, Err(EngineError::InvalidWage { .. })));
        }
    }

    #[test]
    fn test_grade_boundaries() {
        let tables = tables();
        assert!(calculate_disability(dec("100000"), 1, &tables, 1).is_ok());
        assert!(calculate_disability(dec("100000"), 14, &tables, 1).is_ok());
        assert!(matches!(
            calculate_disability(dec("100000"), 0, &tables, 1),
            Err(EngineError::InvalidGrade { grade: 0 })
        ));
        assert!(matches!(
            calculate_disability(dec("100000"), 15, &tables, 1),
            Err(EngineError::InvalidGrade { grade: 15 })
        ));
    }

    #[test]
    fn test_invalid_wage_is_rejected_before_grade() {
        let tables = tables();
        let result = calculate_disability(dec("-1"), 0, &tables, 1);
        assert!(matches!(result, Err(EngineError::InvalidWage { .. })));
    }

    #[test]
    fn test_audit_step() {
        let tables = tables();
        let result = calculate_disability(dec("100000"), 4, &tables, 7).unwrap();

        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "disability_benefit");
        assert_eq!(result.audit_step.clause_ref, "Art. 57, Schedule 2");
        assert_eq!(result.audit_step.input["payout_mode"], "choice");
        assert_eq!(result.audit_step.output["lump_sum"], "101200000");
        assert_eq!(result.audit_step.output["pension"], "22400000");
        assert!(result.audit_step.reasoning.contains("claimant chooses"));
    }

    #[test]
    fn test_lump_sum_only_audit_has_null_pension() {
        let tables = tables();
        let result = calculate_disability(dec("100000"), 10, &tables, 1).unwrap();

        assert!(result.audit_step.input["pension_days"].is_null());
        assert!(result.audit_step.output["pension"].is_null());
        assert_eq!(result.audit_step.output["lump_sum"], "29700000");
    }
}
