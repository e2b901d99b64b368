//! Benefit report assembly.
//!
//! Collects every benefit a claimant's wage, age and grade entitle them to
//! into one structure for the presentation layer. No amount is computed here;
//! each figure comes from its calculator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::StatutoryTables;
use crate::error::EngineResult;
use crate::models::{AuditStep, NursingRateRow};

use super::disability::{DisabilityResult, calculate_disability};
use super::funeral::{
    FuneralBenefitResult, calculate_bounded_funeral_benefit, calculate_funeral_benefit,
};
use super::sick_leave::{SickLeaveResult, calculate_sick_leave};
use super::survivor::{
    SurvivorPensionResult, calculate_survivor_pension, survivors_for_maximum_addition,
};
use super::treatment_nursing::{TreatmentNursingFeeRange, treatment_nursing_fee_range};

/// What the report is calculated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportInputs {
    /// The claimant's average daily wage in won.
    pub average_wage: Decimal,
    /// The claimant's age, if known.
    #[serde(default)]
    pub age: Option<i32>,
    /// The length of the temporary disability period in days.
    pub sick_leave_days: i64,
    /// The disability grade, if one has been assessed.
    #[serde(default)]
    pub disability_grade: Option<i32>,
}

/// Every benefit figure for one claimant, with the combined audit trace.
#[derive(Debug, Clone, Serialize)]
pub struct BenefitReport {
    /// The code of the compensation scheme.
    pub scheme_code: String,
    /// The effective date of the yearly figures used.
    pub effective_date: NaiveDate,
    /// The inputs the report was calculated from.
    pub inputs: ReportInputs,
    /// Temporary disability benefit for the requested period.
    pub sick_leave: SickLeaveResult,
    /// Disability benefit, if a grade was supplied.
    pub disability: Option<DisabilityResult>,
    /// Funeral benefit as 120 days of wage.
    pub funeral: FuneralBenefitResult,
    /// Funeral benefit within the year's statutory bounds.
    pub funeral_bounded: FuneralBenefitResult,
    /// Survivor pension with no additional survivors.
    pub survivor_pension_basic: SurvivorPensionResult,
    /// Survivor pension with the largest addition.
    pub survivor_pension_maximum: SurvivorPensionResult,
    /// The nursing benefit rate table.
    pub nursing_rates: Vec<NursingRateRow>,
    /// The lowest and highest treatment nursing fee.
    pub treatment_nursing_fee_range: TreatmentNursingFeeRange,
    /// All audit steps in calculation order.
    pub audit_trace: Vec<AuditStep>,
}

/// Assembles a benefit report.
///
/// Calculators run in a fixed order and their audit steps are numbered
/// consecutively from 1, so identical inputs give an identical report.
///
/// # Errors
///
/// Returns the first validation error raised by any calculator.
///
/// # Examples
///
/// ```
/// use sanjae_benefit_engine::calculation::{ReportInputs, assemble_report};
/// use sanjae_benefit_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let inputs = ReportInputs {
///     average_wage: Decimal::from(100_000),
///     age: Some(45),
///     sick_leave_days: 30,
///     disability_grade: Some(1),
/// };
///
/// let report = assemble_report(&inputs, loader.latest_tables()).unwrap();
/// assert_eq!(report.funeral.amount, Decimal::from(12_000_000));
/// assert!(report.disability.unwrap().lump_sum.is_none());
/// ```
pub fn assemble_report(
    inputs: &ReportInputs,
    tables: &StatutoryTables,
) -> EngineResult<BenefitReport> {
    let mut audit_trace: Vec<AuditStep> = Vec::new();
    let mut step_number = 1u32;

    let sick_leave = calculate_sick_leave(
        inputs.average_wage,
        inputs.sick_leave_days,
        inputs.age,
        tables,
        step_number,
    )?;
    step_number = step_number.saturating_add(sick_leave.audit_steps.len() as u32);
    audit_trace.extend(sick_leave.audit_steps.iter().cloned());

    let disability = match inputs.disability_grade {
        Some(grade) => {
            let result = calculate_disability(inputs.average_wage, grade, tables, step_number)?;
            step_number += 1;
            audit_trace.push(result.audit_step.clone());
            Some(result)
        }
        None => None,
    };

    let funeral = calculate_funeral_benefit(inputs.average_wage, tables, step_number)?;
    step_number += 1;
    audit_trace.push(funeral.audit_step.clone());

    let funeral_bounded =
        calculate_bounded_funeral_benefit(inputs.average_wage, tables, step_number)?;
    step_number += 1;
    audit_trace.push(funeral_bounded.audit_step.clone());

    let survivor_pension_basic =
        calculate_survivor_pension(inputs.average_wage, 0, tables, step_number)?;
    step_number += 1;
    audit_trace.push(survivor_pension_basic.audit_step.clone());

    let survivor_pension_maximum = calculate_survivor_pension(
        inputs.average_wage,
        survivors_for_maximum_addition(tables),
        tables,
        step_number,
    )?;
    audit_trace.push(survivor_pension_maximum.audit_step.clone());

    Ok(BenefitReport {
        scheme_code: tables.scheme().code.clone(),
        effective_date: tables.effective_date(),
        inputs: inputs.clone(),
        sick_leave,
        disability,
        funeral,
        funeral_bounded,
        survivor_pension_basic,
        survivor_pension_maximum,
        nursing_rates: tables.nursing_rate_table(),
        treatment_nursing_fee_range: treatment_nursing_fee_range(tables),
        audit_trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{dec, tables};
    use crate::error::EngineError;
    use crate::models::PayoutMode;

    fn inputs(grade: Option<i32>) -> ReportInputs {
        ReportInputs {
            average_wage: dec("100000"),
            age: Some(65),
            sick_leave_days: 30,
            disability_grade: grade,
        }
    }

    #[test]
    fn test_report_with_grade() {
        let tables = tables();
        let report = assemble_report(&inputs(Some(5)), &tables).unwrap();

        assert_eq!(report.scheme_code, "KR-IACI");
        assert_eq!(report.effective_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(report.sick_leave.daily_amount, dec("80240"));

        let disability = report.disability.as_ref().unwrap();
        assert_eq!(disability.payout_mode, PayoutMode::Choice);
        assert_eq!(disability.lump_sum, Some(dec("86900000")));

        assert_eq!(report.funeral.amount, dec("12000000"));
        assert_eq!(report.funeral_bounded.amount, dec("13451380"));
        assert_eq!(report.survivor_pension_basic.annual_amount, dec("17155000"));
        assert_eq!(report.survivor_pension_maximum.applied_rate, dec("0.67"));
        assert_eq!(report.nursing_rates.len(), 4);
        assert_eq!(report.treatment_nursing_fee_range.max.daily_amount, dec("67140"));
        assert_eq!(report.treatment_nursing_fee_range.min.daily_amount, dec("41170"));
    }

    #[test]
    fn test_report_without_grade() {
        let tables = tables();
        let report = assemble_report(&inputs(None), &tables).unwrap();

        assert!(report.disability.is_none());
        assert!(
            report
                .audit_trace
                .iter()
                .all(|step| step.rule_id != "disability_benefit")
        );
    }

    #[test]
    fn test_audit_trace_is_numbered_consecutively() {
        let tables = tables();
        let report = assemble_report(&inputs(Some(1)), &tables).unwrap();

        let numbers: Vec<u32> = report.audit_trace.iter().map(|s| s.step_number).collect();
        let expected: Vec<u32> = (1..=report.audit_trace.len() as u32).collect();
        assert_eq!(numbers, expected);

        let rule_ids: Vec<&str> = report.audit_trace.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec![
                "age_adjustment",
                "sick_leave",
                "disability_benefit",
                "funeral_benefit",
                "funeral_benefit_bounded",
                "survivor_pension",
                "survivor_pension",
            ]
        );
    }

    #[test]
    fn test_report_matches_individual_calculators() {
        let tables = tables();
        let report = assemble_report(&inputs(Some(14)), &tables).unwrap();

        let sick_leave = calculate_sick_leave(dec("100000"), 30, Some(65), &tables, 1).unwrap();
        let disability = calculate_disability(dec("100000"), 14, &tables, 1).unwrap();

        assert_eq!(report.sick_leave.period_amount, sick_leave.period_amount);
        assert_eq!(report.disability.unwrap().lump_sum, disability.lump_sum);
    }

    #[test]
    fn test_report_is_deterministic() {
        let tables = tables();
        let first = assemble_report(&inputs(Some(3)), &tables).unwrap();
        let second = assemble_report(&inputs(Some(3)), &tables).unwrap();
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_report_propagates_grade_error() {
        let tables = tables();
        let result = assemble_report(&inputs(Some(15)), &tables);
        assert!(matches!(result, Err(EngineError::InvalidGrade { grade: 15 })));
    }

    #[test]
    fn test_report_propagates_wage_error() {
        let tables = tables();
        let mut bad = inputs(None);
        bad.average_wage = dec("-5");
        assert!(matches!(
            assemble_report(&bad, &tables),
            Err(EngineError::InvalidWage { .. })
        ));
    }
}
