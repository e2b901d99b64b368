//! Treatment nursing fee lookup.
//!
//! The treatment nursing fee (간병료) is paid per day while the worker is
//! still under medical treatment. It is set by care grade and caregiver type,
//! unlike the flat nursing benefit paid after treatment ends.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::StatutoryTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CaregiverType};

/// The result of a treatment nursing fee lookup.
#[derive(Debug, Clone, Serialize)]
pub struct TreatmentNursingFeeResult {
    /// The care grade looked up.
    pub grade: u32,
    /// The caregiver type looked up.
    pub caregiver_type: CaregiverType,
    /// The daily fee in won.
    pub daily_amount: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// One cell of the treatment nursing fee table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TreatmentNursingFeeBound {
    /// The care grade.
    pub grade: u32,
    /// The caregiver type.
    pub caregiver_type: CaregiverType,
    /// The daily fee in won.
    pub daily_amount: Decimal,
}

/// The lowest and highest daily treatment nursing fee of the year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TreatmentNursingFeeRange {
    /// The lowest fee.
    pub min: TreatmentNursingFeeBound,
    /// The highest fee.
    pub max: TreatmentNursingFeeBound,
}

/// Looks up the daily treatment nursing fee for a care grade and caregiver.
///
/// # Errors
///
/// Returns `InvalidCareGrade` if the year's table has no row for `grade`.
///
/// # Examples
///
/// ```
/// use sanjae_benefit_engine::calculation::treatment_nursing_fee;
/// use sanjae_benefit_engine::config::ConfigLoader;
/// use sanjae_benefit_engine::models::CaregiverType;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let tables = loader.latest_tables();
///
/// let result = treatment_nursing_fee(1, CaregiverType::Professional, tables, 1).unwrap();
/// assert_eq!(result.daily_amount, Decimal::from(67_140));
/// ```
pub fn treatment_nursing_fee(
    grade: i32,
    caregiver_type: CaregiverType,
    tables: &StatutoryTables,
    step_number: u32,
) -> EngineResult<TreatmentNursingFeeResult> {
    let (grade, daily_amount) = u32::try_from(grade)
        .ok()
        .and_then(|g| tables.treatment_nursing_fee(g, caregiver_type).map(|fee| (g, fee)))
        .ok_or(EngineError::InvalidCareGrade { grade })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "treatment_nursing_fee".to_string(),
        rule_name: "Treatment Nursing Fee".to_string(),
        clause_ref: tables.treatment_nursing_clause().to_string(),
        input: serde_json::json!({
            "grade": grade,
            "caregiver_type": caregiver_type.as_str()
        }),
        output: serde_json::json!({
            "daily_amount": daily_amount.normalize().to_string()
        }),
        reasoning: format!(
            "Care grade {} by a {} caregiver: {} per day",
            grade,
            caregiver_type.as_str(),
            daily_amount.normalize()
        ),
    };

    Ok(TreatmentNursingFeeResult {
        grade,
        caregiver_type,
        daily_amount,
        audit_step,
    })
}

/// Returns the lowest and highest fee across every grade and caregiver type.
///
/// With the 2025 table the highest fee is a professional caregiver at grade 1
/// and the lowest a family caregiver at grade 3.
pub fn treatment_nursing_fee_range(tables: &StatutoryTables) -> TreatmentNursingFeeRange {
    let cells: Vec<TreatmentNursingFeeBound> = tables
        .treatment_nursing_table()
        .iter()
        .flat_map(|row| {
            [CaregiverType::Professional, CaregiverType::Family].map(|caregiver_type| {
                TreatmentNursingFeeBound {
                    grade: row.grade,
                    caregiver_type,
                    daily_amount: row.fee(caregiver_type),
                }
            })
        })
        .collect();

    // The table is validated non-empty at load.
    let empty = TreatmentNursingFeeBound {
        grade: 0,
        caregiver_type: CaregiverType::Professional,
        daily_amount: Decimal::ZERO,
    };
    let min = cells
        .iter()
        .copied()
        .min_by_key(|cell| cell.daily_amount)
        .unwrap_or(empty);
    let max = cells
        .iter()
        .copied()
        .max_by(|a, b| a.daily_amount.cmp(&b.daily_amount).then(b.grade.cmp(&a.grade)))
        .unwrap_or(empty);

    TreatmentNursingFeeRange { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{dec, tables};

    /// TN-001: Heaviest grade, professional caregiver.
    #[test]
    fn test_grade_1_professional() {
        let tables = tables();
        let result = treatment_nursing_fee(1, CaregiverType::Professional, &tables, 1).unwrap();
        assert_eq!(result.grade, 1);
        assert_eq!(result.daily_amount, dec("67140"));
    }

    /// TN-002: Family caregivers are paid less than professionals.
    #[test]
    fn test_family_rates() {
        let tables = tables();
        let expected = [(1, "61750"), (2, "51460"), (3, "41170")];
        for (grade, amount) in expected {
            let family = treatment_nursing_fee(grade, CaregiverType::Family, &tables, 1).unwrap();
            let professional =
                treatment_nursing_fee(grade, CaregiverType::Professional, &tables, 1).unwrap();
            assert_eq!(family.daily_amount, dec(amount));
            assert!(family.daily_amount < professional.daily_amount);
        }
    }

    #[test]
    fn test_unknown_grade_is_rejected() {
        let tables = tables();
        for grade in [0, 4, -1] {
            let result = treatment_nursing_fee(grade, CaregiverType::Family, &tables, 1);
            assert!(matches!(result, Err(EngineError::InvalidCareGrade { grade: g }) if g == grade));
        }
    }

    #[test]
    fn test_range_spans_the_table() {
        let tables = tables();
        let range = treatment_nursing_fee_range(&tables);

        assert_eq!(range.max.grade, 1);
        assert_eq!(range.max.caregiver_type, CaregiverType::Professional);
        assert_eq!(range.max.daily_amount, dec("67140"));

        assert_eq!(range.min.grade, 3);
        assert_eq!(range.min.caregiver_type, CaregiverType::Family);
        assert_eq!(range.min.daily_amount, dec("41170"));
    }

    #[test]
    fn test_audit_step() {
        let tables = tables();
        let result = treatment_nursing_fee(2, CaregiverType::Family, &tables, 3).unwrap();

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "treatment_nursing_fee");
        assert_eq!(result.audit_step.clause_ref, "Art. 40");
        assert_eq!(result.audit_step.input["grade"], 2);
        assert_eq!(result.audit_step.input["caregiver_type"], "family");
        assert_eq!(result.audit_step.output["daily_amount"], "51460");
    }
}
