//! Nursing benefit lookup.
//!
//! Nursing benefit is a flat daily rate set by care level. It does not
//! depend on wage or age.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::StatutoryTables;
use crate::models::{AuditStep, CareLevel, CaregiverType};

/// The result of a nursing benefit lookup.
#[derive(Debug, Clone, Serialize)]
pub struct NursingBenefitResult {
    /// The care level looked up.
    pub care_level: CareLevel,
    /// The caregiver type looked up.
    pub caregiver_type: CaregiverType,
    /// The flat daily benefit in won.
    pub daily_amount: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Looks up the daily nursing benefit.
///
/// Family and professional caregivers are paid the same rate for a given
/// care level.
///
/// # Examples
///
/// ```
/// use sanjae_benefit_engine::calculation::nursing_benefit;
/// use sanjae_benefit_engine::config::ConfigLoader;
/// use sanjae_benefit_engine::models::{CareLevel, CaregiverType};
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let tables = loader.latest_tables();
///
/// let family = nursing_benefit(CareLevel::Constant, CaregiverType::Family, tables, 1);
/// let professional = nursing_benefit(CareLevel::Constant, CaregiverType::Professional, tables, 1);
/// assert_eq!(family.daily_amount, professional.daily_amount);
/// ```
pub fn nursing_benefit(
    care_level: CareLevel,
    caregiver_type: CaregiverType,
    tables: &StatutoryTables,
    step_number: u32,
) -> NursingBenefitResult {
    let daily_amount = tables.nursing_rate(care_level, caregiver_type);

    let audit_step = AuditStep {
        step_number,
        rule_id: "nursing_benefit".to_string(),
        rule_name: "Nursing Benefit".to_string(),
        clause_ref: tables.nursing_clause().to_string(),
        input: serde_json::json!({
            "care_level": care_level.as_str(),
            "caregiver_type": caregiver_type.as_str()
        }),
        output: serde_json::json!({
            "daily_amount": daily_amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} care by a {} caregiver: flat rate {} per day",
            care_level.as_str(),
            caregiver_type.as_str(),
            daily_amount.normalize()
        ),
    };

    NursingBenefitResult {
        care_level,
        caregiver_type,
        daily_amount,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{dec, tables};

    #[test]
    fn test_constant_care_rate() {
        let tables = tables();
        let result = nursing_benefit(CareLevel::Constant, CaregiverType::Professional, &tables, 1);
        assert_eq!(result.daily_amount, dec("44760"));
    }

    #[test]
    fn test_occasional_care_rate() {
        let tables = tables();
        let result = nursing_benefit(CareLevel::Occasional, CaregiverType::Family, &tables, 1);
        assert_eq!(result.daily_amount, dec("29840"));
    }

    #[test]
    fn test_caregiver_type_does_not_change_rate() {
        let tables = tables();
        for care_level in [CareLevel::Constant, CareLevel::Occasional] {
            let family = nursing_benefit(care_level, CaregiverType::Family, &tables, 1);
            let professional = nursing_benefit(care_level, CaregiverType::Professional, &tables, 1);
            assert_eq!(family.daily_amount, professional.daily_amount);
        }
    }

    #[test]
    fn test_audit_step() {
        let tables = tables();
        let result = nursing_benefit(CareLevel::Occasional, CaregiverType::Family, &tables, 2);

        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.input["care_level"], "occasional");
        assert_eq!(result.audit_step.input["caregiver_type"], "family");
        assert_eq!(result.audit_step.output["daily_amount"], "29840");
        assert_eq!(result.audit_step.clause_ref, "Art. 61");
    }
}
