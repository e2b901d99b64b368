//! Age degression for temporary disability benefit.
//!
//! From age 61 the temporary disability benefit replaces a shrinking share of
//! the average wage. This module maps an age to that share, expressed both as
//! the statutory replacement rate and as a ratio of the base rate.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::StatutoryTables;
use crate::models::{Age, AgeBand, AuditStep};

/// The result of an age adjustment lookup, including the audit step.
#[derive(Debug, Clone, Serialize)]
pub struct AgeAdjustmentResult {
    /// The payout ratio relative to the base replacement rate, in (0, 1].
    pub ratio: Decimal,
    /// The share of the average wage paid at this age.
    pub replacement_rate: Decimal,
    /// The band that matched, if any.
    pub band: Option<AgeBand>,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Returns the band of the highest `min_age` not above `age`.
fn matching_band(age: Option<Age>, tables: &StatutoryTables) -> Option<&AgeBand> {
    let years = age?.years();
    tables
        .age_schedule()
        .iter()
        .rfind(|band| band.min_age <= years)
}

/// Returns the payout ratio for an age.
///
/// An absent age, or one below the first band, gets `1` (no reduction).
/// Otherwise the ratio of the highest band whose `min_age <= age` applies.
///
/// # Examples
///
/// ```
/// use sanjae_benefit_engine::calculation::ratio_for;
/// use sanjae_benefit_engine::config::ConfigLoader;
/// use sanjae_benefit_engine::models::Age;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let tables = loader.latest_tables();
///
/// assert_eq!(ratio_for(None, tables), Decimal::ONE);
/// assert_eq!(ratio_for(Some(Age::new(40).unwrap()), tables), Decimal::ONE);
/// assert!(ratio_for(Some(Age::new(65).unwrap()), tables) < Decimal::ONE);
/// ```
pub fn ratio_for(age: Option<Age>, tables: &StatutoryTables) -> Decimal {
    match matching_band(age, tables) {
        Some(band) => band.replacement_rate / tables.base_replacement_rate(),
        None => Decimal::ONE,
    }
}

/// Returns the share of the average wage paid at an age.
///
/// This equals `base_replacement_rate * ratio_for(age)` without the
/// division round trip.
pub fn replacement_rate_for(age: Option<Age>, tables: &StatutoryTables) -> Decimal {
    matching_band(age, tables)
        .map(|band| band.replacement_rate)
        .unwrap_or_else(|| tables.base_replacement_rate())
}

/// Looks up the age adjustment for a claimant and records an audit step.
///
/// # Arguments
///
/// * `age` - The claimant's age, if known
/// * `tables` - The statutory tables holding the age schedule
/// * `step_number` - The step number for audit trail sequencing
pub fn apply_age_adjustment(
    age: Option<Age>,
    tables: &StatutoryTables,
    step_number: u32,
) -> AgeAdjustmentResult {
    let band = matching_band(age, tables).cloned();
    let ratio = ratio_for(age, tables);
    let replacement_rate = replacement_rate_for(age, tables);

    let reasoning = match (&band, age) {
        (Some(band), Some(age)) => format!(
            "Age {} falls in the band from age {}: {}% of average wage ({} of the base rate)",
            age.years(),
            band.min_age,
            (band.replacement_rate * Decimal::ONE_HUNDRED).normalize(),
            ratio.round_dp(4).normalize()
        ),
        (None, Some(age)) => format!(
            "Age {} is below the first degression band - no reduction",
            age.years()
        ),
        _ => "No age supplied - no reduction".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "age_adjustment".to_string(),
        rule_name: "Age Degression".to_string(),
        clause_ref: tables.age_clause().to_string(),
        input: serde_json::json!({
            "age": age.map(|a| a.years()),
        }),
        output: serde_json::json!({
            "band_min_age": band.as_ref().map(|b| b.min_age),
            "replacement_rate": replacement_rate.normalize().to_string(),
            "ratio": ratio.normalize().to_string(),
            "reduction_applied": band.is_some()
        }),
        reasoning,
    };

    AgeAdjustmentResult {
        ratio,
        replacement_rate,
        band,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{dec, tables};
    use rust_decimal::RoundingStrategy;

    fn age(years: i32) -> Option<Age> {
        Some(Age::new(years).unwrap())
    }

    fn truncated(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(2, RoundingStrategy::ToZero)
    }

    #[test]
    fn test_absent_age_has_no_reduction() {
        let tables = tables();
        assert_eq!(ratio_for(None, &tables), Decimal::ONE);
        assert_eq!(replacement_rate_for(None, &tables), dec("0.70"));
    }

    #[test]
    fn test_age_below_first_band_has_no_reduction() {
        let tables = tables();
        assert_eq!(ratio_for(age(0), &tables), Decimal::ONE);
        assert_eq!(ratio_for(age(60), &tables), Decimal::ONE);
    }

    #[test]
    fn test_observed_anchor_ratios() {
        let tables = tables();
        assert_eq!(truncated(ratio_for(age(61), &tables)), dec("0.94"));
        assert_eq!(truncated(ratio_for(age(63), &tables)), dec("0.82"));
        assert_eq!(truncated(ratio_for(age(65), &tables)), dec("0.71"));
    }

    #[test]
    fn test_ages_above_last_band_use_last_band() {
        let tables = tables();
        assert_eq!(replacement_rate_for(age(65), &tables), dec("0.50"));
        assert_eq!(replacement_rate_for(age(80), &tables), dec("0.50"));
        assert_eq!(ratio_for(age(80), &tables), ratio_for(age(65), &tables));
    }

    #[test]
    fn test_ratio_is_non_increasing_with_age() {
        let tables = tables();
        let mut previous = Decimal::ONE;
        for years in 0..=100 {
            let ratio = ratio_for(age(years), &tables);
            assert!(ratio <= previous, "ratio rose at age {}", years);
            assert!(ratio > Decimal::ZERO);
            previous = ratio;
        }
    }

    #[test]
    fn test_audit_step_for_reduced_age() {
        let tables = tables();
        let result = apply_age_adjustment(age(62), &tables, 3);

        assert_eq!(result.replacement_rate, dec("0.62"));
        assert_eq!(result.band.as_ref().map(|b| b.min_age), Some(62));
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "age_adjustment");
        assert_eq!(result.audit_step.clause_ref, "Art. 55, Schedule 1");
        assert_eq!(result.audit_step.input["age"], 62);
        assert_eq!(result.audit_step.output["replacement_rate"], "0.62");
        assert_eq!(result.audit_step.output["reduction_applied"], true);
        assert!(result.audit_step.reasoning.contains("62%"));
    }

    #[test]
    fn test_audit_step_without_age() {
        let tables = tables();
        let result = apply_age_adjustment(None, &tables, 1);

        assert!(result.band.is_none());
        assert_eq!(result.ratio, Decimal::ONE);
        assert!(result.audit_step.input["age"].is_null());
        assert_eq!(result.audit_step.output["reduction_applied"], false);
        assert!(result.audit_step.reasoning.contains("No age supplied"));
    }
}
