//! Temporary disability ("sick-leave") benefit calculation.
//!
//! The daily benefit replaces 70% of the average wage, reduced for older
//! claimants, then bounded by the statutory daily floor and cap. Low-income
//! claimants are instead paid a higher share of their own wage, which may
//! leave them below the flat floor.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::StatutoryTables;
use crate::error::{EngineError, EngineResult};
use crate::models::{Age, AuditStep, AverageWage, PeriodDays};

use super::age_adjustment::apply_age_adjustment;
use super::rounding::{round_won, wage_multiple};

/// Which rule fixed the daily amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SickLeaveRegime {
    /// The age-adjusted replacement amount, within floor and cap.
    Standard,
    /// Raised to the statutory daily floor.
    Floor,
    /// Lowered to the statutory daily cap.
    Cap,
    /// Low-income exception: the low-income share of the average wage.
    LowIncome,
    /// Low-income exception, limited to its ceiling.
    LowIncomeCeiling,
}

impl SickLeaveRegime {
    /// Returns the snake_case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Floor => "floor",
            Self::Cap => "cap",
            Self::LowIncome => "low_income",
            Self::LowIncomeCeiling => "low_income_ceiling",
        }
    }

    /// Returns true if the low-income exception decided the amount.
    pub fn is_low_income(&self) -> bool {
        matches!(self, Self::LowIncome | Self::LowIncomeCeiling)
    }
}

/// The result of a temporary disability benefit calculation.
#[derive(Debug, Clone, Serialize)]
pub struct SickLeaveResult {
    /// The benefit per day, in whole won.
    pub daily_amount: Decimal,
    /// The benefit for the whole period (`daily_amount * period_days`).
    pub period_amount: Decimal,
    /// The number of days in the period.
    pub period_days: u32,
    /// Which rule fixed the daily amount.
    pub regime: SickLeaveRegime,
    /// The age payout ratio that was applied.
    pub age_ratio: Decimal,
    /// The audit steps recording this calculation.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates the temporary disability benefit.
///
/// # Algorithm
///
/// 1. `base = wage * 0.70`
/// 2. `adjusted = base * ratio_for(age)`
/// 3. If `adjusted` is below the floor and the wage is at or below the
///    low-income threshold, pay `wage * 0.90`, at most the low-income
///    ceiling. This may be below the floor.
/// 4. Otherwise clamp `adjusted` to `[floor, cap]`.
/// 5. Round the daily amount to whole won once;
///    `period_amount = daily_amount * period_days`.
///
/// # Arguments
///
/// * `average_wage` - The claimant's average daily wage in won
/// * `period_days` - The number of days of the benefit period
/// * `age` - The claimant's age, if known
/// * `tables` - The statutory tables
/// * `step_number` - The first step number for audit trail sequencing
///
/// # Errors
///
/// Returns `InvalidWage` for a non-positive wage, `InvalidPeriod` for a
/// negative period and `InvalidAge` for a negative age.
///
/// # Examples
///
/// ```
/// use sanjae_benefit_engine::calculation::calculate_sick_leave;
/// use sanjae_benefit_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let tables = loader.latest_tables();
///
/// let result = calculate_sick_leave(Decimal::from(200_000), 30, None, tables, 1).unwrap();
/// assert_eq!(result.daily_amount, Decimal::from(140_000));
/// assert_eq!(result.period_amount, Decimal::from(4_200_000));
/// ```
pub fn calculate_sick_leave(
    average_wage: Decimal,
    period_days: i64,
    age: Option<i32>,
    tables: &StatutoryTables,
    step_number: u32,
) -> EngineResult<SickLeaveResult> {
    let wage = AverageWage::new(average_wage)?.amount();
    let period = PeriodDays::new(period_days)?;
    let age = Age::from_optional(age)?;

    let age_adjustment = apply_age_adjustment(age, tables, step_number);

    let rule = tables.temporary_disability_rule();
    let floor = tables.temporary_disability_floor();
    let cap = tables.temporary_disability_cap();
    let threshold = tables.low_income_wage_threshold();
    let ceiling = tables.low_income_ceiling();

    let base = wage_multiple(wage, rule.replacement_rate)?;
    let adjusted = wage_multiple(wage, age_adjustment.replacement_rate)?;

    let (unrounded, regime) = if adjusted < floor && wage <= threshold {
        let low_income = wage_multiple(wage, rule.low_income.rate)?;
        if low_income > ceiling {
            (ceiling, SickLeaveRegime::LowIncomeCeiling)
        } else {
            (low_income, SickLeaveRegime::LowIncome)
        }
    } else if adjusted < floor {
        (floor, SickLeaveRegime::Floor)
    } else if adjusted > cap {
        (cap, SickLeaveRegime::Cap)
    } else {
        (adjusted, SickLeaveRegime::Standard)
    };

    let daily_amount = round_won(unrounded);
    let period_amount = daily_amount
        .checked_mul(Decimal::from(period.days()))
        .ok_or(EngineError::InvalidPeriod { days: period_days })?;

    let reasoning = match regime {
        SickLeaveRegime::Standard => format!(
            "{} x {}% = {} per day",
            wage.normalize(),
            (age_adjustment.replacement_rate * Decimal::ONE_HUNDRED).normalize(),
            daily_amount
        ),
        SickLeaveRegime::Floor => format!(
            "{} x {}% = {} is below the daily floor - raised to {}",
            wage.normalize(),
            (age_adjustment.replacement_rate * Decimal::ONE_HUNDRED).normalize(),
            adjusted.normalize(),
            daily_amount
        ),
        SickLeaveRegime::Cap => format!(
            "{} x {}% = {} exceeds the daily cap - lowered to {}",
            wage.normalize(),
            (age_adjustment.replacement_rate * Decimal::ONE_HUNDRED).normalize(),
            adjusted.normalize(),
            daily_amount
        ),
        SickLeaveRegime::LowIncome => format!(
            "Low-income exception: wage {} is at or below {} - {} x {}% = {} per day",
            wage.normalize(),
            round_won(threshold),
            wage.normalize(),
            (rule.low_income.rate * Decimal::ONE_HUNDRED).normalize(),
            daily_amount
        ),
        SickLeaveRegime::LowIncomeCeiling => format!(
            "Low-income exception: wage {} x {}% exceeds the ceiling - limited to {} per day",
            wage.normalize(),
            (rule.low_income.rate * Decimal::ONE_HUNDRED).normalize(),
            daily_amount
        ),
    };

    let clause_ref = if regime.is_low_income() {
        rule.low_income.clause.clone()
    } else {
        rule.clause.clone()
    };

    let calculation_step = AuditStep {
        step_number: step_number.saturating_add(1),
        rule_id: "sick_leave".to_string(),
        rule_name: "Temporary Disability Benefit".to_string(),
        clause_ref,
        input: serde_json::json!({
            "average_wage": wage.normalize().to_string(),
            "period_days": period.days(),
            "replacement_rate": rule.replacement_rate.normalize().to_string(),
            "age_ratio": age_adjustment.ratio.normalize().to_string(),
            "daily_floor": floor.normalize().to_string(),
            "daily_cap": cap.normalize().to_string(),
            "low_income_threshold": threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_amount": base.normalize().to_string(),
            "adjusted_amount": adjusted.normalize().to_string(),
            "daily_amount": daily_amount.to_string(),
            "period_amount": period_amount.to_string(),
            "regime": regime.as_str()
        }),
        reasoning,
    };

    Ok(SickLeaveResult {
        daily_amount,
        period_amount,
        period_days: period.days(),
        regime,
        age_ratio: age_adjustment.ratio,
        audit_steps: vec![age_adjustment.audit_step, calculation_step],
    })
}
