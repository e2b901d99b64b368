//! Configuration types for the statutory tables.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`StatutoryTables`] they are frozen into.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AgeBand, CareLevel, CaregiverType, DisabilityGrade, GradeEntry, NursingRateRow};

/// Metadata about the compensation scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeMetadata {
    /// A short code identifying the scheme (e.g., "KR-IACI").
    pub code: String,
    /// The human-readable name of the governing statute.
    pub name: String,
    /// The version of the tables.
    pub version: String,
    /// URL to the official statute text.
    pub source_url: String,
}

/// The low-income exception to the temporary disability rate.
#[derive(Debug, Clone, Deserialize)]
pub struct LowIncomeRule {
    /// Reference to the statutory article.
    pub clause: String,
    /// The share of the average wage paid to low-income claimants.
    pub rate: Decimal,
    /// The share of the minimum compensation base that bounds the exception.
    pub ceiling_ratio: Decimal,
}

/// Ratios for the temporary disability benefit.
#[derive(Debug, Clone, Deserialize)]
pub struct TemporaryDisabilityRule {
    /// Reference to the statutory article.
    pub clause: String,
    /// The base share of the average wage replaced.
    pub replacement_rate: Decimal,
    /// The low-income exception.
    pub low_income: LowIncomeRule,
}

/// Multiplier for the funeral benefit.
#[derive(Debug, Clone, Deserialize)]
pub struct FuneralRule {
    /// Reference to the statutory article.
    pub clause: String,
    /// Days of average wage paid.
    pub day_multiplier: Decimal,
}

/// Payment schedule for disability pensions.
#[derive(Debug, Clone, Deserialize)]
pub struct DisabilityPensionRule {
    /// Reference to the statutory article.
    pub clause: String,
    /// Number of instalments an annual pension is split into.
    pub installments_per_year: u32,
}

/// Rates for the survivor compensation pension.
#[derive(Debug, Clone, Deserialize)]
pub struct SurvivorPensionRule {
    /// Reference to the statutory article.
    pub clause: String,
    /// Days of average wage making up the annual base amount.
    pub days_per_year: Decimal,
    /// The basic share of the annual base amount.
    pub basic_rate: Decimal,
    /// The addition per qualified survivor.
    pub additional_rate_per_survivor: Decimal,
    /// The maximum total addition.
    pub max_additional_rate: Decimal,
}

/// Statutory ratios and multipliers from `benefits.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BenefitRules {
    /// Temporary disability ratios.
    pub temporary_disability: TemporaryDisabilityRule,
    /// Funeral multiplier.
    pub funeral: FuneralRule,
    /// Disability pension schedule.
    pub disability_pension: DisabilityPensionRule,
    /// Survivor pension rates.
    pub survivor_pension: SurvivorPensionRule,
}

/// The disability grade table from `disability_grades.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct GradeTableConfig {
    /// Reference to the statutory schedule.
    pub clause: String,
    /// One row per grade.
    pub grades: Vec<GradeEntry>,
}

/// The age degression schedule from `age_schedule.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AgeScheduleConfig {
    /// Reference to the statutory schedule.
    pub clause: String,
    /// Bands ordered by ascending minimum age.
    pub bands: Vec<AgeBand>,
}

/// Daily temporary disability amounts for one year.
#[derive(Debug, Clone, Deserialize)]
pub struct TemporaryDisabilityAmounts {
    /// The maximum daily payout.
    pub daily_cap: Decimal,
    /// The minimum daily payout.
    pub daily_floor: Decimal,
    /// The minimum compensation base (최저 보상기준 금액).
    pub min_compensation_base: Decimal,
}

/// Daily nursing benefit amounts for one year.
#[derive(Debug, Clone, Deserialize)]
pub struct NursingAmounts {
    /// The statutory reference for the nursing benefit.
    pub clause: String,
    /// Daily amount for constant care.
    pub constant_care: Decimal,
    /// Daily amount for occasional care.
    pub occasional_care: Decimal,
}

/// Daily treatment nursing fees for one care grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentNursingRow {
    /// The care grade, 1 being the heaviest care.
    pub grade: u32,
    /// Daily fee for a professional caregiver.
    pub professional: Decimal,
    /// Daily fee for a family caregiver.
    pub family: Decimal,
}

impl TreatmentNursingRow {
    /// Returns the fee for a caregiver type.
    pub fn fee(&self, caregiver_type: CaregiverType) -> Decimal {
        match caregiver_type {
            CaregiverType::Professional => self.professional,
            CaregiverType::Family => self.family,
        }
    }
}

/// Treatment nursing fees (요양 중 간병료) for one year.
#[derive(Debug, Clone, Deserialize)]
pub struct TreatmentNursingAmounts {
    /// The statutory reference for the fee.
    pub clause: String,
    /// One row per care grade, from grade 1.
    pub grades: Vec<TreatmentNursingRow>,
}

/// Funeral benefit bounds for one year.
#[derive(Debug, Clone, Deserialize)]
pub struct FuneralBounds {
    /// The lowest funeral benefit paid.
    pub min_amount: Decimal,
    /// The highest funeral benefit paid.
    pub max_amount: Decimal,
}

/// Money amounts effective from a specific date, from `rates/<date>.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RateConfig {
    /// The effective date for these amounts.
    pub effective_date: NaiveDate,
    /// Temporary disability amounts.
    pub temporary_disability: TemporaryDisabilityAmounts,
    /// Nursing benefit amounts.
    pub nursing: NursingAmounts,
    /// Treatment nursing fees.
    pub treatment_nursing: TreatmentNursingAmounts,
    /// Funeral benefit bounds.
    pub funeral: FuneralBounds,
}

/// The statutory tables for one effective year, validated and frozen.
///
/// This is the single source of truth every calculator reads from. It has
/// no mutation API: once [`StatutoryTables::new`] accepts a configuration,
/// the values are fixed for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct StatutoryTables {
    scheme: SchemeMetadata,
    rules: BenefitRules,
    grade_clause: String,
    grades: Vec<GradeEntry>,
    age_clause: String,
    age_bands: Vec<AgeBand>,
    rates: RateConfig,
}

impl StatutoryTables {
    /// Validates the component tables and freezes them together.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTable` if any table violates its invariants: a grade
    /// table that is not exactly grades 1 to 14, a payout mode inconsistent
    /// with its pension days, an age schedule whose ratio increases with age,
    /// a floor above the cap, or a non-positive rate.
    pub fn new(
        scheme: SchemeMetadata,
        rules: BenefitRules,
        grades: GradeTableConfig,
        age_schedule: AgeScheduleConfig,
        rates: RateConfig,
    ) -> EngineResult<Self> {
        validate_rules(&rules)?;
        validate_grades(&grades.grades)?;
        validate_age_schedule(&age_schedule.bands, rules.temporary_disability.replacement_rate)?;
        validate_rates(&rates)?;

        Ok(Self {
            scheme,
            rules,
            grade_clause: grades.clause,
            grades: grades.grades,
            age_clause: age_schedule.clause,
            age_bands: age_schedule.bands,
            rates,
        })
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.scheme
    }

    /// Returns the date the yearly amounts took effect.
    pub fn effective_date(&self) -> NaiveDate {
        self.rates.effective_date
    }

    /// Returns the statutory maximum daily temporary disability payout.
    pub fn temporary_disability_cap(&self) -> Decimal {
        self.rates.temporary_disability.daily_cap
    }

    /// Returns the statutory minimum daily temporary disability payout.
    pub fn temporary_disability_floor(&self) -> Decimal {
        self.rates.temporary_disability.daily_floor
    }

    /// Returns the minimum compensation base.
    pub fn min_compensation_base(&self) -> Decimal {
        self.rates.temporary_disability.min_compensation_base
    }

    /// Returns the temporary disability ratios.
    pub fn temporary_disability_rule(&self) -> &TemporaryDisabilityRule {
        &self.rules.temporary_disability
    }

    /// Returns the base temporary disability replacement rate.
    pub fn base_replacement_rate(&self) -> Decimal {
        self.rules.temporary_disability.replacement_rate
    }

    /// Returns the most a low-income claimant is paid per day under the
    /// low-income exception.
    pub fn low_income_ceiling(&self) -> Decimal {
        self.min_compensation_base() * self.rules.temporary_disability.low_income.ceiling_ratio
    }

    /// Returns the average wage at or below which the low-income exception
    /// applies.
    ///
    /// This is the wage whose base replacement equals [`Self::low_income_ceiling`].
    pub fn low_income_wage_threshold(&self) -> Decimal {
        self.low_income_ceiling() / self.base_replacement_rate()
    }

    /// Returns the disability grade table, ordered from grade 1 to 14.
    pub fn grade_table(&self) -> &[GradeEntry] {
        &self.grades
    }

    /// Returns the statutory reference of the grade table.
    pub fn grade_clause(&self) -> &str {
        &self.grade_clause
    }

    /// Returns the table row for a grade.
    pub fn grade_entry(&self, grade: DisabilityGrade) -> &GradeEntry {
        // Validation guarantees row i holds grade i + 1.
        &self.grades[usize::from(grade.value()) - 1]
    }

    /// Returns the disability pension schedule.
    pub fn disability_pension_rule(&self) -> &DisabilityPensionRule {
        &self.rules.disability_pension
    }

    /// Returns the age degression schedule, ordered by ascending age.
    pub fn age_schedule(&self) -> &[AgeBand] {
        &self.age_bands
    }

    /// Returns the statutory reference of the age schedule.
    pub fn age_clause(&self) -> &str {
        &self.age_clause
    }

    /// Returns the flat daily nursing benefit.
    ///
    /// The caregiver type does not change the amount.
    pub fn nursing_rate(&self, care_level: CareLevel, _caregiver_type: CaregiverType) -> Decimal {
        match care_level {
            CareLevel::Constant => self.rates.nursing.constant_care,
            CareLevel::Occasional => self.rates.nursing.occasional_care,
        }
    }

    /// Returns the statutory reference of the nursing benefit.
    pub fn nursing_clause(&self) -> &str {
        &self.rates.nursing.clause
    }

    /// Returns the treatment nursing fee table, ordered by grade.
    pub fn treatment_nursing_table(&self) -> &[TreatmentNursingRow] {
        &self.rates.treatment_nursing.grades
    }

    /// Returns the statutory reference of the treatment nursing fee.
    pub fn treatment_nursing_clause(&self) -> &str {
        &self.rates.treatment_nursing.clause
    }

    /// Returns the daily treatment nursing fee, or `None` for an unknown grade.
    pub fn treatment_nursing_fee(
        &self,
        grade: u32,
        caregiver_type: CaregiverType,
    ) -> Option<Decimal> {
        self.rates
            .treatment_nursing
            .grades
            .iter()
            .find(|row| row.grade == grade)
            .map(|row| row.fee(caregiver_type))
    }

    /// Returns every cell of the nursing rate table, for display.
    pub fn nursing_rate_table(&self) -> Vec<NursingRateRow> {
        let mut rows = Vec::with_capacity(4);
        for care_level in [CareLevel::Constant, CareLevel::Occasional] {
            for caregiver_type in [CaregiverType::Professional, CaregiverType::Family] {
                rows.push(NursingRateRow {
                    care_level,
                    caregiver_type,
                    daily_amount: self.nursing_rate(care_level, caregiver_type),
                });
            }
        }
        rows
    }

    /// Returns the funeral multiplier.
    pub fn funeral_rule(&self) -> &FuneralRule {
        &self.rules.funeral
    }

    /// Returns the funeral benefit bounds for the year.
    pub fn funeral_bounds(&self) -> &FuneralBounds {
        &self.rates.funeral
    }

    /// Returns the survivor pension rates.
    pub fn survivor_pension_rule(&self) -> &SurvivorPensionRule {
        &self.rules.survivor_pension
    }
}

fn invalid(table: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidTable {
        table: table.to_string(),
        message: message.into(),
    }
}

fn is_ratio(value: Decimal) -> bool {
    value > Decimal::ZERO && value <= Decimal::ONE
}

fn validate_rules(rules: &BenefitRules) -> EngineResult<()> {
    let temporary = &rules.temporary_disability;
    if !is_ratio(temporary.replacement_rate) {
        return Err(invalid("benefits", "replacement_rate must be in (0, 1]"));
    }
    if !is_ratio(temporary.low_income.rate) {
        return Err(invalid("benefits", "low_income.rate must be in (0, 1]"));
    }
    if !is_ratio(temporary.low_income.ceiling_ratio) {
        return Err(invalid("benefits", "low_income.ceiling_ratio must be in (0, 1]"));
    }
    if rules.funeral.day_multiplier <= Decimal::ZERO {
        return Err(invalid("benefits", "funeral.day_multiplier must be positive"));
    }
    if rules.disability_pension.installments_per_year == 0 {
        return Err(invalid(
            "benefits",
            "disability_pension.installments_per_year must be positive",
        ));
    }

    let survivor = &rules.survivor_pension;
    if survivor.days_per_year <= Decimal::ZERO || !is_ratio(survivor.basic_rate) {
        return Err(invalid(
            "benefits",
            "survivor_pension needs positive days_per_year and basic_rate in (0, 1]",
        ));
    }
    if survivor.additional_rate_per_survivor < Decimal::ZERO
        || survivor.max_additional_rate < Decimal::ZERO
        || survivor.basic_rate + survivor.max_additional_rate > Decimal::ONE
    {
        return Err(invalid(
            "benefits",
            "survivor_pension additions must be non-negative and total at most 1",
        ));
    }
    Ok(())
}

fn validate_grades(grades: &[GradeEntry]) -> EngineResult<()> {
    let expected = usize::from(DisabilityGrade::LEAST_SEVERE);
    if grades.len() != expected {
        return Err(invalid(
            "disability_grades",
            format!("expected {} rows, found {}", expected, grades.len()),
        ));
    }

    for (index, entry) in grades.iter().enumerate() {
        if usize::from(entry.grade) != index + 1 {
            return Err(invalid(
                "disability_grades",
                format!("row {} holds grade {}", index + 1, entry.grade),
            ));
        }
        if entry.lump_sum_days <= Decimal::ZERO {
            return Err(invalid(
                "disability_grades",
                format!("grade {} has non-positive lump_sum_days", entry.grade),
            ));
        }
        match (entry.payout_mode.has_pension(), entry.pension_days) {
            (true, None) => {
                return Err(invalid(
                    "disability_grades",
                    format!(
                        "grade {} is {} but has no pension_days",
                        entry.grade,
                        entry.payout_mode.as_str()
                    ),
                ));
            }
            (false, Some(_)) => {
                return Err(invalid(
                    "disability_grades",
                    format!("grade {} is lump_sum_only but has pension_days", entry.grade),
                ));
            }
            (true, Some(days)) if days <= Decimal::ZERO => {
                return Err(invalid(
                    "disability_grades",
                    format!("grade {} has non-positive pension_days", entry.grade),
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

fn validate_age_schedule(bands: &[AgeBand], base_rate: Decimal) -> EngineResult<()> {
    let mut previous: Option<&AgeBand> = None;
    for band in bands {
        if band.replacement_rate <= Decimal::ZERO || band.replacement_rate > base_rate {
            return Err(invalid(
                "age_schedule",
                format!(
                    "rate {} at age {} must be positive and at most the base rate {}",
                    band.replacement_rate, band.min_age, base_rate
                ),
            ));
        }
        if let Some(prev) = previous {
            if band.min_age <= prev.min_age {
                return Err(invalid(
                    "age_schedule",
                    format!("age {} does not follow age {}", band.min_age, prev.min_age),
                ));
            }
            if band.replacement_rate > prev.replacement_rate {
                return Err(invalid(
                    "age_schedule",
                    format!(
                        "rate increases from {} to {} at age {}",
                        prev.replacement_rate, band.replacement_rate, band.min_age
                    ),
                ));
            }
        }
        previous = Some(band);
    }
    Ok(())
}

fn validate_rates(rates: &RateConfig) -> EngineResult<()> {
    let table = format!("rates/{}", rates.effective_date);
    let temporary = &rates.temporary_disability;
    if temporary.daily_floor <= Decimal::ZERO || temporary.min_compensation_base <= Decimal::ZERO {
        return Err(invalid(
            &table,
            "daily_floor and min_compensation_base must be positive",
        ));
    }
    if temporary.daily_cap < temporary.daily_floor {
        return Err(invalid(
            &table,
            format!(
                "daily_cap {} is below daily_floor {}",
                temporary.daily_cap, temporary.daily_floor
            ),
        ));
    }
    if rates.nursing.constant_care <= Decimal::ZERO || rates.nursing.occasional_care <= Decimal::ZERO
    {
        return Err(invalid(&table, "nursing rates must be positive"));
    }
    let treatment = &rates.treatment_nursing.grades;
    if treatment.is_empty() {
        return Err(invalid(&table, "treatment nursing table must not be empty"));
    }
    for (index, row) in treatment.iter().enumerate() {
        if row.grade as usize != index + 1 {
            return Err(invalid(
                &table,
                format!(
                    "treatment nursing row {} has grade {}, expected {}",
                    index + 1,
                    row.grade,
                    index + 1
                ),
            ));
        }
        if row.professional <= Decimal::ZERO || row.family <= Decimal::ZERO {
            return Err(invalid(
                &table,
                format!("treatment nursing fees for grade {} must be positive", row.grade),
            ));
        }
    }
    if rates.funeral.min_amount <= Decimal::ZERO || rates.funeral.max_amount < rates.funeral.min_amount
    {
        return Err(invalid(
            &table,
            "funeral bounds must be positive with min_amount <= max_amount",
        ));
    }
    Ok(())
}
