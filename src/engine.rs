//! Shared engine handle for the presentation layer.
//!
//! [`BenefitEngine`] binds the calculators to one frozen set of statutory
//! tables. It is cheap to clone and safe to share between threads. A process
//! that wants a single global engine installs one at startup with
//! [`install`] and reads it back with [`shared`].

use std::sync::{Arc, OnceLock};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{
    BenefitReport, DisabilityResult, FuneralBenefitResult, NursingBenefitResult, ReportInputs,
    SickLeaveResult, SurvivorPensionResult, TreatmentNursingFeeRange, TreatmentNursingFeeResult,
    assemble_report, calculate_bounded_funeral_benefit, calculate_disability,
    calculate_funeral_benefit, calculate_sick_leave, calculate_survivor_pension, nursing_benefit,
    treatment_nursing_fee, treatment_nursing_fee_range,
};
use crate::config::{ConfigLoader, StatutoryTables};
use crate::error::{EngineError, EngineResult};
use crate::models::{CareLevel, CaregiverType, GradeEntry, NursingRateRow};

static ENGINE: OnceLock<BenefitEngine> = OnceLock::new();

/// A calculation engine bound to one set of statutory tables.
///
/// # Example
///
/// ```
/// use sanjae_benefit_engine::engine::BenefitEngine;
/// use rust_decimal::Decimal;
///
/// let engine = BenefitEngine::embedded().unwrap();
/// let result = engine.calculate_sick_leave(Decimal::from(200_000), 30, None).unwrap();
/// assert_eq!(result.daily_amount, Decimal::from(140_000));
/// ```
#[derive(Debug, Clone)]
pub struct BenefitEngine {
    tables: Arc<StatutoryTables>,
}

impl BenefitEngine {
    /// Creates an engine over the given tables.
    pub fn new(tables: StatutoryTables) -> Self {
        Self {
            tables: Arc::new(tables),
        }
    }

    /// Creates an engine over the tables effective on `date`.
    pub fn for_date(loader: &ConfigLoader, date: NaiveDate) -> EngineResult<Self> {
        let tables = loader.tables_for(date)?;
        debug!(%date, effective_date = %tables.effective_date(), "Selected statutory tables");
        Ok(Self::new(tables.clone()))
    }

    /// Creates an engine over the most recent embedded tables.
    pub fn embedded() -> EngineResult<Self> {
        let loader = ConfigLoader::embedded()?;
        Ok(Self::new(loader.latest_tables().clone()))
    }

    /// Returns the statutory tables.
    pub fn tables(&self) -> &StatutoryTables {
        &self.tables
    }

    /// Calculates the temporary disability benefit.
    pub fn calculate_sick_leave(
        &self,
        average_wage: Decimal,
        period_days: i64,
        age: Option<i32>,
    ) -> EngineResult<SickLeaveResult> {
        let result = calculate_sick_leave(average_wage, period_days, age, &self.tables, 1);
        log_outcome("sick_leave", &result);
        result
    }

    /// Calculates the disability benefit for a grade.
    pub fn calculate_disability(
        &self,
        average_wage: Decimal,
        grade: i32,
    ) -> EngineResult<DisabilityResult> {
        let result = calculate_disability(average_wage, grade, &self.tables, 1);
        log_outcome("disability", &result);
        result
    }

    /// Calculates the funeral benefit as 120 days of average wage.
    pub fn calculate_funeral_benefit(
        &self,
        average_wage: Decimal,
    ) -> EngineResult<FuneralBenefitResult> {
        let result = calculate_funeral_benefit(average_wage, &self.tables, 1);
        log_outcome("funeral", &result);
        result
    }

    /// Calculates the funeral benefit within the year's statutory bounds.
    pub fn calculate_bounded_funeral_benefit(
        &self,
        average_wage: Decimal,
    ) -> EngineResult<FuneralBenefitResult> {
        let result = calculate_bounded_funeral_benefit(average_wage, &self.tables, 1);
        log_outcome("funeral_bounded", &result);
        result
    }

    /// Calculates the survivor pension.
    pub fn calculate_survivor_pension(
        &self,
        average_wage: Decimal,
        qualified_survivors: u32,
    ) -> EngineResult<SurvivorPensionResult> {
        let result =
            calculate_survivor_pension(average_wage, qualified_survivors, &self.tables, 1);
        log_outcome("survivor_pension", &result);
        result
    }

    /// Looks up the daily nursing benefit.
    pub fn nursing_benefit(
        &self,
        care_level: CareLevel,
        caregiver_type: CaregiverType,
    ) -> NursingBenefitResult {
        nursing_benefit(care_level, caregiver_type, &self.tables, 1)
    }

    /// Looks up the daily treatment nursing fee.
    pub fn treatment_nursing_fee(
        &self,
        grade: i32,
        caregiver_type: CaregiverType,
    ) -> EngineResult<TreatmentNursingFeeResult> {
        let result = treatment_nursing_fee(grade, caregiver_type, &self.tables, 1);
        log_outcome("treatment_nursing_fee", &result);
        result
    }

    /// Returns the lowest and highest treatment nursing fee.
    pub fn treatment_nursing_fee_range(&self) -> TreatmentNursingFeeRange {
        treatment_nursing_fee_range(&self.tables)
    }

    /// Assembles a full benefit report.
    pub fn report(&self, inputs: &ReportInputs) -> EngineResult<BenefitReport> {
        let result = assemble_report(inputs, &self.tables);
        match &result {
            Ok(report) => info!(
                effective_date = %report.effective_date,
                audit_steps = report.audit_trace.len(),
                has_disability = report.disability.is_some(),
                "Assembled benefit report"
            ),
            Err(error) => warn!(error = %error, "Benefit report rejected"),
        }
        result
    }

    /// Returns the 14-row disability grade table.
    pub fn grade_table(&self) -> &[GradeEntry] {
        self.tables.grade_table()
    }

    /// Returns the nursing benefit rate table.
    pub fn nursing_rate_table(&self) -> Vec<NursingRateRow> {
        self.tables.nursing_rate_table()
    }
}

fn log_outcome<T>(calculation: &str, result: &EngineResult<T>) {
    match result {
        Ok(_) => debug!(calculation, "Calculation completed"),
        Err(error) => warn!(calculation, error = %error, "Calculation rejected"),
    }
}

/// Installs the process-wide engine.
///
/// Call once at startup, before any calculation reads [`shared`].
///
/// # Errors
///
/// Returns `AlreadyInitialized` if an engine was installed before. The
/// installed engine is never replaced.
pub fn install(engine: BenefitEngine) -> EngineResult<&'static BenefitEngine> {
    let effective_date = engine.tables().effective_date();
    match ENGINE.set(engine) {
        Ok(()) => {
            info!(%effective_date, "Installed benefit engine");
            ENGINE.get().ok_or(EngineError::AlreadyInitialized)
        }
        Err(_) => {
            warn!(%effective_date, "Benefit engine already installed");
            Err(EngineError::AlreadyInitialized)
        }
    }
}

/// Returns the process-wide engine, if one was installed.
pub fn shared() -> Option<&'static BenefitEngine> {
    ENGINE.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures::{dec, tables};

    #[test]
    fn test_engine_is_clone_send_sync() {
        fn assert_traits<T: Clone + Send + Sync>() {}
        assert_traits::<BenefitEngine>();
    }

    #[test]
    fn test_engine_delegates_to_calculators() {
        let engine = BenefitEngine::new(tables());

        let sick_leave = engine.calculate_sick_leave(dec("200000"), 30, Some(61)).unwrap();
        assert_eq!(sick_leave.daily_amount, dec("132000"));

        let disability = engine.calculate_disability(dec("100000"), 1).unwrap();
        assert!(disability.lump_sum.is_none());

        let funeral = engine.calculate_funeral_benefit(dec("100000")).unwrap();
        assert_eq!(funeral.amount, dec("12000000"));

        let nursing = engine.nursing_benefit(CareLevel::Constant, CaregiverType::Family);
        assert_eq!(nursing.daily_amount, dec("44760"));

        let fee = engine.treatment_nursing_fee(3, CaregiverType::Family).unwrap();
        assert_eq!(fee.daily_amount, dec("41170"));
        assert_eq!(engine.treatment_nursing_fee_range().max.daily_amount, dec("67140"));
    }

    #[test]
    fn test_engine_propagates_validation_errors() {
        let engine = BenefitEngine::new(tables());
        assert!(matches!(
            engine.calculate_sick_leave(dec("-5"), 30, None),
            Err(EngineError::InvalidWage { .. })
        ));
        assert!(matches!(
            engine.calculate_disability(dec("100000"), 0),
            Err(EngineError::InvalidGrade { grade: 0 })
        ));
        assert!(matches!(
            engine.treatment_nursing_fee(4, CaregiverType::Professional),
            Err(EngineError::InvalidCareGrade { grade: 4 })
        ));
    }

    #[test]
    fn test_reference_tables() {
        let engine = BenefitEngine::new(tables());
        assert_eq!(engine.grade_table().len(), 14);
        assert_eq!(engine.nursing_rate_table().len(), 4);
    }

    #[test]
    fn test_clones_share_tables() {
        let engine = BenefitEngine::new(tables());
        let clone = engine.clone();
        assert!(Arc::ptr_eq(&engine.tables, &clone.tables));
    }

    #[test]
    fn test_install_once() {
        let installed = install(BenefitEngine::new(tables())).unwrap();
        assert_eq!(installed.grade_table().len(), 14);
        assert!(shared().is_some());

        let second = install(BenefitEngine::new(tables()));
        assert!(matches!(second, Err(EngineError::AlreadyInitialized)));
    }
}
