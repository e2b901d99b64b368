//! Calculation logic for the benefit engine.
//!
//! Every calculator is a pure function of its inputs and the frozen
//! [`StatutoryTables`](crate::config::StatutoryTables). Each returns its
//! amounts rounded once to whole won together with the audit steps that
//! explain them.

mod age_adjustment;
mod disability;
mod funeral;
mod nursing;
mod report;
mod rounding;
mod sick_leave;
mod survivor;
mod treatment_nursing;

pub use age_adjustment::{
    AgeAdjustmentResult, apply_age_adjustment, ratio_for, replacement_rate_for,
};
pub use disability::{DisabilityResult, calculate_disability};
pub use funeral::{
    FuneralBenefitResult, calculate_bounded_funeral_benefit, calculate_funeral_benefit,
};
pub use nursing::{NursingBenefitResult, nursing_benefit};
pub use report::{BenefitReport, ReportInputs, assemble_report};
pub use rounding::round_won;
pub use sick_leave::{SickLeaveRegime, SickLeaveResult, calculate_sick_leave};
pub use survivor::{
    SurvivorPensionResult, calculate_survivor_pension, survivors_for_maximum_addition,
};
pub use treatment_nursing::{
    TreatmentNursingFeeBound, TreatmentNursingFeeRange, TreatmentNursingFeeResult,
    treatment_nursing_fee, treatment_nursing_fee_range,
};
