//! Core data models for the benefit calculation engine.
//!
//! This module contains the validated input types, the row types of the
//! statutory tables, and the audit trail records shared by all calculators.

mod audit;
mod inputs;
mod statutory;

pub use audit::AuditStep;
pub use inputs::{Age, AverageWage, DisabilityGrade, PeriodDays};
pub use statutory::{AgeBand, CareLevel, CaregiverType, GradeEntry, NursingRateRow, PayoutMode};
