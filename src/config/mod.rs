//! Statutory table loading and management for the benefit calculation engine.
//!
//! This module loads the statutory tables (disability grades, age degression,
//! benefit ratios and the yearly money amounts) from YAML files and freezes
//! them into validated [`StatutoryTables`].
//!
//! # Example
//!
//! ```no_run
//! use sanjae_benefit_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/kr_iaci").unwrap();
//! println!("Loaded scheme: {}", loader.latest_tables().scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AgeScheduleConfig, BenefitRules, DisabilityPensionRule, FuneralBounds, FuneralRule,
    GradeTableConfig, LowIncomeRule, NursingAmounts, RateConfig, SchemeMetadata, StatutoryTables,
    SurvivorPensionRule, TemporaryDisabilityAmounts, TemporaryDisabilityRule, TreatmentNursingAmounts,
    TreatmentNursingRow,
};

#[cfg(test)]
pub(crate) use types::fixtures;
