//! Benefit calculation engine for Korean industrial accident compensation
//!
//! This crate turns a claimant's average daily wage, age and disability grade
//! into the amounts set by the Industrial Accident Compensation Insurance Act:
//! temporary disability benefit, disability pension and lump sum, funeral
//! benefit, nursing benefit and survivor pension. Statutory figures are loaded
//! from YAML into frozen [`config::StatutoryTables`].

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
