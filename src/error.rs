//! Error types for the benefit calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading statutory tables
//! or calculating benefits.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the benefit calculation engine.
///
/// Input validation errors (`InvalidWage`, `InvalidPeriod`, `InvalidGrade`,
/// `InvalidAge`) are raised synchronously at the start of a calculation and
/// are never coerced into a zero benefit.
///
/// # Example
///
/// ```
/// use sanjae_benefit_engine::error::EngineError;
///
/// let error = EngineError::InvalidGrade { grade: 15 };
/// assert_eq!(error.to_string(), "Invalid disability grade 15: must be between 1 and 14");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A statutory table violated one of its load-time invariants.
    #[error("Invalid statutory table '{table}': {message}")]
    InvalidTable {
        /// The table that failed validation.
        table: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// No yearly rate file is effective on the requested date.
    #[error("No statutory rates effective on {date}")]
    RatesNotFound {
        /// The date for which rates were requested.
        date: NaiveDate,
    },

    /// The average wage was zero, negative, or not a finite number.
    #[error("Invalid average wage {value}: must be a positive amount")]
    InvalidWage {
        /// The rejected wage, as supplied.
        value: String,
    },

    /// The benefit period length was negative.
    #[error("Invalid period of {days} days: must not be negative")]
    InvalidPeriod {
        /// The rejected number of days.
        days: i64,
    },

    /// The disability grade was outside 1 to 14.
    #[error("Invalid disability grade {grade}: must be between 1 and 14")]
    InvalidGrade {
        /// The rejected grade.
        grade: i32,
    },

    /// No treatment nursing fee is set for the care grade.
    #[error("Invalid care grade {grade}: no treatment nursing fee is set for it")]
    InvalidCareGrade {
        /// The rejected grade.
        grade: i32,
    },

    /// A supplied age was negative.
    #[error("Invalid age {age}: must not be negative")]
    InvalidAge {
        /// The rejected age.
        age: i32,
    },

    /// The process-wide engine was installed more than once.
    #[error("Benefit engine is already initialized")]
    AlreadyInitialized,
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
