//! Validated calculation inputs.
//!
//! Callers hand the engine plain numbers; these newtypes are the only way
//! those numbers reach a calculator, so every invariant is checked once at
//! construction and never again.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// The claimant's statutory average daily wage, in won.
///
/// Always strictly positive. A non-positive wage is an input error, not a
/// zero-benefit case.
///
/// # Example
///
/// ```
/// use sanjae_benefit_engine::models::AverageWage;
/// use rust_decimal::Decimal;
///
/// let wage = AverageWage::new(Decimal::from(100_000)).unwrap();
/// assert_eq!(wage.amount(), Decimal::from(100_000));
/// assert!(AverageWage::new(Decimal::from(-5)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AverageWage(Decimal);

impl AverageWage {
    /// Creates an average wage, rejecting zero and negative amounts.
    pub fn new(amount: Decimal) -> EngineResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(EngineError::InvalidWage {
                value: amount.to_string(),
            });
        }
        Ok(Self(amount))
    }

    /// Creates an average wage from a floating point value.
    ///
    /// NaN and infinite values are rejected alongside non-positive ones.
    pub fn from_f64(amount: f64) -> EngineResult<Self> {
        let decimal = Decimal::try_from(amount).map_err(|_| EngineError::InvalidWage {
            value: amount.to_string(),
        })?;
        Self::new(decimal)
    }

    /// Returns the wage amount in won.
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

/// A claimant's age in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Age(u32);

impl Age {
    /// Creates an age, rejecting negative values.
    pub fn new(years: i32) -> EngineResult<Self> {
        u32::try_from(years)
            .map(Self)
            .map_err(|_| EngineError::InvalidAge { age: years })
    }

    /// Validates an optional age. `None` stays `None`.
    pub fn from_optional(years: Option<i32>) -> EngineResult<Option<Self>> {
        years.map(Self::new).transpose()
    }

    /// Returns the age in years.
    pub fn years(&self) -> u32 {
        self.0
    }
}

/// A permanent disability grade, 1 (most severe) to 14 (least severe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DisabilityGrade(u8);

impl DisabilityGrade {
    /// The most severe grade.
    pub const MOST_SEVERE: u8 = 1;
    /// The least severe grade.
    pub const LEAST_SEVERE: u8 = 14;

    /// Creates a grade, rejecting values outside 1 to 14.
    ///
    /// # Example
    ///
    /// ```
    /// use sanjae_benefit_engine::models::DisabilityGrade;
    ///
    /// assert!(DisabilityGrade::new(1).is_ok());
    /// assert!(DisabilityGrade::new(14).is_ok());
    /// assert!(DisabilityGrade::new(0).is_err());
    /// assert!(DisabilityGrade::new(15).is_err());
    /// ```
    pub fn new(grade: i32) -> EngineResult<Self> {
        u8::try_from(grade)
            .ok()
            .filter(|g| (Self::MOST_SEVERE..=Self::LEAST_SEVERE).contains(g))
            .map(Self)
            .ok_or(EngineError::InvalidGrade { grade })
    }

    /// Returns the grade number.
    pub fn value(&self) -> u8 {
        self.0
    }
}

/// The length of a temporary disability period in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PeriodDays(u32);

impl PeriodDays {
    /// Creates a period length, rejecting negative values.
    pub fn new(days: i64) -> EngineResult<Self> {
        u32::try_from(days)
            .map(Self)
            .map_err(|_| EngineError::InvalidPeriod { days })
    }

    /// Returns the number of days.
    pub fn days(&self) -> u32 {
        self.0
    }
}
