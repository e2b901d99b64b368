//! Row types of the statutory tables.
//!
//! These types are deserialized from the YAML configuration and exported
//! read-only so the presentation layer can render reference tables without
//! running a calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a disability grade's benefit may be paid.
///
/// # Example
///
/// ```
/// use sanjae_benefit_engine::models::PayoutMode;
///
/// assert!(PayoutMode::Choice.has_pension());
/// assert!(PayoutMode::Choice.has_lump_sum());
/// assert!(!PayoutMode::PensionOnly.has_lump_sum());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutMode {
    /// Paid only as an annual pension (grades 1-3).
    PensionOnly,
    /// Paid only as a one-time lump sum (grades 8-14).
    LumpSumOnly,
    /// The claimant chooses between pension and lump sum (grades 4-7).
    Choice,
}

impl PayoutMode {
    /// Returns true if this mode pays a pension.
    pub fn has_pension(&self) -> bool {
        matches!(self, Self::PensionOnly | Self::Choice)
    }

    /// Returns true if this mode pays a lump sum.
    pub fn has_lump_sum(&self) -> bool {
        matches!(self, Self::LumpSumOnly | Self::Choice)
    }

    /// Returns the snake_case name used in configuration and audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PensionOnly => "pension_only",
            Self::LumpSumOnly => "lump_sum_only",
            Self::Choice => "choice",
        }
    }
}

/// A row of the disability grade table.
///
/// Day counts are multiplied by the average wage. Pension-only grades keep
/// their statutory lump-sum day count for reference; it is never paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeEntry {
    /// The disability grade, 1 to 14.
    pub grade: u8,
    /// How the benefit may be paid.
    pub payout_mode: PayoutMode,
    /// Days of average wage paid as a lump sum.
    pub lump_sum_days: Decimal,
    /// Days of average wage paid per year as a pension.
    #[serde(default)]
    pub pension_days: Option<Decimal>,
}

/// A band of the age degression schedule.
///
/// From `min_age` onwards, temporary disability benefit replaces
/// `replacement_rate` of the average wage instead of the base rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBand {
    /// The first age this band applies to.
    pub min_age: u32,
    /// The share of the average wage paid from this age.
    pub replacement_rate: Decimal,
}

/// The level of care a nursing benefit covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareLevel {
    /// Constant care (상시 간병).
    Constant,
    /// Occasional care (수시 간병).
    Occasional,
}

impl CareLevel {
    /// Returns the snake_case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Occasional => "occasional",
        }
    }
}

/// Who provides the care.
///
/// The nursing benefit pays both types the same rate. The treatment nursing
/// fee pays family caregivers less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaregiverType {
    /// A professional caregiver.
    Professional,
    /// A family member.
    Family,
}

impl CaregiverType {
    /// Returns the snake_case name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Family => "family",
        }
    }
}

/// One cell of the nursing rate table, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NursingRateRow {
    /// The care level.
    pub care_level: CareLevel,
    /// The caregiver type.
    pub caregiver_type: CaregiverType,
    /// The flat daily amount in won.
    pub daily_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_mode_paths() {
        assert!(PayoutMode::PensionOnly.has_pension());
        assert!(!PayoutMode::PensionOnly.has_lump_sum());
        assert!(!PayoutMode::LumpSumOnly.has_pension());
        assert!(PayoutMode::LumpSumOnly.has_lump_sum());
    }

    #[test]
    fn test_payout_mode_deserialization() {
        let mode: PayoutMode = serde_yaml::from_str("lump_sum_only").unwrap();
        assert_eq!(mode, PayoutMode::LumpSumOnly);
        assert_eq!(mode.as_str(), "lump_sum_only");
    }

    #[test]
    fn test_grade_entry_without_pension_days() {
        let yaml = r#"{ grade: 9, payout_mode: lump_sum_only, lump_sum_days: "385" }"#;
        let entry: GradeEntry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entry.grade, 9);
        assert_eq!(entry.lump_sum_days, Decimal::from(385));
        assert!(entry.pension_days.is_none());
    }

    #[test]
    fn test_care_level_serialization() {
        let json = serde_json::to_string(&CareLevel::Occasional).unwrap();
        assert_eq!(json, "\"occasional\"");
        let caregiver: CaregiverType = serde_json::from_str("\"family\"").unwrap();
        assert_eq!(caregiver, CaregiverType::Family);
    }
}
