//! Audit trail records.
//!
//! Every calculator explains itself with one or more [`AuditStep`]s so a
//! figure shown to a claimant can be traced back to the statutory rule and
//! the table values that produced it.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use sanjae_benefit_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "funeral_benefit".to_string(),
///     rule_name: "Funeral Benefit".to_string(),
///     clause_ref: "Art. 71".to_string(),
///     input: serde_json::json!({ "average_wage": "100000" }),
///     output: serde_json::json!({ "amount": "12000000" }),
///     reasoning: "100000 x 120 days = 12000000".to_string(),
/// };
/// assert_eq!(step.rule_id, "funeral_benefit");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statutory article for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
