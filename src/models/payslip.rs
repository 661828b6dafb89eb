//! Payslips and the issuance contract with the document collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    CompensationLineItem, EmployeeTotals, PayPeriod, PayrollRunAdjustment, StatutoryContribution,
};

/// The content of one employee's payslip, derived from a finalized run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The run the payslip belongs to.
    pub run_id: Uuid,
    /// Company name printed on the document.
    pub company_name: String,
    /// The period paid.
    pub pay_period: PayPeriod,
    /// Currency of every amount below.
    pub currency: String,
    /// The employee.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Department.
    pub department: Option<String>,
    /// Base salary.
    pub base_salary: Decimal,
    /// Recurring allowances.
    pub allowance_items: Vec<CompensationLineItem>,
    /// Recurring deductions.
    pub deduction_items: Vec<CompensationLineItem>,
    /// Statutory contribution.
    pub statutory: StatutoryContribution,
    /// One-time adjustments.
    pub adjustments: Vec<PayrollRunAdjustment>,
    /// Final figures.
    pub totals: EmployeeTotals,
}

/// Everything the issuer needs for one issuance call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipBatch {
    /// The run being issued.
    pub run_id: Uuid,
    /// Whether documents should also be emailed.
    pub send_email: bool,
    /// One payslip per employee.
    pub payslips: Vec<Payslip>,
}

impl PayslipBatch {
    /// Ids of the employees in the batch, in order.
    pub fn employee_ids(&self) -> Vec<String> {
        self.payslips.iter().map(|p| p.employee_id.clone()).collect()
    }
}

/// Outcome of generating one employee's document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayslipOutcome {
    /// The document was generated and stored.
    Issued {
        /// Where the issuer stored the document.
        storage_ref: String,
    },
    /// The document could not be generated.
    Failed {
        /// Why generation failed.
        reason: String,
    },
}

/// Per-employee result reported by the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipResult {
    /// The employee.
    pub employee_id: String,
    /// What happened.
    pub outcome: PayslipOutcome,
}

/// The issuer's report for a completed issuance operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceReport {
    /// One result per employee the issuer processed.
    pub results: Vec<PayslipResult>,
    /// The document template the issuer used.
    pub template_used: String,
}

/// A payslip that failed and needs manual follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceFailure {
    /// The employee.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Why the document failed.
    pub reason: String,
}

/// An issued payslip and where it was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedPayslip {
    /// The employee.
    pub employee_id: String,
    /// Where the document was stored.
    pub storage_ref: String,
}

/// What the caller is told after issuing payslips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceSummary {
    /// The run that was issued.
    pub run_id: Uuid,
    /// Successfully issued payslips.
    pub issued: Vec<IssuedPayslip>,
    /// Payslips that failed; a warning summary, not an error.
    pub failures: Vec<IssuanceFailure>,
    /// The document template used.
    pub template_used: String,
    /// Whether email delivery was requested.
    pub send_email: bool,
}

impl IssuanceSummary {
    /// Returns true if some payslips failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
