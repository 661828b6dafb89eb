//! Calculation result models for the payroll engine.
//!
//! This module contains the outputs of compensation resolution, per-employee
//! and run-level totals, the validation report and the assembled register,
//! together with the audit trace types that explain each figure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CompensationLineItem, PayrollRun, PayrollRunAdjustment, PayrollRunEmployee};

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but must stay visible to the person running payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// Why a statutory contribution was or was not computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatutoryStatus {
    /// A rate was found and applied.
    Applied,
    /// The employee is not subject to the scheme.
    NotSubject,
    /// The location does not run the scheme.
    SchemeDisabled,
    /// The employee's nationality has no configured rate; contribution is zero.
    NoRateConfigured,
}

/// The statutory contribution resolved for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryContribution {
    /// Why the figures below are what they are.
    pub status: StatutoryStatus,
    /// Base salary plus allowances; zero when not applied.
    pub contribution_base: Decimal,
    /// Employee rate used, as a percentage.
    pub employee_rate: Option<Decimal>,
    /// Employer rate used, as a percentage.
    pub employer_rate: Option<Decimal>,
    /// Amount deducted from the employee's pay.
    pub employee_amount: Decimal,
    /// Amount borne by the employer; reported, never deducted.
    pub employer_amount: Decimal,
}

impl StatutoryContribution {
    /// A zero contribution with the given reason.
    pub fn none(status: StatutoryStatus) -> Self {
        Self {
            status,
            contribution_base: Decimal::ZERO,
            employee_rate: None,
            employer_rate: None,
            employee_amount: Decimal::ZERO,
            employer_amount: Decimal::ZERO,
        }
    }
}

/// The full compensation breakdown resolved for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCompensation {
    /// The employee this breakdown belongs to.
    pub employee_id: String,
    /// Currency of every amount below.
    pub currency: String,
    /// Base salary.
    pub base_salary: Decimal,
    /// Resolved allowances, templates first then custom items.
    pub allowance_items: Vec<CompensationLineItem>,
    /// Resolved deductions, templates first then custom items.
    pub deduction_items: Vec<CompensationLineItem>,
    /// Statutory contribution.
    pub statutory: StatutoryContribution,
    /// Advisory warnings raised while resolving.
    pub warnings: Vec<AuditWarning>,
    /// Ordered explanation of every resolved figure.
    pub audit_steps: Vec<AuditStep>,
}

/// Per-employee figures after merging adjustments into the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTotals {
    /// The employee these totals belong to.
    pub employee_id: String,
    /// Sum of earning adjustments.
    pub earnings_adjustment: Decimal,
    /// Sum of deduction adjustments.
    pub deductions_adjustment: Decimal,
    /// Snapshot gross pay plus earnings adjustments.
    pub gross_pay: Decimal,
    /// Snapshot deductions plus deduction adjustments.
    pub total_deductions: Decimal,
    /// Gross pay minus total deductions.
    pub net_pay: Decimal,
}

/// Run-level totals: a plain sum across included employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Sum of gross pay.
    pub total_gross: Decimal,
    /// Sum of total deductions.
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub total_net: Decimal,
    /// Number of employees summed.
    pub employee_count: u32,
}

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks finalize.
    Error,
    /// Shown to the user; does not block finalize.
    Warning,
}

/// The built-in validation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCode {
    /// The run has no employee snapshots.
    NoEmployees,
    /// An employee's computed net pay is below zero.
    NegativeNetPay,
    /// An employee's base salary is zero.
    ZeroBaseSalary,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Which check produced the finding.
    pub code: ValidationCode,
    /// Whether it blocks finalize.
    pub severity: Severity,
    /// The employee concerned, for per-employee checks.
    pub employee_id: Option<String>,
    /// The employee's display name, for per-employee checks.
    pub employee_name: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// All findings of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Findings in employee order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Returns true if any finding blocks finalize.
    pub fn has_blocking(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// The findings that block finalize.
    pub fn blocking(&self) -> Vec<ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .cloned()
            .collect()
    }

    /// The advisory findings.
    pub fn warnings(&self) -> Vec<ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .cloned()
            .collect()
    }
}

/// One employee's row in the register: snapshot, adjustments and computed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterLine {
    /// The frozen compensation snapshot.
    pub snapshot: PayrollRunEmployee,
    /// The employee's adjustments in this run.
    pub adjustments: Vec<PayrollRunAdjustment>,
    /// Computed totals.
    pub totals: EmployeeTotals,
}

/// The computed payroll register for a run, as shown on the review step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRegister {
    /// The run as stored when the register was computed.
    pub run: PayrollRun,
    /// One line per snapshotted employee.
    pub lines: Vec<RegisterLine>,
    /// Run-level totals.
    pub totals: RunTotals,
    /// Result of the validation pass.
    pub validation: ValidationReport,
    /// Advisory warnings carried by the snapshots.
    pub warnings: Vec<AuditWarning>,
}
