//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod adjustment;
mod calculation_result;
mod compensation;
mod employee;
mod pay_period;
mod payroll_run;
mod payslip;
mod snapshot;
mod work_location;

pub use adjustment::{AdjustmentType, NewAdjustment, PayrollRunAdjustment};
pub use calculation_result::{
    AuditStep, AuditWarning, EmployeeTotals, PayrollRegister, RegisterLine, ResolvedCompensation,
    RunTotals, Severity, StatutoryContribution, StatutoryStatus, ValidationCode, ValidationIssue,
    ValidationReport,
};
pub use compensation::{
    AmountBasis, CompensationAssignment, CompensationLineItem, CompensationTemplate,
    CustomLineItem, LineItemKind, LineItemSource, PercentageBase, line_items_total,
};
pub use employee::Employee;
pub use pay_period::PayPeriod;
pub use payroll_run::{PayrollRun, RunAction, RunStatus};
pub use payslip::{
    IssuanceFailure, IssuanceReport, IssuanceSummary, IssuedPayslip, Payslip, PayslipBatch,
    PayslipOutcome, PayslipResult,
};
pub use snapshot::PayrollRunEmployee;
pub use work_location::{StatutoryRate, WorkLocation};
