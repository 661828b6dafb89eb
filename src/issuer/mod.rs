//! Payslip issuance.
//!
//! Document generation is delegated to a [`PayslipIssuer`] collaborator. The
//! engine derives the payslip content from a finalized run, hands the batch
//! over, and only consumes the per-employee success or failure it reports.

mod memory;

pub use memory::{DEFAULT_TEMPLATE, MemoryIssuer};

use std::collections::HashMap;

use async_trait::async_trait;

use crate::calculation::build_register;
use crate::config::PayrollSettings;
use crate::error::EngineResult;
use crate::models::{
    IssuanceFailure, IssuanceReport, IssuanceSummary, IssuedPayslip, Payslip, PayslipBatch,
    PayslipOutcome, PayrollRun, PayrollRunAdjustment, PayrollRunEmployee,
};

/// Reason recorded when the issuer's report omits an employee of the batch.
pub const MISSING_RESULT_REASON: &str = "no result returned by payslip issuer";

/// Generates and distributes payslip documents.
#[async_trait]
pub trait PayslipIssuer: Send + Sync {
    /// Issues one document per payslip in the batch.
    ///
    /// An `Err` means the operation as a whole did not complete. Individual
    /// document failures belong in the report.
    async fn issue(&self, batch: &PayslipBatch) -> EngineResult<IssuanceReport>;
}

/// Derives one payslip per snapshotted employee.
///
/// Totals include the run's adjustments, exactly as the register shows them.
pub fn build_payslips(
    run: &PayrollRun,
    snapshots: Vec<PayrollRunEmployee>,
    adjustments: Vec<PayrollRunAdjustment>,
    settings: &PayrollSettings,
) -> EngineResult<Vec<Payslip>> {
    let register = build_register(run.clone(), snapshots, adjustments)?;

    Ok(register
        .lines
        .into_iter()
        .map(|line| Payslip {
            run_id: run.id,
            company_name: settings.payslip.company_name.clone(),
            pay_period: run.pay_period,
            currency: line.snapshot.currency,
            employee_id: line.snapshot.employee_id,
            employee_name: line.snapshot.employee_name,
            department: line.snapshot.department,
            base_salary: line.snapshot.base_salary,
            allowance_items: line.snapshot.allowance_items,
            deduction_items: line.snapshot.deduction_items,
            statutory: line.snapshot.statutory,
            adjustments: line.adjustments,
            totals: line.totals,
        })
        .collect())
}

/// Turns the issuer's report into the summary returned to the caller.
///
/// Every employee in the batch lands in exactly one of `issued` or `failures`.
pub fn summarize_issuance(batch: &PayslipBatch, report: IssuanceReport) -> IssuanceSummary {
    let mut outcomes: HashMap<String, PayslipOutcome> = report
        .results
        .into_iter()
        .map(|r| (r.employee_id, r.outcome))
        .collect();

    let mut issued = Vec::new();
    let mut failures = Vec::new();

    for payslip in &batch.payslips {
        match outcomes.remove(&payslip.employee_id) {
            Some(PayslipOutcome::Issued { storage_ref }) => issued.push(IssuedPayslip {
                employee_id: payslip.employee_id.clone(),
                storage_ref,
            }),
            Some(PayslipOutcome::Failed { reason }) => failures.push(IssuanceFailure {
                employee_id: payslip.employee_id.clone(),
                employee_name: payslip.employee_name.clone(),
                reason,
            }),
            None => failures.push(IssuanceFailure {
                employee_id: payslip.employee_id.clone(),
                employee_name: payslip.employee_name.clone(),
                reason: MISSING_RESULT_REASON.to_string(),
            }),
        }
    }

    IssuanceSummary {
        run_id: batch.run_id,
        issued,
        failures,
        template_used: report.template_used,
        send_email: batch.send_email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AdjustmentType, EmployeeTotals, NewAdjustment, PayPeriod, PayslipResult,
        StatutoryContribution, StatutoryStatus,
    };
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn create_run() -> PayrollRun {
        PayrollRun::new_draft(
            "riyadh_hq",
            "SAR",
            PayPeriod::new(
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            )
            .unwrap(),
            "hr.admin",
        )
    }

    fn create_snapshot(run: &PayrollRun, employee_id: &str, name: &str) -> PayrollRunEmployee {
        PayrollRunEmployee {
            run_id: run.id,
            employee_id: employee_id.to_string(),
            employee_name: name.to_string(),
            department: Some("Finance".to_string()),
            currency: "SAR".to_string(),
            base_salary: Decimal::from(1000),
            allowance_items: vec![],
            deduction_items: vec![],
            statutory: StatutoryContribution::none(StatutoryStatus::NotSubject),
            gross_pay: Decimal::from(1000),
            total_deductions: Decimal::ZERO,
            net_pay: Decimal::from(1000),
            warnings: vec![],
            snapshotted_at: Utc::now(),
        }
    }

    fn payslip(run_id: Uuid, employee_id: &str, name: &str) -> Payslip {
        Payslip {
            run_id,
            company_name: "Nakheel Trading Co.".to_string(),
            pay_period: create_run().pay_period,
            currency: "SAR".to_string(),
            employee_id: employee_id.to_string(),
            employee_name: name.to_string(),
            department: None,
            base_salary: Decimal::from(1000),
            allowance_items: vec![],
            deduction_items: vec![],
            statutory: StatutoryContribution::none(StatutoryStatus::NotSubject),
            adjustments: vec![],
            totals: EmployeeTotals {
                employee_id: employee_id.to_string(),
                earnings_adjustment: Decimal::ZERO,
                deductions_adjustment: Decimal::ZERO,
                gross_pay: Decimal::from(1000),
                total_deductions: Decimal::ZERO,
                net_pay: Decimal::from(1000),
            },
        }
    }

    #[test]
    fn test_build_payslips_applies_adjustments_and_branding() {
        let run = create_run();
        let snapshots = vec![
            create_snapshot(&run, "emp_001", "Sara Ali"),
            create_snapshot(&run, "emp_002", "Omar Hassan"),
        ];
        let adjustments = vec![PayrollRunAdjustment::from_request(
            run.id,
            NewAdjustment {
                employee_id: "emp_002".to_string(),
                adjustment_type: AdjustmentType::Earning,
                name: "Bonus".to_string(),
                amount: Decimal::from(250),
                note: None,
            },
        )];
        let mut settings = PayrollSettings::default();
        settings.payslip.company_name = "Nakheel Trading Co.".to_string();

        let payslips = build_payslips(&run, snapshots, adjustments, &settings).unwrap();

        assert_eq!(payslips.len(), 2);
        assert_eq!(payslips[0].company_name, "Nakheel Trading Co.");
        assert_eq!(payslips[0].totals.net_pay, Decimal::from(1000));
        assert!(payslips[0].adjustments.is_empty());
        assert_eq!(payslips[1].adjustments.len(), 1);
        assert_eq!(payslips[1].totals.net_pay, Decimal::from(1250));
    }

    #[test]
    fn test_summarize_partial_failure() {
        let run_id = Uuid::new_v4();
        let batch = PayslipBatch {
            run_id,
            send_email: true,
            payslips: vec![
                payslip(run_id, "emp_001", "Sara Ali"),
                payslip(run_id, "emp_002", "Omar Hassan"),
                payslip(run_id, "emp_003", "Lina Saeed"),
            ],
        };
        let report = IssuanceReport {
            results: vec![
                PayslipResult {
                    employee_id: "emp_001".to_string(),
                    outcome: PayslipOutcome::Issued {
                        storage_ref: "payslips/emp_001.pdf".to_string(),
                    },
                },
                PayslipResult {
                    employee_id: "emp_002".to_string(),
                    outcome: PayslipOutcome::Failed {
                        reason: "renderer timeout".to_string(),
                    },
                },
                PayslipResult {
                    employee_id: "emp_003".to_string(),
                    outcome: PayslipOutcome::Issued {
                        storage_ref: "payslips/emp_003.pdf".to_string(),
                    },
                },
            ],
            template_used: "standard".to_string(),
        };

        let summary = summarize_issuance(&batch, report);

        assert_eq!(summary.issued.len(), 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].employee_name, "Omar Hassan");
        assert_eq!(summary.failures[0].reason, "renderer timeout");
        assert_eq!(summary.template_used, "standard");
        assert!(summary.send_email);
    }

    #[test]
    fn test_summarize_missing_result_counts_as_failure() {
        let run_id = Uuid::new_v4();
        let batch = PayslipBatch {
            run_id,
            send_email: false,
            payslips: vec![payslip(run_id, "emp_001", "Sara Ali")],
        };
        let report = IssuanceReport {
            results: vec![],
            template_used: "standard".to_string(),
        };

        let summary = summarize_issuance(&batch, report);

        assert!(summary.issued.is_empty());
        assert_eq!(summary.failures[0].reason, MISSING_RESULT_REASON);
    }
}
