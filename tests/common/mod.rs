//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use payroll_engine::config::PayrollSettings;
use payroll_engine::directory::MemoryDirectory;
use payroll_engine::issuer::MemoryIssuer;
use payroll_engine::models::{
    AmountBasis, CompensationAssignment, CompensationTemplate, Employee, LineItemKind, PayPeriod,
    PercentageBase, StatutoryRate, WorkLocation,
};
use payroll_engine::run::PayrollRunService;
use payroll_engine::store::MemoryStore;

pub const LOCATION: &str = "riyadh_hq";

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn period(start: &str, end: &str) -> PayPeriod {
    PayPeriod::new(
        NaiveDate::from_str(start).unwrap(),
        NaiveDate::from_str(end).unwrap(),
    )
    .unwrap()
}

pub fn january() -> PayPeriod {
    period("2026-01-01", "2026-01-31")
}

fn template(id: &str, kind: LineItemKind, name: &str, basis: AmountBasis) -> CompensationTemplate {
    CompensationTemplate {
        id: id.to_string(),
        kind,
        name: name.to_string(),
        basis,
    }
}

/// Riyadh location: statutory scheme on, SA rate 9.75 / 11.75.
pub fn location() -> WorkLocation {
    let mut rates = BTreeMap::new();
    rates.insert(
        "SA".to_string(),
        StatutoryRate {
            employee_rate: dec("9.75"),
            employer_rate: dec("11.75"),
        },
    );

    WorkLocation {
        id: LOCATION.to_string(),
        name: "Riyadh Head Office".to_string(),
        currency: "SAR".to_string(),
        statutory_enabled: true,
        statutory_rates: rates,
        templates: vec![
            template(
                "meal",
                LineItemKind::Allowance,
                "Meal Allowance",
                AmountBasis::Fixed { amount: dec("200") },
            ),
            template(
                "transport",
                LineItemKind::Allowance,
                "Transport Allowance",
                AmountBasis::Percentage {
                    percentage: dec("10"),
                    of: PercentageBase::BaseSalary,
                },
            ),
            template(
                "insurance",
                LineItemKind::Deduction,
                "Insurance Deduction",
                AmountBasis::Fixed { amount: dec("70") },
            ),
        ],
    }
}

pub fn employee(id: &str, name: &str, base_salary: &str, templates: &[&str]) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        department: Some("Operations".to_string()),
        work_location_id: LOCATION.to_string(),
        base_salary: dec(base_salary),
        nationality: "SA".to_string(),
        subject_to_statutory_contribution: false,
        statutory_registered_salary: None,
        compensation: CompensationAssignment {
            template_ids: templates.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        },
        active: true,
    }
}

pub struct Harness {
    pub service: PayrollRunService,
    pub directory: Arc<MemoryDirectory>,
    pub issuer: Arc<MemoryIssuer>,
}

pub async fn harness_with(settings: PayrollSettings) -> Harness {
    let directory = Arc::new(MemoryDirectory::new([location()]));

    // gross 1200, deductions 70, net 1130
    directory
        .upsert_employee(employee("emp_001", "Sara Ali", "1000", &["meal", "insurance"]))
        .await;
    // 10% of 2000 = 200 allowance
    directory
        .upsert_employee(employee("emp_002", "Omar Hassan", "2000", &["transport"]))
        .await;
    let mut subject = employee("emp_003", "Lina Saeed", "10000", &[]);
    subject.subject_to_statutory_contribution = true;
    directory.upsert_employee(subject).await;
    let mut no_rate = employee("emp_004", "Ravi Kumar", "4000", &[]);
    no_rate.nationality = "PH".to_string();
    no_rate.subject_to_statutory_contribution = true;
    directory.upsert_employee(no_rate).await;
    let mut inactive = employee("emp_005", "Former Employee", "3000", &[]);
    inactive.active = false;
    directory.upsert_employee(inactive).await;

    let issuer = Arc::new(MemoryIssuer::default());
    let service = PayrollRunService::new(
        Arc::new(MemoryStore::new()),
        directory.clone(),
        issuer.clone(),
        settings,
    );

    Harness {
        service,
        directory,
        issuer,
    }
}

pub async fn harness() -> Harness {
    let mut settings = PayrollSettings::default();
    settings.payslip.company_name = "Nakheel Trading Co.".to_string();
    harness_with(settings).await
}

pub fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}
