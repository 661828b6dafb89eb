//! Compensation resolution.
//!
//! Turns an employee's compensation assignment into concrete allowance and
//! deduction line items in the work location's currency, then adds the
//! statutory contribution. Resolution is a pure function of its inputs.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    AmountBasis, AuditStep, AuditWarning, CompensationLineItem, Employee, LineItemKind,
    LineItemSource, PercentageBase, ResolvedCompensation, WorkLocation, line_items_total,
};

use super::money::percentage_of;
use super::statutory::calculate_statutory_contribution;

/// Warning code raised when an employee references a template the location lacks.
pub const UNKNOWN_TEMPLATE_WARNING: &str = "UNKNOWN_TEMPLATE";

/// Resolves the amount of a line item from its basis.
///
/// Percentages of the statutory registered salary use zero when the employee
/// has no registered salary.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_amount;
/// use payroll_engine::models::{AmountBasis, CompensationAssignment, Employee, PercentageBase};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Sara Ali".to_string(),
///     department: None,
///     work_location_id: "riyadh_hq".to_string(),
///     base_salary: Decimal::from(2000),
///     nationality: "SA".to_string(),
///     subject_to_statutory_contribution: false,
///     statutory_registered_salary: None,
///     compensation: CompensationAssignment::default(),
///     active: true,
/// };
///
/// let ten_percent = AmountBasis::Percentage {
///     percentage: Decimal::from(10),
///     of: PercentageBase::BaseSalary,
/// };
/// assert_eq!(resolve_amount(&ten_percent, &employee).unwrap(), Decimal::from(200));
/// ```
pub fn resolve_amount(basis: &AmountBasis, employee: &Employee) -> EngineResult<Decimal> {
    match *basis {
        AmountBasis::Fixed { amount } => Ok(amount),
        AmountBasis::Percentage { percentage, of } => {
            percentage_of(percentage_base(of, employee), percentage, "percentage line item")
        }
    }
}

fn percentage_base(of: PercentageBase, employee: &Employee) -> Decimal {
    match of {
        PercentageBase::BaseSalary => employee.base_salary,
        PercentageBase::StatutoryRegisteredSalary => employee.registered_salary_or_zero(),
    }
}

/// Resolves an employee's full compensation breakdown at a work location.
///
/// Assigned templates are resolved in assignment order, with employee
/// overrides replacing the computed amount. Custom items follow. The
/// statutory contribution is computed last, over base salary plus allowances.
/// Fails with `AmountOverflow` when any resolved figure is out of range.
pub fn resolve_compensation(
    employee: &Employee,
    location: &WorkLocation,
) -> EngineResult<ResolvedCompensation> {
    let mut allowance_items = Vec::new();
    let mut deduction_items = Vec::new();
    let mut warnings = Vec::new();
    let mut audit_steps = Vec::new();
    let mut step_number: u32 = 1;

    for template_id in &employee.compensation.template_ids {
        let Some(template) = location.template(template_id) else {
            warnings.push(AuditWarning {
                code: UNKNOWN_TEMPLATE_WARNING.to_string(),
                message: format!(
                    "Template '{}' assigned to employee '{}' is not offered at location '{}'",
                    template_id, employee.id, location.id
                ),
                severity: "medium".to_string(),
            });
            continue;
        };

        let computed = resolve_amount(&template.basis, employee)?;
        let overridden = employee.compensation.overrides.get(template_id).copied();
        let (amount, source) = match overridden {
            Some(custom) => (
                custom,
                LineItemSource::Override {
                    template_id: template.id.clone(),
                },
            ),
            None => (
                computed,
                LineItemSource::Template {
                    template_id: template.id.clone(),
                },
            ),
        };

        let item = CompensationLineItem {
            kind: template.kind,
            name: template.name.clone(),
            source,
            basis: template.basis,
            amount,
        };
        audit_steps.push(line_item_step(
            step_number,
            employee,
            &location.currency,
            &item,
            computed,
        ));
        step_number += 1;
        push_item(item, &mut allowance_items, &mut deduction_items);
    }

    for custom in &employee.compensation.custom_items {
        let amount = resolve_amount(&custom.basis, employee)?;
        let item = CompensationLineItem {
            kind: custom.kind,
            name: custom.name.clone(),
            source: LineItemSource::Custom,
            basis: custom.basis,
            amount,
        };
        audit_steps.push(line_item_step(
            step_number,
            employee,
            &location.currency,
            &item,
            amount,
        ));
        step_number += 1;
        push_item(item, &mut allowance_items, &mut deduction_items);
    }

    let statutory = calculate_statutory_contribution(
        employee,
        location,
        line_items_total(&allowance_items)?,
        step_number,
    )?;
    audit_steps.push(statutory.audit_step);
    warnings.extend(statutory.warning);

    Ok(ResolvedCompensation {
        employee_id: employee.id.clone(),
        currency: location.currency.clone(),
        base_salary: employee.base_salary,
        allowance_items,
        deduction_items,
        statutory: statutory.contribution,
        warnings,
        audit_steps,
    })
}

fn push_item(
    item: CompensationLineItem,
    allowances: &mut Vec<CompensationLineItem>,
    deductions: &mut Vec<CompensationLineItem>,
) {
    match item.kind {
        LineItemKind::Allowance => allowances.push(item),
        LineItemKind::Deduction => deductions.push(item),
    }
}

fn line_item_step(
    step_number: u32,
    employee: &Employee,
    currency: &str,
    item: &CompensationLineItem,
    computed: Decimal,
) -> AuditStep {
    let reasoning = match (&item.source, item.basis) {
        (LineItemSource::Override { template_id }, _) => format!(
            "Employee override {currency} {} replaces template '{}' amount {currency} {}",
            item.amount.normalize(),
            template_id,
            computed.normalize()
        ),
        (_, AmountBasis::Fixed { amount }) => format!(
            "Fixed {} '{}' of {currency} {}",
            item.kind,
            item.name,
            amount.normalize()
        ),
        (_, AmountBasis::Percentage { percentage, of }) => format!(
            "{}% of {currency} {} = {currency} {}",
            percentage.normalize(),
            percentage_base(of, employee).normalize(),
            item.amount.normalize()
        ),
    };

    AuditStep {
        step_number,
        rule_id: format!("{}_line_item", item.kind),
        rule_name: item.name.clone(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "source": item.source,
            "basis": item.basis
        }),
        output: serde_json::json!({
            "computed_amount": computed.normalize().to_string(),
            "amount": item.amount.normalize().to_string()
        }),
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CompensationAssignment, CompensationTemplate, CustomLineItem, StatutoryRate,
        StatutoryStatus,
    };
    use std::collections::BTreeMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn template(id: &str, kind: LineItemKind, basis: AmountBasis) -> CompensationTemplate {
        CompensationTemplate {
            id: id.to_string(),
            kind,
            name: id.replace('_', " "),
            basis,
        }
    }

    fn create_location() -> WorkLocation {
        let mut rates = BTreeMap::new();
        rates.insert(
            "SA".to_string(),
            StatutoryRate {
                employee_rate: dec("10"),
                employer_rate: dec("12"),
            },
        );
        WorkLocation {
            id: "riyadh_hq".to_string(),
            name: "Riyadh HQ".to_string(),
            currency: "SAR".to_string(),
            statutory_enabled: true,
            statutory_rates: rates,
            templates: vec![
                template(
                    "housing",
                    LineItemKind::Allowance,
                    AmountBasis::Percentage {
                        percentage: dec("10"),
                        of: PercentageBase::BaseSalary,
                    },
                ),
                template(
                    "transport",
                    LineItemKind::Allowance,
                    AmountBasis::Fixed {
                        amount: dec("200"),
                    },
                ),
                template(
                    "pension_top_up",
                    LineItemKind::Deduction,
                    AmountBasis::Percentage {
                        percentage: dec("2.5"),
                        of: PercentageBase::StatutoryRegisteredSalary,
                    },
                ),
            ],
        }
    }

    fn create_employee(template_ids: &[&str]) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Sara Ali".to_string(),
            department: Some("Finance".to_string()),
            work_location_id: "riyadh_hq".to_string(),
            base_salary: dec("2000"),
            nationality: "SA".to_string(),
            subject_to_statutory_contribution: false,
            statutory_registered_salary: None,
            compensation: CompensationAssignment {
                template_ids: template_ids.iter().map(|s| s.to_string()).collect(),
                overrides: BTreeMap::new(),
                custom_items: vec![],
            },
            active: true,
        }
    }

    #[test]
    fn test_percentage_of_base_is_decimal_exact() {
        let resolved =
            resolve_compensation(&create_employee(&["housing"]), &create_location()).unwrap();

        assert_eq!(resolved.allowance_items.len(), 1);
        assert_eq!(resolved.allowance_items[0].amount, dec("200"));
        assert_eq!(
            resolved.allowance_items[0].source,
            LineItemSource::Template {
                template_id: "housing".to_string()
            }
        );
    }

    #[test]
    fn test_fixed_amount_used_verbatim() {
        let resolved =
            resolve_compensation(&create_employee(&["transport"]), &create_location()).unwrap();
        assert_eq!(resolved.allowance_items[0].amount, dec("200"));
    }

    #[test]
    fn test_registered_salary_falls_back_to_zero() {
        let resolved =
            resolve_compensation(&create_employee(&["pension_top_up"]), &create_location())
                .unwrap();

        assert!(resolved.allowance_items.is_empty());
        assert_eq!(resolved.deduction_items.len(), 1);
        assert_eq!(resolved.deduction_items[0].amount, Decimal::ZERO);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_registered_salary_used_when_set() {
        let mut employee = create_employee(&["pension_top_up"]);
        employee.statutory_registered_salary = Some(dec("1500"));
        let resolved = resolve_compensation(&employee, &create_location()).unwrap();
        assert_eq!(resolved.deduction_items[0].amount, dec("37.5"));
    }

    #[test]
    fn test_override_replaces_template_amount() {
        let mut employee = create_employee(&["housing", "transport"]);
        employee
            .compensation
            .overrides
            .insert("housing".to_string(), dec("750"));

        let resolved = resolve_compensation(&employee, &create_location()).unwrap();

        assert_eq!(resolved.allowance_items[0].amount, dec("750"));
        assert_eq!(
            resolved.allowance_items[0].source,
            LineItemSource::Override {
                template_id: "housing".to_string()
            }
        );
        assert_eq!(resolved.allowance_items[1].amount, dec("200"));
        assert_eq!(resolved.audit_steps[0].output["computed_amount"], "200");
        assert_eq!(resolved.audit_steps[0].output["amount"], "750");
        assert_eq!(
            resolved.audit_steps[0].reasoning,
            "Employee override SAR 750 replaces template 'housing' amount SAR 200"
        );
    }

    #[test]
    fn test_audit_reasoning_uses_location_currency() {
        let mut location = create_location();
        location.currency = "AED".to_string();
        let resolved =
            resolve_compensation(&create_employee(&["housing", "transport"]), &location).unwrap();

        assert_eq!(resolved.audit_steps[0].reasoning, "10% of AED 2000 = AED 200");
        assert_eq!(
            resolved.audit_steps[1].reasoning,
            "Fixed allowance 'transport' of AED 200"
        );
        assert!(resolved.audit_steps.iter().all(|step| !step.reasoning.contains('$')));
    }

    #[test]
    fn test_out_of_range_percentage_is_an_error() {
        let mut employee = create_employee(&["housing"]);
        employee.base_salary = Decimal::MAX;

        let result = resolve_compensation(&employee, &create_location());

        assert!(matches!(
            result,
            Err(crate::error::EngineError::AmountOverflow { .. })
        ));
    }

    #[test]
    fn test_custom_items_follow_templates() {
        let mut employee = create_employee(&["transport"]);
        employee.compensation.custom_items = vec![
            CustomLineItem {
                kind: LineItemKind::Allowance,
                name: "Remote work stipend".to_string(),
                basis: AmountBasis::Fixed {
                    amount: dec("150"),
                },
            },
            CustomLineItem {
                kind: LineItemKind::Deduction,
                name: "Loan repayment".to_string(),
                basis: AmountBasis::Percentage {
                    percentage: dec("5"),
                    of: PercentageBase::BaseSalary,
                },
            },
        ];

        let resolved = resolve_compensation(&employee, &create_location()).unwrap();

        assert_eq!(resolved.allowance_items.len(), 2);
        assert_eq!(resolved.allowance_items[1].name, "Remote work stipend");
        assert_eq!(resolved.allowance_items[1].source, LineItemSource::Custom);
        assert_eq!(resolved.deduction_items[0].amount, dec("100"));
    }

    #[test]
    fn test_unknown_template_is_skipped_with_warning() {
        let resolved =
            resolve_compensation(&create_employee(&["missing", "transport"]), &create_location())
                .unwrap();

        assert_eq!(resolved.allowance_items.len(), 1);
        assert_eq!(resolved.warnings.len(), 1);
        assert_eq!(resolved.warnings[0].code, UNKNOWN_TEMPLATE_WARNING);
    }

    #[test]
    fn test_statutory_base_includes_allowances() {
        let mut employee = create_employee(&["housing", "transport"]);
        employee.subject_to_statutory_contribution = true;

        let resolved = resolve_compensation(&employee, &create_location()).unwrap();

        assert_eq!(resolved.statutory.status, StatutoryStatus::Applied);
        assert_eq!(resolved.statutory.contribution_base, dec("2400"));
        assert_eq!(resolved.statutory.employee_amount, dec("240"));
        assert_eq!(resolved.statutory.employer_amount, dec("288"));

        let last = resolved.audit_steps.last().unwrap();
        assert_eq!(last.rule_id, "statutory_contribution");
        assert_eq!(last.step_number, 3);
    }

    #[test]
    fn test_amounts_are_in_location_currency() {
        let resolved = resolve_compensation(&create_employee(&[]), &create_location()).unwrap();
        assert_eq!(resolved.currency, "SAR");
        assert_eq!(resolved.base_salary, dec("2000"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let mut employee = create_employee(&["housing", "transport", "pension_top_up"]);
        employee.subject_to_statutory_contribution = true;
        employee
            .compensation
            .overrides
            .insert("transport".to_string(), dec("350"));
        let location = create_location();

        let first = resolve_compensation(&employee, &location).unwrap();
        let second = resolve_compensation(&employee, &location).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
