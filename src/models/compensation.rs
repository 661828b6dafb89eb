//! Compensation configuration and resolved line items.
//!
//! Templates live on a work location; an employee's [`CompensationAssignment`]
//! picks templates, may override their amounts, and may add custom items.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::checked_sum;
use crate::error::EngineResult;

/// Whether a line item adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    /// Recurring earning added to gross pay.
    Allowance,
    /// Recurring deduction subtracted from gross pay.
    Deduction,
}

impl fmt::Display for LineItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineItemKind::Allowance => write!(f, "allowance"),
            LineItemKind::Deduction => write!(f, "deduction"),
        }
    }
}

/// The salary figure a percentage-based line item is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageBase {
    /// The employee's base salary.
    BaseSalary,
    /// The salary registered with the statutory scheme (zero when unset).
    StatutoryRegisteredSalary,
}

/// How a line item's amount is determined.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AmountBasis, PercentageBase};
/// use rust_decimal::Decimal;
///
/// let json = r#"{"type": "percentage", "percentage": "10", "of": "base_salary"}"#;
/// let basis: AmountBasis = serde_json::from_str(json).unwrap();
/// assert_eq!(
///     basis,
///     AmountBasis::Percentage {
///         percentage: Decimal::from(10),
///         of: PercentageBase::BaseSalary,
///     }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AmountBasis {
    /// A fixed amount in the location's currency.
    Fixed {
        /// The amount, used verbatim.
        amount: Decimal,
    },
    /// A percentage of a named salary base.
    Percentage {
        /// The percentage (e.g. `10` for 10%).
        percentage: Decimal,
        /// The salary figure the percentage applies to.
        of: PercentageBase,
    },
}

/// An allowance or deduction template offered at a work location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationTemplate {
    /// Template identifier, unique within the location.
    pub id: String,
    /// Whether the template is an allowance or a deduction.
    pub kind: LineItemKind,
    /// Display name (e.g. "Housing Allowance").
    pub name: String,
    /// How the amount is computed.
    pub basis: AmountBasis,
}

/// An ad hoc line item configured on a single employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLineItem {
    /// Whether the item is an allowance or a deduction.
    pub kind: LineItemKind,
    /// Display name.
    pub name: String,
    /// How the amount is computed.
    pub basis: AmountBasis,
}

/// The recurring compensation configured on an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationAssignment {
    /// Location templates that apply to the employee, in display order.
    #[serde(default)]
    pub template_ids: Vec<String>,
    /// Custom amounts replacing a template's computed amount, keyed by template id.
    #[serde(default)]
    pub overrides: BTreeMap<String, Decimal>,
    /// Items that exist only on this employee.
    #[serde(default)]
    pub custom_items: Vec<CustomLineItem>,
}

/// Where a resolved line item came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LineItemSource {
    /// Computed from a location template.
    Template {
        /// The template that produced the item.
        template_id: String,
    },
    /// A location template whose amount was replaced by an employee override.
    Override {
        /// The template that was overridden.
        template_id: String,
    },
    /// An employee-specific item.
    Custom,
}

/// A resolved allowance or deduction with its amount in the location's currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationLineItem {
    /// Whether the item is an allowance or a deduction.
    pub kind: LineItemKind,
    /// Display name.
    pub name: String,
    /// Where the item came from.
    pub source: LineItemSource,
    /// The basis the amount was computed from.
    pub basis: AmountBasis,
    /// The resolved amount.
    pub amount: Decimal,
}

/// Sums the amounts of a slice of line items.
pub fn line_items_total(items: &[CompensationLineItem]) -> EngineResult<Decimal> {
    checked_sum(items.iter().map(|item| item.amount), "line item total")
}
