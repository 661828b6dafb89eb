//! Calculation logic for the payroll engine.
//!
//! This module contains compensation resolution (template, percentage and
//! custom line items plus the statutory contribution), the payroll calculator
//! that merges run adjustments into snapshot figures, the pre-finalize
//! validation pass, register assembly, and display rounding and export rows.

mod compensation;
mod export;
mod money;
mod register;
mod statutory;
mod totals;
mod validation;

pub use compensation::{UNKNOWN_TEMPLATE_WARNING, resolve_amount, resolve_compensation};
pub use export::{RegisterRow, register_rows};
pub use money::{
    checked_add, checked_sub, checked_sum, format_amount, percentage_of, round_for_display,
};
pub use register::build_register;
pub use statutory::{
    NO_STATUTORY_RATE_WARNING, StatutoryContributionResult, calculate_statutory_contribution,
};
pub use totals::{compute_employee_totals, compute_run_totals};
pub use validation::validate_register;
