//! Payroll Run Engine
//!
//! This crate computes and governs payroll runs for a work location and pay
//! period: it resolves each employee's recurring compensation and statutory
//! contribution, freezes it into per-run snapshots, layers one-time
//! adjustments on top, validates and finalizes the run, and hands payslip
//! generation to an external issuer.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod directory;
pub mod error;
pub mod issuer;
pub mod models;
pub mod run;
pub mod store;
