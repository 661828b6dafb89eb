//! In-process payslip issuer.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::PayslipIssuer;
use crate::error::{EngineError, EngineResult};
use crate::models::{IssuanceReport, PayslipBatch, PayslipOutcome, PayslipResult};

/// Template name reported when none is configured.
pub const DEFAULT_TEMPLATE: &str = "standard";

/// Issuer that "stores" documents by recording the batches it receives.
///
/// Employees can be marked to fail, and the whole issuer can be switched
/// offline, so callers can drive partial and total failure paths.
#[derive(Debug)]
pub struct MemoryIssuer {
    template: String,
    failing: RwLock<BTreeMap<String, String>>,
    offline: RwLock<Option<String>>,
    batches: RwLock<Vec<PayslipBatch>>,
}

impl Default for MemoryIssuer {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl MemoryIssuer {
    /// Creates an issuer reporting the given template name.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            failing: RwLock::new(BTreeMap::new()),
            offline: RwLock::new(None),
            batches: RwLock::new(Vec::new()),
        }
    }

    /// Makes document generation fail for one employee.
    pub async fn fail_employee(&self, employee_id: impl Into<String>, reason: impl Into<String>) {
        self.failing
            .write()
            .await
            .insert(employee_id.into(), reason.into());
    }

    /// Makes every subsequent `issue` call fail as a whole.
    pub async fn set_offline(&self, message: Option<String>) {
        *self.offline.write().await = message;
    }

    /// Batches received so far.
    pub async fn batches(&self) -> Vec<PayslipBatch> {
        self.batches.read().await.clone()
    }
}

#[async_trait]
impl PayslipIssuer for MemoryIssuer {
    async fn issue(&self, batch: &PayslipBatch) -> EngineResult<IssuanceReport> {
        if let Some(message) = self.offline.read().await.clone() {
            return Err(EngineError::IssuanceFailed {
                run_id: batch.run_id,
                message,
            });
        }

        let failing = self.failing.read().await;
        let mut seen = HashSet::new();
        let results = batch
            .payslips
            .iter()
            .filter(|p| seen.insert(p.employee_id.clone()))
            .map(|p| {
                let outcome = match failing.get(&p.employee_id) {
                    Some(reason) => PayslipOutcome::Failed {
                        reason: reason.clone(),
                    },
                    None => PayslipOutcome::Issued {
                        storage_ref: format!("payslips/{}/{}.pdf", batch.run_id, p.employee_id),
                    },
                };
                PayslipResult {
                    employee_id: p.employee_id.clone(),
                    outcome,
                }
            })
            .collect();
        drop(failing);

        self.batches.write().await.push(batch.clone());

        Ok(IssuanceReport {
            results,
            template_used: self.template.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn empty_batch() -> PayslipBatch {
        PayslipBatch {
            run_id: Uuid::new_v4(),
            send_email: false,
            payslips: vec![],
        }
    }

    #[tokio::test]
    async fn test_offline_issuer_fails_whole_batch() {
        let issuer = MemoryIssuer::default();
        issuer.set_offline(Some("document service down".to_string())).await;

        let result = issuer.issue(&empty_batch()).await;

        assert!(matches!(result, Err(EngineError::IssuanceFailed { .. })));
        assert!(issuer.batches().await.is_empty());
    }

    #[tokio::test]
    async fn test_reports_template_and_records_batch() {
        let issuer = MemoryIssuer::new("arabic_bilingual");

        let report = issuer.issue(&empty_batch()).await.unwrap();

        assert_eq!(report.template_used, "arabic_bilingual");
        assert_eq!(issuer.batches().await.len(), 1);
    }
}
