//! Collaborator doubles.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use sui_call_core::{CallSubmitter, PreparedCall, SubmissionReceipt};

/// Submitter that always fails, counting attempts.
#[derive(Default)]
pub struct FailingSubmitter {
    attempts: AtomicUsize,
}

impl FailingSubmitter {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CallSubmitter for FailingSubmitter {
    async fn submit(&self, _call: &PreparedCall) -> Result<SubmissionReceipt> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(anyhow!("node rejected transaction"))
    }
}
