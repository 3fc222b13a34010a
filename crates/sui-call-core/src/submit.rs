//! Transaction submission boundary.

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builder::PreparedCall;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Digest or other handle identifying the submitted transaction.
    pub reference: String,
}

/// Receives fully encoded calls. Signing and execution live behind this.
#[async_trait]
pub trait CallSubmitter: Send + Sync {
    async fn submit(&self, call: &PreparedCall) -> Result<SubmissionReceipt>;
}

/// Keeps every submitted call in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct RecordingSubmitter {
    calls: Mutex<Vec<PreparedCall>>,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<PreparedCall> {
        self.calls.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

#[async_trait]
impl CallSubmitter for RecordingSubmitter {
    async fn submit(&self, call: &PreparedCall) -> Result<SubmissionReceipt> {
        let mut calls = self.calls.lock();
        calls.push(call.clone());
        let reference = format!("dry-run-{}", calls.len());
        info!(
            target_fn = %call.target,
            arguments = call.arguments.len(),
            reference = %reference,
            "recorded call"
        );
        Ok(SubmissionReceipt { reference })
    }
}
