//! 表单提交抽象 Trait

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::traits::Timer;
use crate::types::{ContactSubmission, SubmissionReceipt};

/// Submission gateway Trait
///
/// Receives validated form data. The site has no backend, so the default
/// implementation is [`SimulatedGateway`].
#[async_trait(?Send)]
pub trait SubmissionGateway {
    /// Deliver a submission
    ///
    /// # Arguments
    /// * `submission` - Collected form values
    ///
    /// # Returns
    /// * `Ok(receipt)` - Accepted
    /// * `Err(CoreError::SubmissionFailed)` - Rejected or undeliverable
    async fn submit(&self, submission: &ContactSubmission) -> CoreResult<SubmissionReceipt>;
}

/// Simulated gateway
///
/// Waits a fixed delay, then always accepts. The wait cannot be cancelled.
pub struct SimulatedGateway {
    timer: Arc<dyn Timer>,
    delay: Duration,
}

impl SimulatedGateway {
    #[must_use]
    pub fn new(timer: Arc<dyn Timer>, delay: Duration) -> Self {
        Self { timer, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait(?Send)]
impl SubmissionGateway for SimulatedGateway {
    async fn submit(&self, submission: &ContactSubmission) -> CoreResult<SubmissionReceipt> {
        log::debug!(
            "Simulating submission of form {} ({} fields), delay {:?}",
            submission.form_id,
            submission.fields.len(),
            self.delay
        );
        self.timer.sleep(self.delay).await;
        let receipt = SubmissionReceipt::issue();
        log::info!(
            "Form {} accepted, reference {}",
            submission.form_id,
            receipt.reference
        );
        Ok(receipt)
    }
}
