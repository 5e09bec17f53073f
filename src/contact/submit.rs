use std::future::Future;
use std::time::Duration;

use crate::contact::validate::{ContactSubmission, FieldErrors};

const SUCCESS_MESSAGE: &str = "Thanks for reaching out! I'll get back to you soon.";
const INVALID_MESSAGE: &str = "Please fix the errors below.";
const FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";

/// JSON response returned to the form.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContactResponse {
    /// Whether the message was accepted.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Per-field messages on validation failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ContactResponse {
    fn ok() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_owned(),
            errors: None,
        }
    }

    fn invalid(errors: FieldErrors) -> Self {
        Self {
            success: false,
            message: INVALID_MESSAGE.to_owned(),
            errors: Some(errors),
        }
    }

    fn failed() -> Self {
        Self {
            success: false,
            message: FAILURE_MESSAGE.to_owned(),
            errors: None,
        }
    }
}

/// Delivery failures. Never shown to the sender verbatim.
#[derive(thiserror::Error, Debug)]
pub enum ContactError {
    /// The downstream service refused or failed the message.
    #[error("delivery failed: {0}")]
    Delivery(String),

    /// The round trip did not complete in time.
    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),
}

/// Downstream that receives validated submissions.
pub trait ContactDelivery {
    /// Deliver one submission. Called at most once per submit.
    fn deliver(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactError>> + Send;
}

/// Stand-in delivery that only waits out a fixed latency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedDelivery {
    latency: Duration,
}

impl SimulatedDelivery {
    /// Delivery that succeeds after `latency`.
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Configured latency.
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedDelivery {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

impl ContactDelivery for SimulatedDelivery {
    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        tokio::time::sleep(self.latency).await;
        tracing::debug!(
            email = %submission.email,
            chars = submission.message.chars().count(),
            "simulated contact delivery"
        );
        Ok(())
    }
}

/// Validate `submission` and, if it passes, deliver it once.
///
/// Validation failures come back field by field; delivery failures collapse into one generic
/// message and are only logged. Nothing is retried.
#[tracing::instrument(skip_all, fields(email = %submission.email))]
pub async fn submit_contact<D: ContactDelivery>(
    delivery: &D,
    submission: ContactSubmission,
) -> ContactResponse {
    if let Err(errors) = submission.validate() {
        tracing::debug!(fields = errors.0.len(), "contact submission rejected");
        return ContactResponse::invalid(errors);
    }
    match delivery.deliver(&submission).await {
        Ok(()) => ContactResponse::ok(),
        Err(e) => {
            tracing::warn!(error = %e, "contact delivery failed");
            ContactResponse::failed()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/contact/submit.rs"]
mod tests;
