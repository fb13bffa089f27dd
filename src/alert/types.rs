use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryReport {
    Delivered(String),
    SimulatedDelivery,
    Error(String),
}

impl fmt::Display for DeliveryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryReport::Delivered(id) => write!(f, "✓ Alert sent, id {}", id),
            DeliveryReport::SimulatedDelivery => write!(f, "⚠ [Simulated] alert recorded"),
            DeliveryReport::Error(e) => write!(f, "✗ Alert error: {}", e),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AlertError {
    #[error("http error: {0}")]
    Http(String),
    #[error("rejected with status {0}: {1}")]
    Rejected(u16, String),
}

/// Sink for critical alerts. Delivery problems come back inside the report.
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn notify(&self, subject: &str, message: &str) -> DeliveryReport;
}
