use crate::alert::types::{AlertNotifier, DeliveryReport};
use crate::alert::webhook::WebhookNotifier;
use crate::config::AlertConfig;
use crate::http_client::build_http_client;
use async_trait::async_trait;
use log::{info, warn};

/// Used when no sink is configured: the alert only goes to the log.
#[derive(Clone, Default)]
pub struct SimulatedNotifier;

#[async_trait]
impl AlertNotifier for SimulatedNotifier {
    async fn notify(&self, subject: &str, message: &str) -> DeliveryReport {
        info!("[simulated alert] {} - {}", subject, message);
        DeliveryReport::SimulatedDelivery
    }
}

#[derive(Clone)]
pub enum AnyNotifier {
    Webhook(WebhookNotifier),
    Simulated(SimulatedNotifier),
}

impl AnyNotifier {
    pub fn from_config(config: &AlertConfig, proxy: Option<&str>) -> Self {
        let Some(url) = config.webhook_url.clone() else {
            return AnyNotifier::Simulated(SimulatedNotifier);
        };
        match build_http_client(proxy, config.timeout) {
            Ok(client) => AnyNotifier::Webhook(WebhookNotifier::new(client, url)),
            Err(e) => {
                warn!("alert http client unavailable, simulating delivery: {}", e);
                AnyNotifier::Simulated(SimulatedNotifier)
            }
        }
    }
}

#[async_trait]
impl AlertNotifier for AnyNotifier {
    async fn notify(&self, subject: &str, message: &str) -> DeliveryReport {
        match self {
            AnyNotifier::Webhook(n) => n.notify(subject, message).await,
            AnyNotifier::Simulated(n) => n.notify(subject, message).await,
        }
    }
}
