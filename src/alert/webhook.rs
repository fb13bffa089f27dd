use crate::alert::types::{AlertError, AlertNotifier, DeliveryReport};
use async_trait::async_trait;
use log::{info, warn};
use serde_json::Value;

#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }

    async fn post(&self, subject: &str, message: &str) -> Result<String, AlertError> {
        let body = serde_json::json!({
            "subject": subject,
            "message": message,
        });

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AlertError::Http(e.to_string()))?;

        let status = resp.status();
        let raw = resp
            .text()
            .await
            .map_err(|e| AlertError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(AlertError::Rejected(status.as_u16(), raw));
        }

        // Sinks differ in how they name the id; a bare 2xx still counts as delivered.
        let id = serde_json::from_str::<Value>(&raw)
            .ok()
            .and_then(|v| {
                ["id", "message_id", "MessageId"]
                    .iter()
                    .find_map(|k| v.get(*k).cloned())
            })
            .map(|id| match id {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or_else(|| "accepted".to_string());

        Ok(id)
    }
}

#[async_trait]
impl AlertNotifier for WebhookNotifier {
    async fn notify(&self, subject: &str, message: &str) -> DeliveryReport {
        match self.post(subject, message).await {
            Ok(id) => {
                info!("alert '{}' delivered ({})", subject, id);
                DeliveryReport::Delivered(id)
            }
            Err(e) => {
                warn!("alert '{}' not delivered: {}", subject, e);
                DeliveryReport::Error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{build_http_client, test_server::serve_once};
    use std::time::Duration;

    fn notifier(url: String) -> WebhookNotifier {
        let client = build_http_client(None, Duration::from_secs(5)).unwrap();
        WebhookNotifier::new(client, url)
    }

    #[tokio::test]
    async fn delivered_with_message_id() {
        let (url, server) = serve_once(200, r#"{"MessageId":"abc-123"}"#.to_string()).await;
        let report = notifier(url)
            .notify("Critical alert", "pump anomaly")
            .await;
        assert_eq!(report, DeliveryReport::Delivered("abc-123".to_string()));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST "));
        assert!(request.contains("\"subject\":\"Critical alert\""));
        assert!(request.contains("\"message\":\"pump anomaly\""));
    }

    #[tokio::test]
    async fn plain_success_counts_as_delivered() {
        let (url, _server) = serve_once(202, "ok".to_string()).await;
        let report = notifier(url).notify("s", "m").await;
        assert_eq!(report, DeliveryReport::Delivered("accepted".to_string()));
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let (url, _server) = serve_once(500, r#"{"error":"boom"}"#.to_string()).await;
        let report = notifier(url).notify("s", "m").await;
        match report {
            DeliveryReport::Error(e) => assert!(e.contains("500")),
            other => panic!("unexpected report {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_sink_is_reported() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let report = notifier(format!("http://{}", addr)).notify("s", "m").await;
        assert!(matches!(report, DeliveryReport::Error(_)));
    }
}
