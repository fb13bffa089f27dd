use crate::vision::types::{Detector, RawDetection, RawInference, VisionError};
use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;

#[derive(Deserialize)]
struct InferenceResponse {
    #[serde(default)]
    detections: Vec<RawDetection>,
    #[serde(default)]
    annotated_image: Option<String>,
}

/// Detector served over HTTP: base64 image in, detections (and optionally the
/// annotated image) out.
#[derive(Clone)]
pub struct HttpDetector {
    client: reqwest::Client,
    url: String,
}

impl HttpDetector {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl Detector for HttpDetector {
    async fn detect(&self, image: &[u8], min_confidence: f32) -> Result<RawInference, VisionError> {
        let engine = base64::engine::general_purpose::STANDARD;
        let body = serde_json::json!({
            "image": engine.encode(image),
            "confidence": min_confidence,
        });

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| VisionError::Http(e.to_string()))?;

        let status = resp.status();
        let raw = resp
            .text()
            .await
            .map_err(|e| VisionError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(VisionError::Http(format!("{} {}", status.as_u16(), raw)));
        }

        let parsed: InferenceResponse = serde_json::from_str(&raw)
            .map_err(|e| VisionError::InvalidResponse(format!("json parse failed: {e}")))?;

        let annotated_image = match parsed.annotated_image {
            Some(encoded) if !encoded.is_empty() => Some(engine.decode(encoded)?),
            _ => None,
        };

        Ok(RawInference {
            detections: parsed.detections,
            annotated_image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{build_http_client, test_server::serve_once};
    use std::time::Duration;

    fn detector(url: String) -> HttpDetector {
        HttpDetector::new(build_http_client(None, Duration::from_secs(5)).unwrap(), url)
    }

    #[tokio::test]
    async fn parses_detections_and_annotated_image() {
        let annotated = base64::engine::general_purpose::STANDARD.encode(b"boxes");
        let body = format!(
            r#"{{"detections":[{{"class_id":0,"confidence":0.91,"class_name":"person"}},{{"class_id":7,"confidence":0.5}}],"annotated_image":"{}"}}"#,
            annotated
        );
        let (url, server) = serve_once(200, body).await;

        let inference = detector(url).detect(b"raw-image", 0.25).await.unwrap();
        assert_eq!(inference.detections.len(), 2);
        assert_eq!(inference.detections[0].class_name.as_deref(), Some("person"));
        assert_eq!(inference.detections[1].class_name, None);
        assert_eq!(inference.annotated_image, Some(b"boxes".to_vec()));

        let request = server.await.unwrap();
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"raw-image");
        assert!(request.contains(&encoded));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (url, _server) = serve_once(503, "{}".to_string()).await;
        let err = detector(url).detect(b"img", 0.25).await.unwrap_err();
        assert!(matches!(err, VisionError::Http(_)));
    }

    #[tokio::test]
    async fn bad_json_is_invalid_response() {
        let (url, _server) = serve_once(200, "not json".to_string()).await;
        let err = detector(url).detect(b"img", 0.25).await.unwrap_err();
        assert!(matches!(err, VisionError::InvalidResponse(_)));
    }
}
