use crate::config::VisionConfig;
use crate::http_client::build_http_client;
use crate::vision::http::HttpDetector;
use crate::vision::labels::label_for;
use crate::vision::types::{Detector, VisionError};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

pub const SIMULATION_NOTICE: &str = "Simulation mode (model not loaded)";
pub const CLEAR_AREA: &str = "Area clear. No farmworkers or machinery detected.";

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDetection {
    pub class_id: u32,
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    /// Annotated image when the detector returned one, otherwise the input untouched.
    pub image: Vec<u8>,
    pub detections: Vec<LabeledDetection>,
    pub summary: String,
    pub simulated: bool,
}

/// `"Monitoring: 2x A, 1x B identified in the area."`, labels in first-seen order.
pub fn summarize(detections: &[LabeledDetection]) -> String {
    if detections.is_empty() {
        return CLEAR_AREA.to_string();
    }

    let mut counts: Vec<(&str, usize)> = Vec::new();
    for d in detections {
        match counts.iter_mut().find(|(label, _)| *label == d.label) {
            Some((_, n)) => *n += 1,
            None => counts.push((d.label.as_str(), 1)),
        }
    }

    let parts = counts
        .iter()
        .map(|(label, n)| format!("{}x {}", n, label))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Monitoring: {} identified in the area.", parts)
}

pub struct VisionService {
    detector: Option<Arc<dyn Detector>>,
    min_confidence: f32,
}

impl VisionService {
    pub fn new(detector: Option<Arc<dyn Detector>>, min_confidence: f32) -> Self {
        Self {
            detector,
            min_confidence,
        }
    }

    pub fn from_config(config: &VisionConfig, proxy: Option<&str>) -> Self {
        let detector = config.detector_url.clone().and_then(|url| {
            match build_http_client(proxy, config.timeout) {
                Ok(client) => Some(Arc::new(HttpDetector::new(client, url)) as Arc<dyn Detector>),
                Err(e) => {
                    warn!("detector http client unavailable: {}", e);
                    None
                }
            }
        });
        Self::new(detector, config.min_confidence)
    }

    pub fn has_detector(&self) -> bool {
        self.detector.is_some()
    }

    fn simulated(image: Vec<u8>) -> ScanReport {
        ScanReport {
            image,
            detections: Vec::new(),
            summary: SIMULATION_NOTICE.to_string(),
            simulated: true,
        }
    }

    /// Never fails: an absent or failing detector yields the untouched image and a
    /// simulation notice.
    pub async fn scan(&self, image: Vec<u8>) -> ScanReport {
        let Some(detector) = self.detector.as_ref() else {
            return Self::simulated(image);
        };

        let inference = match detector.detect(&image, self.min_confidence).await {
            Ok(inference) => inference,
            Err(e) => {
                warn!("detector failed, falling back to simulation: {}", e);
                return Self::simulated(image);
            }
        };

        let detections: Vec<LabeledDetection> = inference
            .detections
            .into_iter()
            .filter(|d| d.confidence >= self.min_confidence)
            .map(|d| LabeledDetection {
                class_id: d.class_id,
                label: label_for(d.class_id, d.class_name.as_deref()),
                confidence: d.confidence,
            })
            .collect();

        let summary = summarize(&detections);
        info!("field scan: {}", summary);

        ScanReport {
            image: inference.annotated_image.unwrap_or(image),
            detections,
            summary,
            simulated: false,
        }
    }

    pub async fn scan_file(&self, path: &Path) -> Result<ScanReport, VisionError> {
        let image = tokio::fs::read(path).await?;
        Ok(self.scan(image).await)
    }
}
