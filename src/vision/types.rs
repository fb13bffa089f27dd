use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawDetection {
    pub class_id: u32,
    pub confidence: f32,
    #[serde(default)]
    pub class_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawInference {
    pub detections: Vec<RawDetection>,
    pub annotated_image: Option<Vec<u8>>,
}

#[derive(thiserror::Error, Debug)]
pub enum VisionError {
    #[error("could not open image: {0}")]
    Io(#[from] std::io::Error),
    #[error("http error: {0}")]
    Http(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("annotated image is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Pretrained object detector, treated as opaque.
#[async_trait]
pub trait Detector: Send + Sync {
    async fn detect(&self, image: &[u8], min_confidence: f32) -> Result<RawInference, VisionError>;
}
