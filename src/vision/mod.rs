pub mod http;
pub mod labels;
pub mod service;
pub mod types;

pub use http::HttpDetector;
pub use labels::{label_for, FARM_LABELS};
pub use service::{summarize, LabeledDetection, ScanReport, VisionService};
pub use types::{Detector, RawDetection, RawInference, VisionError};
