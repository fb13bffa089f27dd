pub mod dataset;
pub mod model;
pub mod source;

pub use dataset::{load_dataset, DatasetError, DatasetRow};
pub use model::{MachineReading, NutrientStatus, SoilReading, TelemetrySample};
pub use source::{AnySource, DatasetBackedSource, SensorSource, SyntheticSource};
