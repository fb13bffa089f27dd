pub mod calculator;
pub mod presets;

pub use calculator::{area, area_by_name, total_input, PlantingPlan, Shape};
pub use presets::{find_preset, CropPreset, CROP_PRESETS};
