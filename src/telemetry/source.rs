use crate::telemetry::dataset::{load_dataset, DatasetError, DatasetRow};
use crate::telemetry::model::{
    MachineReading, SoilReading, TelemetrySample, HISTORICAL_LABEL, SIMULATED_ALARM,
    SYNTHETIC_LABEL,
};
use log::{info, warn};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::path::Path;

/// Supplies the machine half of a telemetry sample. Soil readings are always synthesized.
pub trait SensorSource: Send + Sync {
    fn label(&self) -> &'static str;

    fn machine_reading(&self, rng: &mut dyn RngCore) -> MachineReading;

    fn sample_with(&self, rng: &mut dyn RngCore) -> TelemetrySample {
        let machine = self.machine_reading(rng);
        let soil = synthesize_soil(rng);
        TelemetrySample::new(machine, soil, self.label())
    }

    fn sample(&self) -> TelemetrySample {
        let mut rng = rand::thread_rng();
        self.sample_with(&mut rng)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn synthesize_soil(rng: &mut dyn RngCore) -> SoilReading {
    SoilReading {
        humidity: round_to(rng.gen_range(20.0..=90.0), 1),
        ph: round_to(rng.gen_range(5.0..=8.0), 1),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticSource;

impl SensorSource for SyntheticSource {
    fn label(&self) -> &'static str {
        SYNTHETIC_LABEL
    }

    fn machine_reading(&self, rng: &mut dyn RngCore) -> MachineReading {
        MachineReading {
            temperature: round_to(rng.gen_range(30.0..=80.0), 1),
            vibration: round_to(rng.gen_range(0.1..=1.5), 2),
            distance: round_to(rng.gen_range(80.0..=150.0), 1),
            temperature_alarm: SIMULATED_ALARM.to_string(),
            vibration_alarm: SIMULATED_ALARM.to_string(),
        }
    }
}

/// Replays recorded machine history, one uniformly drawn row per sample.
#[derive(Debug, Clone)]
pub struct DatasetBackedSource {
    rows: Vec<DatasetRow>,
}

impl DatasetBackedSource {
    pub fn new(rows: Vec<DatasetRow>) -> Result<Self, DatasetError> {
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

impl SensorSource for DatasetBackedSource {
    fn label(&self) -> &'static str {
        HISTORICAL_LABEL
    }

    fn machine_reading(&self, rng: &mut dyn RngCore) -> MachineReading {
        match self.rows.choose(&mut *rng) {
            Some(row) => row.to_machine_reading(),
            // rows is never empty after `new`
            None => SyntheticSource.machine_reading(rng),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AnySource {
    Dataset(DatasetBackedSource),
    Synthetic(SyntheticSource),
}

impl AnySource {
    /// Uses the dataset when it exists, parses and has rows; otherwise synthesizes.
    pub fn select(dataset: Option<&Path>) -> Self {
        let Some(path) = dataset else {
            info!("no sensor dataset configured, using synthetic readings");
            return AnySource::Synthetic(SyntheticSource);
        };

        match load_dataset(path).and_then(DatasetBackedSource::new) {
            Ok(source) => {
                info!(
                    "sensor dataset loaded from {} ({} rows)",
                    path.display(),
                    source.len()
                );
                AnySource::Dataset(source)
            }
            Err(DatasetError::NotFound(_)) => {
                info!(
                    "sensor dataset {} not found, using synthetic readings",
                    path.display()
                );
                AnySource::Synthetic(SyntheticSource)
            }
            Err(e) => {
                warn!(
                    "sensor dataset {} unusable ({}), using synthetic readings",
                    path.display(),
                    e
                );
                AnySource::Synthetic(SyntheticSource)
            }
        }
    }
}

impl SensorSource for AnySource {
    fn label(&self) -> &'static str {
        match self {
            AnySource::Dataset(s) => s.label(),
            AnySource::Synthetic(s) => s.label(),
        }
    }

    fn machine_reading(&self, rng: &mut dyn RngCore) -> MachineReading {
        match self {
            AnySource::Dataset(s) => s.machine_reading(rng),
            AnySource::Synthetic(s) => s.machine_reading(rng),
        }
    }
}
