use crate::telemetry::model::{MachineReading, UNKNOWN_ALARM};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("dataset not found: {0}")]
    NotFound(PathBuf),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset has no rows")]
    Empty,
}

/// One row of the recorded machine history. Missing cells read as zero / unknown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetRow {
    #[serde(rename = "temperatura", default)]
    pub temperature: Option<f64>,
    #[serde(rename = "vibracao", default)]
    pub vibration: Option<f64>,
    #[serde(rename = "distancia", default)]
    pub distance: Option<f64>,
    #[serde(rename = "alarme_temperatura", default)]
    pub temperature_alarm: Option<String>,
    #[serde(rename = "alarme_vibracao", default)]
    pub vibration_alarm: Option<String>,
}

impl DatasetRow {
    pub fn to_machine_reading(&self) -> MachineReading {
        let alarm = |v: &Option<String>| {
            v.as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN_ALARM)
                .to_string()
        };
        MachineReading {
            temperature: self.temperature.unwrap_or(0.0),
            vibration: self.vibration.unwrap_or(0.0),
            distance: self.distance.unwrap_or(0.0),
            temperature_alarm: alarm(&self.temperature_alarm),
            vibration_alarm: alarm(&self.vibration_alarm),
        }
    }
}

/// Reads the whole history file. Any unparseable row fails the load.
pub fn load_dataset(path: &Path) -> Result<Vec<DatasetRow>, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let rows = reader
        .deserialize::<DatasetRow>()
        .collect::<Result<Vec<_>, _>>()?;

    if rows.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(rows)
}
