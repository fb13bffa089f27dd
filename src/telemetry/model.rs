use serde::Serialize;
use std::fmt;

pub const HISTORICAL_LABEL: &str = "historical-dataset";
pub const SYNTHETIC_LABEL: &str = "synthetic";

pub const SIMULATED_ALARM: &str = "Simulated";
pub const UNKNOWN_ALARM: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NutrientStatus {
    Ideal,
    LowRequiresCorrection,
}

impl NutrientStatus {
    /// Ideal inside the inclusive pH band 6.0..=7.0.
    pub fn from_ph(ph: f64) -> Self {
        if (6.0..=7.0).contains(&ph) {
            NutrientStatus::Ideal
        } else {
            NutrientStatus::LowRequiresCorrection
        }
    }
}

impl fmt::Display for NutrientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NutrientStatus::Ideal => f.write_str("Ideal"),
            NutrientStatus::LowRequiresCorrection => f.write_str("Low (requires correction)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MachineReading {
    pub temperature: f64,
    pub vibration: f64,
    pub distance: f64,
    pub temperature_alarm: String,
    pub vibration_alarm: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilReading {
    pub humidity: f64,
    pub ph: f64,
}

/// One snapshot of machine and soil readings. Built once per poll and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetrySample {
    pub machine_temperature: f64,
    pub machine_vibration: f64,
    pub machine_distance: f64,
    pub temperature_alarm: String,
    pub vibration_alarm: String,
    pub soil_humidity: f64,
    pub soil_ph: f64,
    pub soil_nutrient_status: NutrientStatus,
    pub source_label: String,
}

impl TelemetrySample {
    pub fn new(machine: MachineReading, soil: SoilReading, source_label: &str) -> Self {
        Self {
            machine_temperature: machine.temperature,
            machine_vibration: machine.vibration,
            machine_distance: machine.distance,
            temperature_alarm: machine.temperature_alarm,
            vibration_alarm: machine.vibration_alarm,
            soil_humidity: soil.humidity,
            soil_ph: soil.ph,
            soil_nutrient_status: NutrientStatus::from_ph(soil.ph),
            source_label: source_label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ph_band_edges_are_ideal() {
        assert_eq!(NutrientStatus::from_ph(6.0), NutrientStatus::Ideal);
        assert_eq!(NutrientStatus::from_ph(7.0), NutrientStatus::Ideal);
        assert_eq!(NutrientStatus::from_ph(6.5), NutrientStatus::Ideal);
    }

    #[test]
    fn ph_outside_band_needs_correction() {
        assert_eq!(
            NutrientStatus::from_ph(5.99),
            NutrientStatus::LowRequiresCorrection
        );
        assert_eq!(
            NutrientStatus::from_ph(7.01),
            NutrientStatus::LowRequiresCorrection
        );
    }

    #[test]
    fn sample_derives_nutrient_status_from_ph() {
        let machine = MachineReading {
            temperature: 40.0,
            vibration: 0.5,
            distance: 100.0,
            temperature_alarm: SIMULATED_ALARM.to_string(),
            vibration_alarm: SIMULATED_ALARM.to_string(),
        };
        let sample = TelemetrySample::new(
            machine,
            SoilReading {
                humidity: 55.0,
                ph: 5.2,
            },
            SYNTHETIC_LABEL,
        );
        assert_eq!(
            sample.soil_nutrient_status,
            NutrientStatus::LowRequiresCorrection
        );
        assert_eq!(sample.source_label, "synthetic");
    }
}
