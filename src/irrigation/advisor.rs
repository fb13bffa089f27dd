use crate::telemetry::TelemetrySample;
use serde::Serialize;
use std::fmt;

const MAX_VIBRATION: f64 = 1.0;
const MAX_MACHINE_TEMPERATURE: f64 = 55.0;
const DRY_SOIL_HUMIDITY: f64 = 40.0;
const SOAKED_SOIL_HUMIDITY: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IrrigationAction {
    EmergencyStop,
    TurnOnPump,
    TurnOffPump,
    Monitor,
    /// Shown before the first sample arrives; never returned by [`decide`].
    Waiting,
}

impl fmt::Display for IrrigationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IrrigationAction::EmergencyStop => "EMERGENCY STOP",
            IrrigationAction::TurnOnPump => "TURN ON PUMP",
            IrrigationAction::TurnOffPump => "TURN OFF PUMP",
            IrrigationAction::Monitor => "MONITORING",
            IrrigationAction::Waiting => "WAITING...",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrrigationDecision {
    pub action: IrrigationAction,
    pub message: String,
    pub is_critical: bool,
}

impl IrrigationDecision {
    pub fn waiting() -> Self {
        Self {
            action: IrrigationAction::Waiting,
            message: "System operating normally.".to_string(),
            is_critical: false,
        }
    }

    fn routine(action: IrrigationAction, message: String) -> Self {
        Self {
            action,
            message,
            is_critical: false,
        }
    }
}

/// Maps a sample to a pump action. Rules are checked in priority order and the first
/// match wins; machine safety overrides any soil condition. All comparisons are strict.
pub fn decide(sample: &TelemetrySample) -> IrrigationDecision {
    let vibration = sample.machine_vibration;
    let temperature = sample.machine_temperature;
    let humidity = sample.soil_humidity;

    if vibration > MAX_VIBRATION || temperature > MAX_MACHINE_TEMPERATURE {
        return IrrigationDecision {
            action: IrrigationAction::EmergencyStop,
            message: format!(
                "CRITICAL: pump anomaly (vibration: {:.2} / temperature: {:.1}°C).",
                vibration, temperature
            ),
            is_critical: true,
        };
    }

    if humidity < DRY_SOIL_HUMIDITY {
        IrrigationDecision::routine(
            IrrigationAction::TurnOnPump,
            format!("Dry soil ({}%). Starting irrigation.", humidity),
        )
    } else if humidity > SOAKED_SOIL_HUMIDITY {
        IrrigationDecision::routine(
            IrrigationAction::TurnOffPump,
            format!("Soaked soil ({}%). Stopping irrigation.", humidity),
        )
    } else {
        IrrigationDecision::routine(
            IrrigationAction::Monitor,
            format!("Ideal humidity ({}%). Soil stable.", humidity),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{MachineReading, SoilReading};

    fn sample(temperature: f64, vibration: f64, humidity: f64) -> TelemetrySample {
        TelemetrySample::new(
            MachineReading {
                temperature,
                vibration,
                distance: 100.0,
                temperature_alarm: "Simulated".into(),
                vibration_alarm: "Simulated".into(),
            },
            SoilReading { humidity, ph: 6.5 },
            "synthetic",
        )
    }

    #[test]
    fn high_vibration_stops_regardless_of_soil() {
        for humidity in [10.0, 40.0, 60.0, 85.0] {
            let d = decide(&sample(40.0, 1.01, humidity));
            assert_eq!(d.action, IrrigationAction::EmergencyStop);
            assert!(d.is_critical);
        }
    }

    #[test]
    fn hot_machine_stops_and_reports_values() {
        let d = decide(&sample(55.1, 0.3, 30.0));
        assert_eq!(d.action, IrrigationAction::EmergencyStop);
        assert!(d.is_critical);
        assert!(d.message.contains("0.30"));
        assert!(d.message.contains("55.1"));
    }

    #[test]
    fn thresholds_are_strict() {
        let d = decide(&sample(55.0, 1.0, 60.0));
        assert_eq!(d.action, IrrigationAction::Monitor);
        assert!(!d.is_critical);
    }

    #[test]
    fn dry_soil_turns_pump_on() {
        let d = decide(&sample(40.0, 0.5, 39.9));
        assert_eq!(d.action, IrrigationAction::TurnOnPump);
        assert!(!d.is_critical);
    }

    #[test]
    fn soaked_soil_turns_pump_off() {
        let d = decide(&sample(40.0, 0.5, 80.1));
        assert_eq!(d.action, IrrigationAction::TurnOffPump);
        assert!(!d.is_critical);
    }

    #[test]
    fn humidity_band_edges_monitor() {
        assert_eq!(
            decide(&sample(40.0, 0.5, 40.0)).action,
            IrrigationAction::Monitor
        );
        assert_eq!(
            decide(&sample(40.0, 0.5, 80.0)).action,
            IrrigationAction::Monitor
        );
        assert!(decide(&sample(40.0, 0.5, 80.0)).message.contains("stable"));
    }

    #[test]
    fn waiting_is_not_critical() {
        let w = IrrigationDecision::waiting();
        assert_eq!(w.action, IrrigationAction::Waiting);
        assert!(!w.is_critical);
    }
}
