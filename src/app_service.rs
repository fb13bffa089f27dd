use crate::alert::AlertNotifier;
use crate::app_state::{AppEvent, PlanView, ScanView};
use crate::commands::RateInput;
use crate::irrigation::decide;
use crate::planting::{area_by_name, total_input, PlantingPlan, Shape, CROP_PRESETS};
use crate::storage::{InventoryRecord, InventoryStore};
use crate::telemetry::SensorSource;
use crate::vision::VisionService;
use log::{info, warn};
use std::path::Path;
use tokio::sync::mpsc;

pub const CRITICAL_ALERT_SUBJECT: &str = "Critical alert";

/// The dashboard plans a single row, like the planting form.
const DASHBOARD_ROW_COUNT: u32 = 1;

pub fn plan_view(shape: &str, dim1: f64, dim2: f64, rate: &RateInput) -> PlanView {
    let (crop, input_name, rate_per_m2) = match rate {
        RateInput::Crop(p) => (Some(p.crop.to_string()), p.input_name.to_string(), p.rate_per_m2),
        RateInput::PerSquareMeter(r) => (None, "custom input".to_string(), *r),
    };

    match shape.parse::<Shape>() {
        Ok(s) => {
            let plan = PlantingPlan::new(s, dim1, dim2, rate_per_m2, DASHBOARD_ROW_COUNT);
            PlanView {
                shape: plan.shape.to_string(),
                dimensions: plan.dimensions,
                area: plan.area,
                crop,
                input_name,
                rate_per_m2,
                total_input: plan.total_input,
            }
        }
        Err(_) => {
            let area = area_by_name(shape, dim1, dim2);
            PlanView {
                shape: shape.to_string(),
                dimensions: vec![dim1],
                area,
                crop,
                input_name,
                rate_per_m2,
                total_input: total_input(area, rate_per_m2, DASHBOARD_ROW_COUNT),
            }
        }
    }
}

pub fn crop_lines() -> Vec<String> {
    CROP_PRESETS
        .iter()
        .map(|p| format!("{}: {} {:.2} kg/m²", p.crop, p.input_name, p.rate_per_m2))
        .collect()
}

/// One sensor poll: sample, decide, and forward critical decisions to the notifier.
pub async fn poll_sensors<S, N>(source: &S, notifier: &N, tx: &mpsc::UnboundedSender<AppEvent>)
where
    S: SensorSource + ?Sized,
    N: AlertNotifier + ?Sized,
{
    let sample = source.sample();
    let decision = decide(&sample);
    info!(
        "poll [{}]: {} (temp {:.1}, vib {:.2}, humidity {:.1}%)",
        sample.source_label,
        decision.action,
        sample.machine_temperature,
        sample.machine_vibration,
        sample.soil_humidity
    );

    if decision.is_critical {
        let report = notifier
            .notify(CRITICAL_ALERT_SUBJECT, &decision.message)
            .await;
        info!("critical alert delivery: {}", report);
        let _ = tx.send(AppEvent::Log(format!("{} [{}]", report, CRITICAL_ALERT_SUBJECT)));
    }

    let _ = tx.send(AppEvent::Telemetry { sample, decision });
}

pub async fn refresh_inventory<S>(store: &S, tx: &mpsc::UnboundedSender<AppEvent>)
where
    S: InventoryStore + ?Sized,
{
    let listing = store.list().await;
    let _ = tx.send(AppEvent::Inventory(listing));
}

pub async fn add_inventory<S>(
    store: &S,
    record: InventoryRecord,
    tx: &mpsc::UnboundedSender<AppEvent>,
) where
    S: InventoryStore + ?Sized,
{
    let name = record.name.clone();
    match store.insert(record).await {
        Ok(target) => {
            let _ = tx.send(AppEvent::Message(format!("✓ {}: {}", name, target)));
            refresh_inventory(store, tx).await;
        }
        Err(e) => {
            warn!("inventory insert failed for {}: {}", name, e);
            let _ = tx.send(AppEvent::Error(format!("could not save {}: {}", name, e)));
        }
    }
}

pub async fn scan_image(vision: &VisionService, path: &Path, tx: &mpsc::UnboundedSender<AppEvent>) {
    match vision.scan_file(path).await {
        Ok(report) => {
            let _ = tx.send(AppEvent::Scan(ScanView {
                path: path.to_path_buf(),
                summary: report.summary,
                detections: report.detections,
                simulated: report.simulated,
                image_bytes: report.image.len(),
            }));
        }
        Err(e) => {
            let _ = tx.send(AppEvent::Error(format!("{} ({})", e, path.display())));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::DeliveryReport;
    use crate::irrigation::IrrigationAction;
    use crate::planting::find_preset;
    use crate::storage::{Category, FileStore, StoreStatus};
    use crate::telemetry::{load_dataset, DatasetBackedSource};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::io::Write;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl AlertNotifier for RecordingNotifier {
        async fn notify(&self, subject: &str, message: &str) -> DeliveryReport {
            self.sent
                .lock()
                .unwrap()
                .push((subject.to_string(), message.to_string()));
            DeliveryReport::Delivered("m-1".to_string())
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
        let mut out = Vec::new();
        while let Ok(e) = rx.try_recv() {
            out.push(e);
        }
        out
    }

    fn hot_pump_source(dir: &tempfile::TempDir) -> DatasetBackedSource {
        let path = dir.path().join("history.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "temperatura,vibracao,distancia,alarme_temperatura,alarme_vibracao").unwrap();
        writeln!(f, "70.0,0.5,100.0,High,Normal").unwrap();
        DatasetBackedSource::new(load_dataset(&path).unwrap()).unwrap()
    }

    #[test]
    fn plan_with_crop_preset() {
        let corn = find_preset("corn").unwrap();
        let view = plan_view("rectangle", 100.0, 50.0, &RateInput::Crop(corn));
        assert_eq!(view.area, 5000.0);
        assert_eq!(view.total_input, 4000.0);
        assert_eq!(view.crop.as_deref(), Some("Corn"));
        assert_eq!(view.dimensions, vec![100.0, 50.0]);
    }

    #[test]
    fn plan_with_unknown_shape_is_zero() {
        let view = plan_view("hexagon", 10.0, 0.0, &RateInput::PerSquareMeter(2.0));
        assert_eq!(view.area, 0.0);
        assert_eq!(view.total_input, 0.0);
        assert_eq!(view.crop, None);
    }

    #[test]
    fn crop_lines_cover_every_preset() {
        let lines = crop_lines();
        assert_eq!(lines.len(), CROP_PRESETS.len());
        assert_eq!(lines[0], "Soy: NPK fertilizer 0.50 kg/m²");
    }

    #[tokio::test]
    async fn critical_poll_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let source = hot_pump_source(&dir);
        let notifier = RecordingNotifier::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        poll_sensors(&source, &notifier, &tx).await;

        let sent = notifier.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, CRITICAL_ALERT_SUBJECT);
        assert!(sent[0].1.starts_with("CRITICAL"));

        let events = drain(&mut rx);
        assert!(matches!(&events[0], AppEvent::Log(m) if m.contains("m-1")));
        match &events[1] {
            AppEvent::Telemetry { sample, decision } => {
                assert_eq!(decision.action, IrrigationAction::EmergencyStop);
                assert_eq!(sample.machine_temperature, 70.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn add_then_list_locally() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("inventory.json"));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let record = InventoryRecord::new(
            "milho",
            Category::Grain,
            3,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        );

        add_inventory(&store, record, &tx).await;

        let events = drain(&mut rx);
        assert!(matches!(&events[0], AppEvent::Message(m) if m.contains("MILHO")));
        match &events[1] {
            AppEvent::Inventory(listing) => {
                assert_eq!(listing.status, StoreStatus::LocalFallback);
                assert_eq!(listing.records.len(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_image_reports_error() {
        let vision = VisionService::new(None, 0.25);
        let (tx, mut rx) = mpsc::unbounded_channel();
        scan_image(&vision, Path::new("/definitely/not/here.jpg"), &tx).await;
        let events = drain(&mut rx);
        assert!(matches!(&events[0], AppEvent::Error(m) if m.contains("could not open image")));
    }
}
