use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_INVENTORY_FILE: &str = "data/inventory.json";
const DEFAULT_SENSOR_DATASET: &str = "data/sensor_history.csv";
const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_DETECTOR_CONFIDENCE: f32 = 0.25;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_url: Option<String>,
    pub local_path: PathBuf,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub webhook_url: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub detector_url: Option<String>,
    pub min_confidence: f32,
    pub timeout: Duration,
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub sensor_dataset: Option<PathBuf>,
    pub alert: AlertConfig,
    pub vision: VisionConfig,
    pub http_proxy: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout = non_empty("REMOTE_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_REMOTE_TIMEOUT_SECS));

        let min_confidence = non_empty("DETECTOR_CONFIDENCE")
            .and_then(|v| v.parse::<f32>().ok())
            .filter(|c| (0.0..=1.0).contains(c))
            .unwrap_or(DEFAULT_DETECTOR_CONFIDENCE);

        Self {
            store: StoreConfig {
                database_url: non_empty("DATABASE_URL"),
                local_path: non_empty("INVENTORY_FILE")
                    .unwrap_or_else(|| DEFAULT_INVENTORY_FILE.to_string())
                    .into(),
                timeout,
            },
            sensor_dataset: Some(
                non_empty("SENSOR_DATASET")
                    .unwrap_or_else(|| DEFAULT_SENSOR_DATASET.to_string())
                    .into(),
            ),
            alert: AlertConfig {
                webhook_url: non_empty("ALERT_WEBHOOK_URL"),
                timeout,
            },
            vision: VisionConfig {
                detector_url: non_empty("DETECTOR_URL"),
                min_confidence,
                timeout,
            },
            http_proxy: non_empty("FARMTECH_PROXY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let c = config_from(&[]);
        assert!(c.store.database_url.is_none());
        assert_eq!(c.store.local_path, PathBuf::from("data/inventory.json"));
        assert_eq!(c.store.timeout, Duration::from_secs(8));
        assert_eq!(
            c.sensor_dataset,
            Some(PathBuf::from("data/sensor_history.csv"))
        );
        assert!(c.alert.webhook_url.is_none());
        assert_eq!(c.vision.min_confidence, 0.25);
    }

    #[test]
    fn reads_overrides_and_ignores_bad_values() {
        let c = config_from(&[
            ("DATABASE_URL", "postgres://farm@db/farm"),
            ("INVENTORY_FILE", "/tmp/inv.json"),
            ("REMOTE_TIMEOUT_SECS", "not-a-number"),
            ("DETECTOR_CONFIDENCE", "0.4"),
            ("ALERT_WEBHOOK_URL", "   "),
        ]);
        assert_eq!(
            c.store.database_url.as_deref(),
            Some("postgres://farm@db/farm")
        );
        assert_eq!(c.store.local_path, PathBuf::from("/tmp/inv.json"));
        assert_eq!(c.store.timeout, Duration::from_secs(8));
        assert_eq!(c.vision.min_confidence, 0.4);
        assert!(c.alert.webhook_url.is_none());
    }
}
