use chrono::NaiveDate;
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(alias = "Grão", alias = "Grao")]
    Grain,
    #[serde(alias = "Fertilizante")]
    Fertilizer,
    #[serde(alias = "Defensivo")]
    Pesticide,
    #[serde(alias = "Maquinário", alias = "Maquinario")]
    Machinery,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Grain,
        Category::Fertilizer,
        Category::Pesticide,
        Category::Machinery,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Grain => "Grain",
            Category::Fertilizer => "Fertilizer",
            Category::Pesticide => "Pesticide",
            Category::Machinery => "Machinery",
        };
        f.write_str(name)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grain" | "grão" | "grao" => Ok(Category::Grain),
            "fertilizer" | "fertilizante" => Ok(Category::Fertilizer),
            "pesticide" | "defensivo" => Ok(Category::Pesticide),
            "machinery" | "maquinário" | "maquinario" => Ok(Category::Machinery),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// A stored supply item. The local file keeps the historical Portuguese keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "nome", alias = "name")]
    pub name: String,
    #[serde(rename = "tipo", alias = "category")]
    pub category: Category,
    #[serde(rename = "quantidade", alias = "quantity")]
    pub quantity: i64,
    #[serde(rename = "validade", alias = "expiration_date")]
    pub expiration_date: NaiveDate,
}

impl InventoryRecord {
    /// Builds a record with the name normalized to uppercase.
    pub fn new(
        name: &str,
        category: Category,
        quantity: i64,
        expiration_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.trim().to_uppercase(),
            category,
            quantity,
            expiration_date,
        }
    }

    pub fn expiration_iso(&self) -> String {
        self.expiration_date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    RemoteConnected,
    LocalFallback,
    SimulatedEmpty,
}

impl StoreStatus {
    pub fn is_online(self) -> bool {
        self == StoreStatus::RemoteConnected
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryListing {
    pub records: Vec<InventoryRecord>,
    pub status: StoreStatus,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertTarget {
    Remote,
    Local,
}

impl fmt::Display for InsertTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertTarget::Remote => f.write_str("item inserted into the remote database"),
            InsertTarget::Local => f.write_str("item saved locally (offline mode)"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("remote database error: {0}")]
    Remote(#[from] DbErr),
    #[error("remote database did not answer within {0:?}")]
    Timeout(Duration),
    #[error("local store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("local store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not replace local store: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl StoreError {
    /// True when the remote backend could not be reached at all, as opposed to
    /// failing a statement after connecting.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            StoreError::Timeout(_)
                | StoreError::Remote(DbErr::Conn(_))
                | StoreError::Remote(DbErr::ConnectionAcquire(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_name_is_uppercased() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let r = InventoryRecord::new("ureia ", Category::Fertilizer, 50, date);
        assert_eq!(r.name, "UREIA");
        assert_eq!(r.expiration_iso(), "2025-12-31");
    }

    #[test]
    fn category_parses_both_languages() {
        assert_eq!("Fertilizante".parse::<Category>(), Ok(Category::Fertilizer));
        assert_eq!("GRÃO".parse::<Category>(), Ok(Category::Grain));
        assert_eq!("machinery".parse::<Category>(), Ok(Category::Machinery));
        assert!("seeds".parse::<Category>().is_err());
    }

    #[test]
    fn legacy_json_layout_round_trips() {
        let raw = r#"{"nome":"MILHO","tipo":"Grão","quantidade":10,"validade":"2026-01-15"}"#;
        let r: InventoryRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(r.category, Category::Grain);
        assert_eq!(r.quantity, 10);

        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["nome"], "MILHO");
        assert_eq!(json["tipo"], "Grain");
        assert_eq!(json["validade"], "2026-01-15");
    }

    #[test]
    fn english_keys_are_accepted() {
        let raw = r#"{"name":"X","category":"Pesticide","quantity":3,"expiration_date":"2025-01-01"}"#;
        let r: InventoryRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(r.category, Category::Pesticide);
    }

    #[test]
    fn only_connection_problems_count_as_unreachable() {
        assert!(StoreError::Timeout(Duration::from_secs(8)).is_unreachable());
        assert!(!StoreError::Remote(DbErr::Custom("constraint failed".to_string())).is_unreachable());
        assert!(!StoreError::Json(serde_json::from_str::<i32>("x").unwrap_err()).is_unreachable());
    }
}
