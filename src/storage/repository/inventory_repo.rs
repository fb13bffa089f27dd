use crate::storage::entity::inventory_item::{
    self, ActiveModel as InventoryActiveModel, Entity as InventoryItem,
};
use crate::storage::model::{Category, InventoryRecord};
use log::warn;
use sea_orm::entity::prelude::Date;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QuerySelect, Set};

/// The four columns the inventory table is guaranteed to have. Any surrogate key is
/// left out so pre-existing tables without one still read.
#[derive(Debug, FromQueryResult)]
pub struct InventoryRow {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub expiration_date: Date,
}

impl TryFrom<InventoryRow> for InventoryRecord {
    type Error = String;

    fn try_from(row: InventoryRow) -> Result<Self, Self::Error> {
        let category = row.category.parse::<Category>()?;
        Ok(Self {
            name: row.name,
            category,
            quantity: row.quantity,
            expiration_date: row.expiration_date,
        })
    }
}

pub struct InventoryRepository;

impl InventoryRepository {
    /// All rows in table order. Rows with an unknown category are skipped.
    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<InventoryRecord>, DbErr> {
        let rows = InventoryItem::find()
            .select_only()
            .columns([
                inventory_item::Column::Name,
                inventory_item::Column::Category,
                inventory_item::Column::Quantity,
                inventory_item::Column::ExpirationDate,
            ])
            .into_model::<InventoryRow>()
            .all(db)
            .await?;

        let records = rows
            .into_iter()
            .filter_map(|row| {
                let name = row.name.clone();
                match InventoryRecord::try_from(row) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!("skipping inventory row {}: {}", name, e);
                        None
                    }
                }
            })
            .collect();
        Ok(records)
    }

    /// Inserts the four columns; returns the number of rows written.
    pub async fn insert(db: &DatabaseConnection, record: &InventoryRecord) -> Result<u64, DbErr> {
        let active_model = InventoryActiveModel {
            name: Set(record.name.clone()),
            category: Set(record.category.to_string()),
            quantity: Set(record.quantity),
            expiration_date: Set(record.expiration_date),
            ..Default::default()
        };

        InventoryItem::insert(active_model)
            .exec_without_returning(db)
            .await
    }
}
