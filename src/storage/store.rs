use crate::config::StoreConfig;
use crate::storage::connection::establish_connection;
use crate::storage::file_store::FileStore;
use crate::storage::model::{
    InsertTarget, InventoryListing, InventoryRecord, StoreError, StoreStatus,
};
use crate::storage::repository::InventoryRepository;
use async_trait::async_trait;
use log::{info, warn};
use sea_orm::{DatabaseConnection, DbErr};
use std::future::Future;
use std::time::Duration;

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Never fails: errors degrade to a fallback listing with a status label.
    async fn list(&self) -> InventoryListing;

    async fn insert(&self, record: InventoryRecord) -> Result<InsertTarget, StoreError>;
}

/// Remote relational backend. Each call connects anew; there is no cached
/// "known offline" state.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    url: String,
    timeout: Duration,
    fallback: FileStore,
}

impl RemoteStore {
    pub fn new(url: impl Into<String>, timeout: Duration, fallback: FileStore) -> Self {
        Self {
            url: url.into(),
            timeout,
            fallback,
        }
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, DbErr>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }

    async fn connect(&self) -> Result<DatabaseConnection, StoreError> {
        self.bounded(establish_connection(&self.url, self.timeout))
            .await
    }

    async fn fetch_remote(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        let db = self.connect().await?;
        let rows = self.bounded(InventoryRepository::list_all(&db)).await;
        if let Err(e) = db.close().await {
            warn!("closing inventory connection failed: {}", e);
        }
        rows
    }
}

#[async_trait]
impl InventoryStore for RemoteStore {
    async fn list(&self) -> InventoryListing {
        match self.fetch_remote().await {
            Ok(records) => InventoryListing {
                records,
                status: StoreStatus::RemoteConnected,
                detail: "Connected to remote database".to_string(),
            },
            Err(e) => {
                warn!("remote inventory unavailable, reading local file: {}", e);
                self.fallback.list_local()
            }
        }
    }

    /// An unreachable backend means no remote capability for this call, so the record
    /// goes to the local file. A statement failing after connecting is reported as-is.
    async fn insert(&self, record: InventoryRecord) -> Result<InsertTarget, StoreError> {
        let db = match self.connect().await {
            Ok(db) => db,
            Err(e) if e.is_unreachable() => {
                warn!("remote inventory unreachable, saving locally: {}", e);
                self.fallback.append(record)?;
                return Ok(InsertTarget::Local);
            }
            Err(e) => return Err(e),
        };
        let res = self.bounded(InventoryRepository::insert(&db, &record)).await;
        if let Err(e) = db.close().await {
            warn!("closing inventory connection failed: {}", e);
        }
        res?;
        info!("inventory item inserted remotely: {}", record.name);
        Ok(InsertTarget::Remote)
    }
}

#[async_trait]
impl InventoryStore for FileStore {
    async fn list(&self) -> InventoryListing {
        self.list_local()
    }

    async fn insert(&self, record: InventoryRecord) -> Result<InsertTarget, StoreError> {
        self.append(record)?;
        Ok(InsertTarget::Local)
    }
}

#[derive(Debug, Clone)]
pub enum AnyStore {
    Remote(RemoteStore),
    Local(FileStore),
}

impl AnyStore {
    /// Remote when a database URL is configured, local file otherwise.
    pub fn from_config(config: &StoreConfig) -> Self {
        let file = FileStore::new(&config.local_path);
        match config.database_url.as_deref() {
            Some(url) if !url.trim().is_empty() => {
                AnyStore::Remote(RemoteStore::new(url.trim(), config.timeout, file))
            }
            _ => AnyStore::Local(file),
        }
    }
}

#[async_trait]
impl InventoryStore for AnyStore {
    async fn list(&self) -> InventoryListing {
        match self {
            AnyStore::Remote(s) => s.list().await,
            AnyStore::Local(s) => s.list().await,
        }
    }

    async fn insert(&self, record: InventoryRecord) -> Result<InsertTarget, StoreError> {
        match self {
            AnyStore::Remote(s) => s.insert(record).await,
            AnyStore::Local(s) => s.insert(record).await,
        }
    }
}
