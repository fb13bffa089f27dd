pub mod connection;
pub mod entity;
pub mod file_store;
pub mod model;
pub mod repository;
pub mod store;

pub use connection::establish_connection;
pub use file_store::FileStore;
pub use model::{
    Category, InsertTarget, InventoryListing, InventoryRecord, StoreError, StoreStatus,
};
pub use store::{AnyStore, InventoryStore, RemoteStore};
