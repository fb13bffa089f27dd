pub mod inventory_item;

pub use inventory_item::Entity as InventoryItem;
