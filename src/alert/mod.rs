pub mod types;
pub mod unified;
pub mod webhook;

pub use types::{AlertError, AlertNotifier, DeliveryReport};
pub use unified::{AnyNotifier, SimulatedNotifier};
pub use webhook::WebhookNotifier;
