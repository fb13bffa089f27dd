pub mod advisor;

pub use advisor::{decide, IrrigationAction, IrrigationDecision};
