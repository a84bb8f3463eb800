//! HTTP transport for the supply decision engine.
//!
//! Handlers translate JSON payloads into [supply_core] calls and shape the
//! responses; all decision logic lives in the core crate.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod views;

pub use router::create_router;
pub use state::{build_risk_service, AppState, PredictorKind};
