//! Decision logic for a retail supply-chain assistant.
//!
//! - [pooling]: greedy geographic pooling of pending orders
//! - [ranking]: scenario-conditioned distributor ranking
//! - [risk]: the risk-score contract and its predictors
//! - [simulation]: reactive vs predictive restocking cash-flow comparison
//!
//! Every operation is a pure function of its input and the read-only
//! [config::EngineConfig]; nothing is retained between calls.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod orders;
pub mod pooling;
pub mod ranking;
pub mod retailer;
pub mod risk;
pub mod simulation;

pub use config::EngineConfig;
pub use engine::DecisionEngine;
pub use error::{ConfigError, ValidationError};
