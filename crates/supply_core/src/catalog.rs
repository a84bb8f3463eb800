//! Static distributor reference data.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distributor {
    pub name: String,
    /// Delivery cost in currency units.
    pub cost: f64,
    /// Delivery time in hours.
    pub speed_hrs: f64,
    /// On-time probability in [0, 1].
    pub reliability: f64,
    pub tier: String,
}

impl Distributor {
    pub fn new(
        name: impl Into<String>,
        cost: f64,
        speed_hrs: f64,
        reliability: f64,
        tier: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
            speed_hrs,
            reliability,
            tier: tier.into(),
        }
    }

    pub fn eta_label(&self) -> String {
        format!("{} Hours", self.speed_hrs)
    }
}

/// Ordered distributor list. Order matters: it breaks score ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistributorCatalog(pub Vec<Distributor>);

impl Default for DistributorCatalog {
    fn default() -> Self {
        Self(vec![
            Distributor::new("FastTrack Logistics", 100.0, 4.0, 0.98, "EXPRESS"),
            Distributor::new("Budget Movers", 60.0, 24.0, 0.85, "ECONOMY"),
            Distributor::new("GraminRoute Hub", 75.0, 12.0, 0.99, "REGIONAL"),
        ])
    }
}

impl DistributorCatalog {
    pub fn iter(&self) -> impl Iterator<Item = &Distributor> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::Invalid(
                "distributor catalog cannot be empty".to_string(),
            ));
        }
        for distributor in &self.0 {
            if !(distributor.cost > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "distributor '{}' must have a positive cost",
                    distributor.name
                )));
            }
            if !(distributor.speed_hrs > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "distributor '{}' must have a positive speed_hrs",
                    distributor.name
                )));
            }
            if !(0.0..=1.0).contains(&distributor.reliability) {
                return Err(ConfigError::Invalid(format!(
                    "distributor '{}' reliability must be within [0, 1]",
                    distributor.name
                )));
            }
        }
        Ok(())
    }
}
