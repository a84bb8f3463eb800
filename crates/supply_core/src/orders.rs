//! Pending order records and their wire payloads.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::geo::Coordinate;

/// A shop's pending restock order, normalised and ready for pooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingOrder {
    pub shop_id: String,
    pub location: Coordinate,
    pub qty_needed: u32,
}

impl PendingOrder {
    pub fn new(shop_id: impl Into<String>, lat: f64, lon: f64, qty_needed: u32) -> Self {
        Self {
            shop_id: shop_id.into(),
            location: Coordinate::new(lat, lon),
            qty_needed,
        }
    }
}

/// Order as posted by callers. Either `lat`/`lon` or the `retailer_*`
/// aliases may carry the position; the alias wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingOrderPayload {
    pub shop_id: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub retailer_lat: Option<f64>,
    #[serde(default)]
    pub retailer_lon: Option<f64>,
    #[serde(default)]
    pub qty_needed: Option<i64>,
}

impl PendingOrderPayload {
    /// Resolve aliases and check the record. `index` is used in error messages.
    pub fn normalize(&self, index: usize) -> Result<PendingOrder, ValidationError> {
        let shop_id = self.shop_id.as_str();
        if shop_id.trim().is_empty() {
            return Err(ValidationError::EmptyShopId { index });
        }

        let lat = self.resolve(index, "lat", self.retailer_lat.or(self.lat))?;
        let lon = self.resolve(index, "lon", self.retailer_lon.or(self.lon))?;

        let qty = self.qty_needed.ok_or_else(|| ValidationError::MissingField {
            index,
            shop_id: shop_id.to_string(),
            field: "qty_needed",
        })?;
        if qty < 0 {
            return Err(ValidationError::NegativeQuantity {
                index,
                shop_id: shop_id.to_string(),
                value: qty,
            });
        }
        let qty_needed = u32::try_from(qty).map_err(|_| {
            ValidationError::Request(format!(
                "order {index} ({shop_id}): qty_needed {qty} is out of range"
            ))
        })?;

        Ok(PendingOrder {
            shop_id: shop_id.to_string(),
            location: Coordinate::new(lat, lon),
            qty_needed,
        })
    }

    fn resolve(
        &self,
        index: usize,
        field: &'static str,
        value: Option<f64>,
    ) -> Result<f64, ValidationError> {
        let Some(value) = value else {
            return Err(ValidationError::MissingField {
                index,
                shop_id: self.shop_id.clone(),
                field,
            });
        };
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate {
                index,
                shop_id: self.shop_id.clone(),
                field,
            });
        }
        Ok(value)
    }
}

/// Normalise a whole batch, failing on the first bad record.
pub fn normalize_orders(
    payloads: &[PendingOrderPayload],
) -> Result<Vec<PendingOrder>, ValidationError> {
    payloads
        .iter()
        .enumerate()
        .map(|(index, payload)| payload.normalize(index))
        .collect()
}
