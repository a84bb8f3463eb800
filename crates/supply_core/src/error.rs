use thiserror::Error;

/// Rejection of a malformed input record. The whole request fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("order {index}: shop_id cannot be empty")]
    EmptyShopId { index: usize },
    #[error("order {index} ({shop_id}): missing {field}")]
    MissingField {
        index: usize,
        shop_id: String,
        field: &'static str,
    },
    #[error("order {index} ({shop_id}): {field} must be a finite number")]
    NonFiniteCoordinate {
        index: usize,
        shop_id: String,
        field: &'static str,
    },
    #[error("order {index} ({shop_id}): qty_needed must be >= 0, got {value}")]
    NegativeQuantity {
        index: usize,
        shop_id: String,
        value: i64,
    },
    #[error("{0}")]
    Request(String),
}

/// Failure to load or accept an engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
