use thiserror::Error;

/// Main error type for the consolidator application
#[derive(Error, Debug)]
pub enum ConsolidatorError {
    /// Inventory loading errors
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A load balancer whose listeners carry no recognized protocol
    ///
    /// Fatal for the whole run: the engine does not skip the offending
    /// record and continue.
    #[error("load balancer {name:?} has no recognized listener protocol")]
    UnclassifiableLoadBalancer { name: String },

    /// A security group referenced by a load balancer with no ingress data
    /// supplied in the inventory
    #[error("no ingress data supplied for security group {group_id:?}")]
    MissingIngressData { group_id: String },

    /// Invalid input/arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Inventory-specific errors
#[derive(Error, Debug)]
pub enum InventoryError {
    /// Inventory file could not be read
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },

    /// Inventory file could not be parsed
    #[error("Failed to parse {path}: {reason}")]
    Unparseable { path: String, reason: String },

    /// A load balancer record violating the input contract
    #[error("Invalid load balancer record: {0}")]
    InvalidRecord(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Missing required configuration
    #[error("Missing required: {0}")]
    MissingRequired(String),

    /// Invalid configuration value
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Helper type alias for Results
pub type Result<T> = std::result::Result<T, ConsolidatorError>;
