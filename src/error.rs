use thiserror::Error;

pub type Result<T> = std::result::Result<T, ErasureError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErasureError {
    #[error("Invalid discount {0}: expected a value between 0 and 1")]
    InvalidDiscount(f64),

    #[error("Invalid tax rate {0}: expected a finite, non-negative value")]
    InvalidTaxRate(f64),

    #[error("Invalid cost rate {0}: expected a finite, non-negative value per unit area")]
    InvalidCostRate(f64),

    #[error("{kind} requires at least one operand")]
    EmptyAggregate { kind: &'static str },

    #[error("Failed to parse config: {0}")]
    Config(String),

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl ErasureError {
    pub fn empty_aggregate(kind: &'static str) -> Self {
        Self::EmptyAggregate { kind }
    }

    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for ErasureError {
    fn from(err: toml::de::Error) -> Self {
        ErasureError::Config(err.to_string())
    }
}
