// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Registration counter overflow after {0}")]
    CounterOverflow(u64),
}

pub type Result<T> = std::result::Result<T, DomainError>;
