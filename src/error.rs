//! Error taxonomy for the mining core

use thiserror::Error;

/// Errors produced by the encoding, mining and rule-generation core.
///
/// Application layers (data loading, visualization, the CLI) report failures
/// through `anyhow`; these variants convert into it transparently.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MineError {
    /// The input transaction collection is empty or otherwise unusable.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A support or metric threshold lies outside its valid domain.
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),

    /// A metric computation hit a zero support in a denominator.
    #[error("division by zero computing {metric}: support of the {operand} is 0")]
    DivisionByZero {
        metric: &'static str,
        operand: &'static str,
    },
}
