use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("regex pattern is empty")]
    EmptyPattern,

    #[error("reserved symbol '{symbol}' at position {position}")]
    ReservedSymbol { symbol: char, position: usize },

    #[error("operator '{operator}' at postfix position {position} is missing an operand")]
    MissingOperand { operator: char, position: usize },

    #[error("postfix expression left {count} unconnected operands")]
    DanglingOperands { count: usize },

    #[error("malformed description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown state '{name}'")]
    UnknownState { name: String },

    #[error("symbol '{symbol}' must be exactly one character")]
    InvalidSymbol { symbol: String },
}

#[cfg(feature = "python")]
impl From<Error> for pyo3::PyErr {
    fn from(err: Error) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
