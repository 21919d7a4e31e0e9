use thiserror::Error;
use uuid::Uuid;

pub type GroupingResult<T> = Result<T, GroupingError>;

#[derive(Error, Debug)]
pub enum GroupingError {
    #[error("Asset not found: {0}")]
    AssetNotFound(Uuid),

    #[error("Rule not found: {0}")]
    RuleNotFound(Uuid),

    /// A condition that cannot be evaluated against any asset, e.g. a
    /// tag condition with no tag key. Raised at evaluation time; rule
    /// validation should have rejected it earlier as [`Validation`].
    ///
    /// [`Validation`]: GroupingError::Validation
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    /// A structurally malformed rule or condition, rejected at
    /// create/update time before it reaches the evaluator.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
