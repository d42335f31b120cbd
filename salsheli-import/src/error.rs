use salsheli_catalog::JsonError;
use salsheli_lib::RuleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Catalog error: {0}")]
    Json(#[from] JsonError),
    #[error("Rule error: {0}")]
    Rules(#[from] RuleError),
    #[error("Partition not found: {0}")]
    PartitionNotFound(String),
}
