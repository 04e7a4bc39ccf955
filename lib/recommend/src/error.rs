use crate::store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommendError>;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Scoring task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
