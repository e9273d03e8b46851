//! Model provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}
