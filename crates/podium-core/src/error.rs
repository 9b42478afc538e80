use thiserror::Error;

use podium_model::ModelError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("validation error: {0}")]
    Validation(#[from] ModelError),
}
