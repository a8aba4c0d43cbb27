use thiserror::Error;
use super::validation::FieldErrors;
use crate::actor_framework::FrameworkError;

/// Errors that can occur while placing or reading orders.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order form is invalid: {0}")]
    Validation(FieldErrors),
    #[error("Order rejected by the order log: {0}")]
    Rejected(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::Rejected(reason) => OrderError::Rejected(reason),
            FrameworkError::DuplicateId(id) => OrderError::Rejected(format!("duplicate order id {id}")),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                OrderError::ActorCommunicationError(error.to_string())
            }
        }
    }
}
