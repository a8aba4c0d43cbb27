//! Order-log domain logic: the stored entity, form validation and errors.

pub mod entity;
pub mod error;
pub mod validation;

pub use error::*;
pub use validation::*;
